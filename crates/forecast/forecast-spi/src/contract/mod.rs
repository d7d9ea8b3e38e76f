//! Contract module containing trait definitions for forecast operations

mod envelope_estimator;
mod sub_channel_aggregator;

pub use envelope_estimator::EnvelopeEstimator;
pub use sub_channel_aggregator::SubChannelAggregator;
