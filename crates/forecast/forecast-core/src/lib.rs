//! Forecast Core
//!
//! Core implementations of the envelope forecasting engine: non-zero-aware
//! sub-channel aggregation, reference-window bound estimation, the forward
//! pipeline and a rolling driver over long tensors.

pub mod aggregation;
pub mod bounds;
pub mod observation;
pub mod pipeline;
pub mod rolling;

// Re-export SPI traits for implementations
pub use forecast_spi::{
    Envelope, EnvelopeEstimator, ForecastError, ForecastOutput, ForecastStep, Result,
    SubChannelAggregator,
};

// Re-export main types
pub use aggregation::{weighted_sum, NonZeroMean};
pub use bounds::{compute_bounds, ReferenceWindowEstimator};
pub use pipeline::ForecastPipeline;
pub use rolling::{RollingForecast, RollingWindow};
