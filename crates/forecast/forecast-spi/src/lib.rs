//! Forecast Service Provider Interface
//!
//! Defines the contracts, models and errors shared by the envelope
//! forecasting engine: sub-channel aggregation, reference-window bound
//! estimation and the outputs of a forward pass.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{EnvelopeEstimator, SubChannelAggregator};
pub use error::{ForecastError, Result};
pub use model::{Envelope, ForecastOutput, ForecastStep};
