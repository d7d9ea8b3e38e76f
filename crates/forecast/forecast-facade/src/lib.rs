//! Forecast Facade
//!
//! High-level API for the envelope forecasting engine. Re-exports all public
//! types from the forecast stack for convenient usage.

// Re-export everything from API (which includes SPI)
pub use forecast_api::*;

// Explicit re-exports for documentation
pub use forecast_api::prelude;

// Re-export core modules for direct access
pub use forecast_core::{aggregation, bounds, observation, pipeline, rolling};

// Re-export core types at root
pub use forecast_core::{
    compute_bounds, weighted_sum, ForecastPipeline, NonZeroMean, ReferenceWindowEstimator,
    RollingForecast, RollingWindow,
};
