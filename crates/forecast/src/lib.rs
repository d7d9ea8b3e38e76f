//! # forecast
//!
//! Expected-range forecasting for windowed multi-channel sensor series.
//! Collapses redundant sub-channel readings, estimates a mean ± k·std
//! envelope over a sliding reference window and aggregates both into
//! aligned (T', C) matrices.

pub use forecast_facade::*;
