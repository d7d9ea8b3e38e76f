//! Forecast Consumer API
//!
//! Configuration types for the envelope forecasting engine.
//!
//! This crate provides:
//! - [`ForecastConfig`], the immutable run configuration (T, T', C, V, width)
//! - Re-exports from SPI for convenience

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use forecast_spi::{
    Envelope, EnvelopeEstimator, ForecastError, ForecastOutput, ForecastStep, Result,
    SubChannelAggregator,
};

/// Default standard-deviation scale factor for the envelope.
pub const DEFAULT_WIDTH: f64 = 2.0;

// ============================================================================
// Forecast Configuration
// ============================================================================

/// Configuration of one forecast run.
///
/// Fixed at construction. A tensor handed to the engine must have shape
/// `(history + horizon, channels, sub_channels)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Historical horizon (T).
    pub history: usize,
    /// Forecast horizon (T').
    pub horizon: usize,
    /// Channel count (C).
    pub channels: usize,
    /// Sub-channel count (V).
    pub sub_channels: usize,
    /// Reference window length; `None` means `history`.
    #[serde(default)]
    pub reference: Option<usize>,
    /// Dispersion multiplier (k, also written β).
    #[serde(default = "default_width")]
    pub width: f64,
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

impl ForecastConfig {
    pub fn new(history: usize, horizon: usize, channels: usize, sub_channels: usize) -> Self {
        Self {
            history,
            horizon,
            channels,
            sub_channels,
            reference: None,
            width: DEFAULT_WIDTH,
        }
    }

    /// Set the dispersion multiplier.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set an explicit reference window length.
    pub fn with_reference(mut self, reference: usize) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Effective reference window length.
    pub fn reference(&self) -> usize {
        self.reference.unwrap_or(self.history)
    }

    /// Total time length (T + T') of the observation tensor.
    pub fn total_len(&self) -> usize {
        self.history + self.horizon
    }

    /// Expected observation tensor shape.
    pub fn tensor_shape(&self) -> [usize; 3] {
        [self.total_len(), self.channels, self.sub_channels]
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("history", self.history),
            ("horizon", self.horizon),
            ("channels", self.channels),
            ("sub_channels", self.sub_channels),
            ("reference", self.reference()),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ForecastError::invalid_configuration(name, "must be positive"));
            }
        }

        let total = self
            .history
            .checked_add(self.horizon)
            .ok_or_else(|| ForecastError::invalid_configuration("horizon", "T + T' overflows"))?;

        // The last step's window is [T' - 1, T' - 1 + reference).
        let reach = (self.horizon - 1)
            .checked_add(self.reference())
            .ok_or_else(|| {
                ForecastError::invalid_configuration("reference", "window length overflows")
            })?;
        if reach > total {
            return Err(ForecastError::invalid_configuration(
                "reference",
                format!(
                    "window of {} overruns tensor length {} at step {}",
                    self.reference(),
                    total,
                    self.horizon - 1
                ),
            ));
        }

        if !self.width.is_finite() || self.width < 0.0 {
            return Err(ForecastError::invalid_configuration(
                "width",
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ForecastConfig, DEFAULT_WIDTH};
    pub use forecast_spi::{
        Envelope, EnvelopeEstimator, ForecastError, ForecastOutput, ForecastStep, Result,
        SubChannelAggregator,
    };
}
