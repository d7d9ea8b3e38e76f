//! Reference-window bound estimation
//!
//! For forecast step `t` the reference window is `data[t..t + reference]`,
//! taken from the tensor origin without padding. Mean and population
//! standard deviation are computed per (channel, sub-channel) over that
//! window and the band is `mean ± width · std`.

use forecast_api::ForecastConfig;
use forecast_spi::{Envelope, EnvelopeEstimator, ForecastError, Result};
use ndarray::{s, Array3, ArrayView3, Axis};

/// Compute lower/upper envelopes of shape (horizon, C, V).
///
/// Fails with [`ForecastError::InvalidShape`] when the tensor is too short
/// for the last step's window.
pub fn compute_bounds(
    data: ArrayView3<'_, f64>,
    horizon: usize,
    reference: usize,
    width: f64,
) -> Result<Envelope> {
    if reference == 0 {
        return Err(ForecastError::invalid_configuration(
            "reference",
            "must be positive",
        ));
    }

    let (len, channels, sub_channels) = data.dim();
    let reach = horizon
        .saturating_sub(1)
        .checked_add(reference)
        .ok_or_else(|| {
            ForecastError::invalid_configuration("reference", "window length overflows")
        })?;
    if len < reach {
        return Err(ForecastError::invalid_shape(
            &[reach, channels, sub_channels],
            data.shape(),
        ));
    }

    let mut lower = Array3::zeros((horizon, channels, sub_channels));
    let mut upper = Array3::zeros((horizon, channels, sub_channels));

    for t in 0..horizon {
        let window = data.slice(s![t..t + reference, .., ..]);
        let mean = window.mean_axis(Axis(0)).ok_or_else(|| {
            ForecastError::invalid_configuration("reference", "empty reference window")
        })?;
        let spread = window.std_axis(Axis(0), 0.0) * width;

        lower.index_axis_mut(Axis(0), t).assign(&(&mean - &spread));
        upper.index_axis_mut(Axis(0), t).assign(&(&mean + &spread));
    }

    Ok(Envelope::new(lower, upper))
}

/// Envelope estimator parameterized by its dispersion multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceWindowEstimator {
    horizon: usize,
    reference: usize,
    width: f64,
}

impl ReferenceWindowEstimator {
    pub fn new(horizon: usize, reference: usize, width: f64) -> Self {
        Self {
            horizon,
            reference,
            width,
        }
    }

    /// Create from configuration.
    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.horizon, config.reference(), config.width)
    }

    pub fn reference(&self) -> usize {
        self.reference
    }
}

impl EnvelopeEstimator for ReferenceWindowEstimator {
    fn estimate(&self, data: ArrayView3<'_, f64>) -> Result<Envelope> {
        compute_bounds(data, self.horizon, self.reference, self.width)
    }

    fn width(&self) -> f64 {
        self.width
    }
}
