//! Anomaly mask over forecast steps and channels.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{AnomalyError, Result};

/// Integer 0/1 matrix of shape (T', C), aligned with the aggregated series
/// it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyMask {
    mask: Array2<u8>,
}

impl AnomalyMask {
    /// Create from boolean flags.
    pub fn from_flags(flags: &Array2<bool>) -> Self {
        Self {
            mask: flags.mapv(u8::from),
        }
    }

    /// Create from an integer matrix, rejecting entries other than 0 and 1.
    pub fn try_from_matrix(mask: Array2<u8>) -> Result<Self> {
        if mask.iter().any(|&x| x > 1) {
            return Err(AnomalyError::invalid_parameter(
                "mask",
                "entries must be 0 or 1",
            ));
        }
        Ok(Self { mask })
    }

    /// All-clear mask of the given shape.
    pub fn clear(horizon: usize, channels: usize) -> Self {
        Self {
            mask: Array2::zeros((horizon, channels)),
        }
    }

    pub fn as_matrix(&self) -> &Array2<u8> {
        &self.mask
    }

    pub fn into_matrix(self) -> Array2<u8> {
        self.mask
    }

    /// Number of forecast steps (T').
    pub fn horizon(&self) -> usize {
        self.mask.nrows()
    }

    /// Number of channels (C).
    pub fn channels(&self) -> usize {
        self.mask.ncols()
    }

    pub fn is_anomaly(&self, step: usize, channel: usize) -> bool {
        self.mask.get((step, channel)).is_some_and(|&x| x == 1)
    }

    /// Row-major boolean flags.
    pub fn flags(&self) -> Vec<bool> {
        self.mask.iter().map(|&x| x == 1).collect()
    }

    /// Get (step, channel) indices of detected anomalies.
    pub fn anomaly_indices(&self) -> Vec<(usize, usize)> {
        self.mask
            .indexed_iter()
            .filter_map(|(index, &x)| if x == 1 { Some(index) } else { None })
            .collect()
    }

    /// Count of detected anomalies.
    pub fn anomaly_count(&self) -> usize {
        self.mask.iter().filter(|&&x| x == 1).count()
    }

    /// Anomalous channels per forecast step.
    pub fn step_counts(&self) -> Vec<usize> {
        self.mask
            .map_axis(Axis(1), |lane| lane.iter().filter(|&&x| x == 1).count())
            .to_vec()
    }

    /// Anomalous steps per channel.
    pub fn channel_counts(&self) -> Vec<usize> {
        self.mask
            .map_axis(Axis(0), |lane| lane.iter().filter(|&&x| x == 1).count())
            .to_vec()
    }

    /// Convert into nested rows for plain serialization.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.mask.outer_iter().map(|row| row.to_vec()).collect()
    }
}
