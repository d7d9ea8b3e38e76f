//! Envelope model

use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};

/// Lower and upper expected-range tensors, both of shape (T', C, V).
///
/// Recomputed on every forward pass; carries no identity beyond its values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// mean − k·std per (step, channel, sub-channel)
    pub lower: Array3<f64>,
    /// mean + k·std per (step, channel, sub-channel)
    pub upper: Array3<f64>,
}

impl Envelope {
    pub fn new(lower: Array3<f64>, upper: Array3<f64>) -> Self {
        Self { lower, upper }
    }

    /// Number of forecast steps covered.
    pub fn horizon(&self) -> usize {
        self.lower.shape()[0]
    }

    pub fn lower(&self) -> ArrayView3<'_, f64> {
        self.lower.view()
    }

    pub fn upper(&self) -> ArrayView3<'_, f64> {
        self.upper.view()
    }

    /// Width of the band at every cell.
    pub fn spread(&self) -> Array3<f64> {
        &self.upper - &self.lower
    }
}
