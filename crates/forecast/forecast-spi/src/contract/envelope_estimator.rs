//! Trait for expected-range envelope estimation

use ndarray::ArrayView3;

use crate::error::Result;
use crate::model::Envelope;

/// Computes lower/upper envelopes of shape (T', C, V) from an observation
/// tensor of shape (T + T', C, V).
pub trait EnvelopeEstimator: Send + Sync {
    /// Estimate the envelope for every forecast step.
    fn estimate(&self, data: ArrayView3<'_, f64>) -> Result<Envelope>;

    /// Standard-deviation scale factor applied around the window mean.
    fn width(&self) -> f64;
}
