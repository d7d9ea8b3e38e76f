//! Trait for collapsing the sub-channel axis

use ndarray::{Array2, ArrayView3};

/// Collapses the innermost sub-channel axis of a (N, C, V) tensor into a
/// (N, C) matrix.
pub trait SubChannelAggregator: Send + Sync {
    /// Aggregate every (n, c) lane into a single scalar.
    fn aggregate(&self, data: ArrayView3<'_, f64>) -> Array2<f64>;
}
