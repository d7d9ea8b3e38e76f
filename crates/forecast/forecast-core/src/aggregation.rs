//! Sub-channel aggregation
//!
//! A reading of exactly zero means "no data" on that sub-channel, so the
//! sub-channel axis is collapsed with a mean over the non-zero entries only.

use forecast_spi::SubChannelAggregator;
use ndarray::{Array2, ArrayView1, ArrayView3, Axis};

/// Mean of the non-zero entries of a lane.
///
/// A lane with no non-zero entry evaluates to its plain sum over one, i.e. 0.
pub fn non_zero_mean(lane: ArrayView1<'_, f64>) -> f64 {
    let (sum, count) = lane
        .iter()
        .filter(|&&x| x != 0.0)
        .fold((0.0, 0usize), |(sum, count), &x| (sum + x, count + 1));
    sum / count.max(1) as f64
}

/// Collapse a (N, C, V) tensor into a (N, C) matrix of non-zero means.
pub fn weighted_sum(data: ArrayView3<'_, f64>) -> Array2<f64> {
    data.map_axis(Axis(2), non_zero_mean)
}

/// Non-zero-aware mean aggregator
#[derive(Debug, Clone, Copy, Default)]
pub struct NonZeroMean;

impl NonZeroMean {
    pub fn new() -> Self {
        Self
    }
}

impl SubChannelAggregator for NonZeroMean {
    fn aggregate(&self, data: ArrayView3<'_, f64>) -> Array2<f64> {
        weighted_sum(data)
    }
}
