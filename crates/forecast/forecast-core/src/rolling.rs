//! Rolling forecast over a long observation tensor
//!
//! Windows of `T + T'` steps start at offset 0 and advance by `T'`, so the
//! forecast horizons of consecutive windows tile the series without overlap.

use forecast_spi::{ForecastError, ForecastOutput, Result};
use ndarray::{s, Array2, ArrayView3, Axis};
use serde::{Deserialize, Serialize};

use crate::pipeline::ForecastPipeline;

/// Output of one rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingWindow {
    /// Time index of the window's first step in the full tensor
    pub offset: usize,
    pub output: ForecastOutput,
}

/// Iterator running the pipeline over successive windows.
pub struct RollingForecast<'a> {
    pipeline: &'a ForecastPipeline,
    data: ArrayView3<'a, f64>,
    offset: usize,
}

impl<'a> RollingForecast<'a> {
    /// Create a rolling driver over `data` of shape (M, C, V), M ≥ T + T'.
    pub fn new(pipeline: &'a ForecastPipeline, data: ArrayView3<'a, f64>) -> Result<Self> {
        let config = pipeline.config();
        let (len, channels, sub_channels) = data.dim();
        if len < config.total_len()
            || channels != config.channels
            || sub_channels != config.sub_channels
        {
            return Err(ForecastError::invalid_shape(
                &config.tensor_shape(),
                data.shape(),
            ));
        }

        Ok(Self {
            pipeline,
            data,
            offset: 0,
        })
    }

    /// Number of windows the iterator yields in total.
    pub fn window_count(&self) -> usize {
        let config = self.pipeline.config();
        (self.data.len_of(Axis(0)) - config.total_len()) / config.horizon + 1
    }

    /// Aggregated history of the first window, shape (T, C).
    pub fn initial_history(&self) -> Result<Array2<f64>> {
        self.pipeline.history_weighted(self.window(0))
    }

    fn window(&self, offset: usize) -> ArrayView3<'a, f64> {
        let total = self.pipeline.config().total_len();
        self.data.clone().slice_move(s![offset..offset + total, .., ..])
    }
}

impl Iterator for RollingForecast<'_> {
    type Item = Result<RollingWindow>;

    fn next(&mut self) -> Option<Self::Item> {
        let config = self.pipeline.config();
        if self.offset + config.total_len() > self.data.len_of(Axis(0)) {
            return None;
        }

        let offset = self.offset;
        self.offset += config.horizon;
        tracing::debug!(offset, "rolling window");

        Some(
            self.pipeline
                .forward(self.window(offset))
                .map(|output| RollingWindow { offset, output }),
        )
    }
}
