//! Envelope forecasting pipeline
//!
//! Wires bound estimation and sub-channel aggregation into one forward pass.
//! The pipeline holds configuration only; every call is stateless given its
//! input tensor.

use forecast_api::ForecastConfig;
use forecast_spi::{
    EnvelopeEstimator, ForecastError, ForecastOutput, Result, SubChannelAggregator,
};
use ndarray::{s, Array2, ArrayView3};

use crate::aggregation::NonZeroMean;
use crate::bounds::ReferenceWindowEstimator;

/// Forecast pipeline over observation tensors of shape (T + T', C, V)
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    config: ForecastConfig,
    estimator: ReferenceWindowEstimator,
    aggregator: NonZeroMean,
}

impl ForecastPipeline {
    /// Create a pipeline, validating the configuration.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            estimator: ReferenceWindowEstimator::from_config(&config),
            aggregator: NonZeroMean::new(),
            config,
        })
    }

    /// Get the run configuration.
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Check a tensor against the configured (T + T', C, V) shape.
    pub fn check_shape(&self, data: &ArrayView3<'_, f64>) -> Result<()> {
        let expected = self.config.tensor_shape();
        if data.shape() != &expected[..] {
            return Err(ForecastError::invalid_shape(&expected, data.shape()));
        }
        Ok(())
    }

    /// Run the forward pass.
    ///
    /// Returns the aggregated forecast-horizon tail `data[T..]` together with
    /// the aggregated lower and upper envelopes, all of shape (T', C).
    pub fn forward(&self, data: ArrayView3<'_, f64>) -> Result<ForecastOutput> {
        self.check_shape(&data)?;

        let envelope = self.estimator.estimate(data.view())?;
        let future = data.slice(s![self.config.history.., .., ..]);

        let forecast = self.aggregator.aggregate(future);
        let lower = self.aggregator.aggregate(envelope.lower());
        let upper = self.aggregator.aggregate(envelope.upper());

        tracing::debug!(
            history = self.config.history,
            horizon = self.config.horizon,
            channels = self.config.channels,
            width = self.estimator.width(),
            "forward pass complete"
        );

        Ok(ForecastOutput::new(forecast, lower, upper))
    }

    /// Aggregate the retrospective slice `data[..T]` into a (T, C) matrix.
    pub fn history_weighted(&self, data: ArrayView3<'_, f64>) -> Result<Array2<f64>> {
        self.check_shape(&data)?;
        let history = data.slice(s![..self.config.history, .., ..]);
        Ok(self.aggregator.aggregate(history))
    }
}
