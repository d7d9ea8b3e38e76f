//! Forward pass output model

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Aggregated forecast with its expected-range band.
///
/// All three matrices have shape (T', C) and are aligned index for index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOutput {
    /// Aggregated observation over the forecast horizon
    pub forecast: Array2<f64>,
    /// Aggregated lower bound
    pub lower: Array2<f64>,
    /// Aggregated upper bound
    pub upper: Array2<f64>,
}

/// One forecast index worth of output, as emitted to a streaming consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastStep {
    pub index: usize,
    pub forecast: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl ForecastOutput {
    pub fn new(forecast: Array2<f64>, lower: Array2<f64>, upper: Array2<f64>) -> Self {
        Self {
            forecast,
            lower,
            upper,
        }
    }

    /// Number of forecast steps (T').
    pub fn horizon(&self) -> usize {
        self.forecast.nrows()
    }

    /// Number of channels (C).
    pub fn channels(&self) -> usize {
        self.forecast.ncols()
    }

    /// Get a single step of the output.
    pub fn step(&self, index: usize) -> Option<ForecastStep> {
        if index >= self.horizon() {
            return None;
        }
        Some(ForecastStep {
            index,
            forecast: self.forecast.row(index).to_vec(),
            lower: self.lower.row(index).to_vec(),
            upper: self.upper.row(index).to_vec(),
        })
    }

    /// Iterate the output one forecast index at a time.
    pub fn steps(&self) -> impl Iterator<Item = ForecastStep> + '_ {
        (0..self.horizon()).filter_map(move |index| self.step(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> ForecastOutput {
        ForecastOutput::new(
            array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]],
            array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]],
            array![[2.0, 3.0], [4.0, 5.0], [6.0, 7.0]],
        )
    }

    #[test]
    fn test_dimensions() {
        let output = sample();
        assert_eq!(output.horizon(), 3);
        assert_eq!(output.channels(), 2);
    }

    #[test]
    fn test_steps_follow_rows() {
        let steps: Vec<ForecastStep> = sample().steps().collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1].index, 1);
        assert_eq!(steps[1].forecast, vec![3.0, 4.0]);
        assert_eq!(steps[1].lower, vec![2.0, 3.0]);
        assert_eq!(steps[1].upper, vec![4.0, 5.0]);
    }

    #[test]
    fn test_step_out_of_range() {
        assert!(sample().step(3).is_none());
    }
}
