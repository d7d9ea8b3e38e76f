//! Observation tensor construction
//!
//! Converts plain nested or flat numeric input supplied by an outer layer
//! into a (time, channel, sub-channel) tensor, rejecting ragged input.

use forecast_spi::{ForecastError, Result};
use ndarray::{Array2, Array3};

/// Build a tensor from `rows[time][channel][sub_channel]`.
pub fn from_nested(rows: Vec<Vec<Vec<f64>>>) -> Result<Array3<f64>> {
    let steps = rows.len();
    let channels = rows.first().map_or(0, Vec::len);
    let sub_channels = rows
        .first()
        .and_then(|row| row.first())
        .map_or(0, Vec::len);

    if steps == 0 || channels == 0 || sub_channels == 0 {
        return Err(ForecastError::invalid_shape(
            &[steps.max(1), channels.max(1), sub_channels.max(1)],
            &[steps, channels, sub_channels],
        ));
    }

    let mut values = Vec::with_capacity(steps * channels * sub_channels);
    for row in rows {
        if row.len() != channels {
            return Err(ForecastError::invalid_shape(
                &[steps, channels, sub_channels],
                &[steps, row.len(), sub_channels],
            ));
        }
        for lane in row {
            if lane.len() != sub_channels {
                return Err(ForecastError::invalid_shape(
                    &[steps, channels, sub_channels],
                    &[steps, channels, lane.len()],
                ));
            }
            values.extend(lane);
        }
    }

    from_shape_vec((steps, channels, sub_channels), values)
}

/// Build a tensor from row-major values.
pub fn from_shape_vec(shape: (usize, usize, usize), values: Vec<f64>) -> Result<Array3<f64>> {
    let len = values.len();
    Array3::from_shape_vec(shape, values)
        .map_err(|_| ForecastError::invalid_shape(&[shape.0, shape.1, shape.2], &[len]))
}

/// Convert a matrix into nested rows for plain serialization.
pub fn to_rows(matrix: &Array2<f64>) -> Vec<Vec<f64>> {
    matrix.outer_iter().map(|row| row.to_vec()).collect()
}
