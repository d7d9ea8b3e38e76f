//! Forecast error types

use thiserror::Error;

/// Errors that can occur during forecasting operations
///
/// Both variants are contract violations on the caller's side: the engine
/// itself has no recoverable runtime failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Tensor rank or dimensions do not match the configured shape
    #[error("Invalid shape: expected {expected:?}, got {actual:?}")]
    InvalidShape {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Configuration value outside its valid domain
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfiguration { name: String, reason: String },
}

impl ForecastError {
    /// Shorthand for an [`ForecastError::InvalidConfiguration`].
    pub fn invalid_configuration(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`ForecastError::InvalidShape`].
    pub fn invalid_shape(expected: &[usize], actual: &[usize]) -> Self {
        Self::InvalidShape {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}
