//! Alert types for anomaly detection.

use serde::{Deserialize, Serialize};

/// Alert severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

/// An alert raised for one forecast step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Forecast step the alert refers to; stream time when raised from a
    /// rolling window.
    pub step: usize,
    /// Observed quantity (health score or summed channel value).
    pub value: f64,
    /// Distance from the acceptable range.
    pub score: f64,
    pub severity: AlertSeverity,
    pub message: String,
}
