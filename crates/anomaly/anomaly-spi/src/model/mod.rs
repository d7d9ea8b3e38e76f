//! Data models for anomaly detection.
//!
//! This module contains data structures used throughout the anomaly detection system.

mod alert;
mod anomaly_mask;
mod decision;
mod rate_of_change;

pub use alert::{Alert, AlertSeverity};
pub use anomaly_mask::AnomalyMask;
pub use decision::{Decision, DecisionMode, EnvelopeInput};
pub use rate_of_change::{FeatureRecord, FeatureVerdict, RateOfChangeReport, FEATURE_COUNT};
