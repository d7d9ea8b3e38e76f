//! Contract definitions for anomaly detection.
//!
//! This module contains trait definitions that providers must implement.

mod anomaly_decision;

pub use anomaly_decision::AnomalyDecision;
