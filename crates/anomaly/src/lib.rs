//! # anomaly
//!
//! Anomaly detection for forecast envelopes and tabular sensor records.
//! Provides the envelope and rate-of-change detectors, health scoring and
//! alerting.

pub use anomaly_facade::*;
