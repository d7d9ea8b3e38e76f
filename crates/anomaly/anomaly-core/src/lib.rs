//! Anomaly Detection Core
//!
//! Implementations for envelope and rate-of-change detection, health
//! scoring, and alerting.

mod alerting;
mod detectors;
mod health;

pub use alerting::*;
pub use detectors::*;
pub use health::*;
