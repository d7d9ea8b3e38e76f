//! Anomaly Detection Service Provider Interface
//!
//! Defines the decision contract, result models and errors shared by the
//! envelope detector, the rate-of-change detector and health scoring.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::AnomalyDecision;
pub use error::{AnomalyError, Result};
pub use model::{
    Alert, AlertSeverity, AnomalyMask, Decision, DecisionMode, EnvelopeInput, FeatureRecord,
    FeatureVerdict, RateOfChangeReport, FEATURE_COUNT,
};
