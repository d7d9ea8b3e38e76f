//! Anomaly Detection API
//!
//! Configuration types for anomaly detection, health scoring and alerting.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{
    Alert, AlertSeverity, AnomalyDecision, AnomalyError, AnomalyMask, Decision, DecisionMode,
    EnvelopeInput, FeatureRecord, FeatureVerdict, RateOfChangeReport, Result, FEATURE_COUNT,
};

fn require_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AnomalyError::invalid_parameter(name, "must be finite"));
    }
    Ok(())
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value < 0.0 {
        return Err(AnomalyError::invalid_parameter(name, "must be non-negative"));
    }
    Ok(())
}

// ============================================================================
// Health Score Configuration
// ============================================================================

/// Health score configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Severity weight of anomalous channel-steps (default: 0.9).
    pub alpha: f64,
    /// Blend between cumulative duration (1.0) and simultaneity (0.0) (default: 0.5).
    pub beta: f64,
    /// Exponential decay rate over the forecast horizon (default: 0.1).
    pub gamma: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            alpha: 0.9,
            beta: 0.5,
            gamma: 0.1,
        }
    }
}

impl HealthConfig {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    pub fn validate(&self) -> Result<()> {
        require_non_negative("alpha", self.alpha)?;
        require_non_negative("gamma", self.gamma)?;
        require_finite("beta", self.beta)?;
        if !(0.0..=1.0).contains(&self.beta) {
            return Err(AnomalyError::invalid_parameter("beta", "must be in [0, 1]"));
        }
        Ok(())
    }
}

// ============================================================================
// Rate-of-Change Configuration
// ============================================================================

/// Rate-of-change detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateOfChangeConfig {
    /// Widening applied to the min/max bound of the combined series (default: 1.0).
    pub margin: f64,
    /// Minimum latest absolute change for a flag (default: 1.0).
    pub rate_threshold: f64,
    /// Standard-deviation multiplier for the per-feature band (default: 2.0).
    pub k: f64,
}

impl Default for RateOfChangeConfig {
    fn default() -> Self {
        Self {
            margin: 1.0,
            rate_threshold: 1.0,
            k: 2.0,
        }
    }
}

impl RateOfChangeConfig {
    pub fn new(margin: f64, rate_threshold: f64, k: f64) -> Self {
        Self {
            margin,
            rate_threshold,
            k,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("margin", self.margin)?;
        require_finite("rate_threshold", self.rate_threshold)?;
        require_non_negative("k", self.k)
    }
}

// ============================================================================
// Alert Configuration
// ============================================================================

/// Health alert thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Health scores below this raise a warning (default: 95.0).
    pub warning_below: f64,
    /// Health scores below this raise a critical alert (default: 80.0).
    pub critical_below: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            warning_below: 95.0,
            critical_below: 80.0,
        }
    }
}

impl AlertConfig {
    pub fn new(warning_below: f64, critical_below: f64) -> Self {
        Self {
            warning_below,
            critical_below,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("warning_below", self.warning_below)?;
        require_finite("critical_below", self.critical_below)?;
        if self.critical_below > self.warning_below {
            return Err(AnomalyError::invalid_parameter(
                "critical_below",
                "must not exceed warning_below",
            ));
        }
        Ok(())
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{AlertConfig, HealthConfig, RateOfChangeConfig};
    pub use anomaly_spi::{
        Alert, AlertSeverity, AnomalyDecision, AnomalyError, AnomalyMask, Decision, DecisionMode,
        EnvelopeInput, FeatureRecord, FeatureVerdict, RateOfChangeReport, Result,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(HealthConfig::default().validate().is_ok());
        assert!(RateOfChangeConfig::default().validate().is_ok());
        assert!(AlertConfig::default().validate().is_ok());
    }

    #[test]
    fn test_beta_outside_unit_interval() {
        for beta in [-0.1, 1.5, f64::NAN] {
            assert!(HealthConfig::new(0.9, beta, 0.1).validate().is_err());
        }
        assert!(HealthConfig::new(0.9, 0.0, 0.1).validate().is_ok());
        assert!(HealthConfig::new(0.9, 1.0, 0.1).validate().is_ok());
    }

    #[test]
    fn test_negative_weights_rejected() {
        let err = HealthConfig::new(-1.0, 0.5, 0.1).validate().unwrap_err();
        assert_eq!(
            err,
            AnomalyError::invalid_parameter("alpha", "must be non-negative")
        );
        assert!(HealthConfig::new(0.9, 0.5, -0.1).validate().is_err());
    }

    #[test]
    fn test_rate_config_allows_negative_margin() {
        assert!(RateOfChangeConfig::new(-0.5, 0.05, 2.0).validate().is_ok());
        assert!(RateOfChangeConfig::new(0.5, 0.05, -2.0).validate().is_err());
        assert!(RateOfChangeConfig::new(0.5, f64::INFINITY, 2.0).validate().is_err());
    }

    #[test]
    fn test_alert_thresholds_ordered() {
        assert!(AlertConfig::new(80.0, 95.0).validate().is_err());
        assert!(AlertConfig::new(90.0, 90.0).validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: HealthConfig = serde_json::from_str(r#"{"gamma": 0.0}"#).unwrap();
        assert_eq!(config.alpha, 0.9);
        assert_eq!(config.beta, 0.5);
        assert_eq!(config.gamma, 0.0);
    }
}
