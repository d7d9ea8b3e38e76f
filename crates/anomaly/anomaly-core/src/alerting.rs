//! Alerting from health scores and feature sums.

use anomaly_api::AlertConfig;
use anomaly_spi::{Alert, AlertSeverity};
use ndarray::ArrayView1;

use crate::health::HEALTH_BASELINE;

fn severity_for(score: f64) -> AlertSeverity {
    if score.abs() > 5.0 {
        AlertSeverity::Critical
    } else {
        AlertSeverity::Warning
    }
}

/// Create an alert for a degraded health score at `step`.
///
/// The alert score is the penalty below the baseline.
pub fn create_alert(step: usize, health: f64, config: &AlertConfig) -> Alert {
    let severity = if health < config.critical_below {
        AlertSeverity::Critical
    } else {
        AlertSeverity::Warning
    };

    Alert {
        step,
        value: health,
        score: HEALTH_BASELINE - health,
        severity,
        message: format!("Health degraded at step {}: score={:.4}", step, health),
    }
}

/// Alerts for every step whose health falls below the warning threshold.
pub fn health_alerts(scores: ArrayView1<'_, f64>, config: &AlertConfig) -> Vec<Alert> {
    let alerts: Vec<Alert> = scores
        .indexed_iter()
        .filter(|(_, &health)| health < config.warning_below)
        .map(|(step, &health)| create_alert(step, health, config))
        .collect();
    if !alerts.is_empty() {
        tracing::debug!(count = alerts.len(), "health alerts raised");
    }
    alerts
}

/// Check the sum of a feature row against fixed limits.
///
/// Returns `None` when `lower <= sum <= upper`.
pub fn threshold_alert(
    step: usize,
    features: ArrayView1<'_, f64>,
    lower: f64,
    upper: f64,
) -> Option<Alert> {
    let total = features.sum();
    let (excess, message) = if total > upper {
        (total - upper, "ALERT: Score exceeds upper limit")
    } else if total < lower {
        (lower - total, "ALERT: Score below lower limit")
    } else {
        return None;
    };

    Some(AlertBuilder::new(step, total, excess).message(message).build())
}

/// Health alerts for a rolling window whose first forecast step sits at
/// `offset` in the stream.
pub fn alerts_for_window(
    offset: usize,
    scores: ArrayView1<'_, f64>,
    config: &AlertConfig,
) -> Vec<Alert> {
    let mut alerts = health_alerts(scores, config);
    for alert in &mut alerts {
        alert.step += offset;
    }
    alerts
}

/// Alert builder for custom alert creation.
#[derive(Debug, Clone)]
pub struct AlertBuilder {
    step: usize,
    value: f64,
    score: f64,
    severity: Option<AlertSeverity>,
    message: Option<String>,
}

impl AlertBuilder {
    /// Create a new alert builder.
    pub fn new(step: usize, value: f64, score: f64) -> Self {
        Self {
            step,
            value,
            score,
            severity: None,
            message: None,
        }
    }

    /// Set custom severity.
    pub fn severity(mut self, severity: AlertSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set custom message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Build the alert.
    pub fn build(self) -> Alert {
        let severity = self.severity.unwrap_or_else(|| severity_for(self.score));
        let message = self.message.unwrap_or_else(|| {
            format!(
                "Anomaly detected at step {}: value={:.4}, score={:.4}",
                self.step, self.value, self.score
            )
        });

        Alert {
            step: self.step,
            value: self.value,
            score: self.score,
            severity,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_health_alert_severity() {
        let config = AlertConfig::default();
        let scores = array![100.0, 99.0, 90.0, 70.0];

        let alerts = health_alerts(scores.view(), &config);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].step, 2);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
        assert_eq!(alerts[1].step, 3);
        assert_eq!(alerts[1].severity, AlertSeverity::Critical);
        assert!((alerts[1].score - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_healthy_scores_raise_nothing() {
        let scores = array![100.0, 99.55, 99.59];
        assert!(health_alerts(scores.view(), &AlertConfig::default()).is_empty());
    }

    #[test]
    fn test_window_offset_shifts_steps() {
        let scores = array![100.0, 50.0];
        let alerts = alerts_for_window(6, scores.view(), &AlertConfig::default());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].step, 7);
    }

    #[test]
    fn test_threshold_alert_upper() {
        let alert = threshold_alert(0, array![40.0, 40.0, 40.0].view(), 50.0, 100.0).unwrap();
        assert_eq!(alert.message, "ALERT: Score exceeds upper limit");
        assert_eq!(alert.value, 120.0);
        assert_eq!(alert.severity, AlertSeverity::Critical);
    }

    #[test]
    fn test_threshold_alert_lower() {
        let alert = threshold_alert(3, array![10.0, 5.0, 3.0].view(), 20.0, 100.0).unwrap();
        assert_eq!(alert.message, "ALERT: Score below lower limit");
        assert_eq!(alert.step, 3);
        assert_eq!(alert.value, 18.0);
        assert_eq!(alert.score, 2.0);
        assert_eq!(alert.severity, AlertSeverity::Warning);
    }

    #[test]
    fn test_threshold_alert_within_limits() {
        assert!(threshold_alert(0, array![20.0, 10.0, 8.0].view(), 20.0, 100.0).is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let alert = AlertBuilder::new(1, 2.0, 1.0)
            .severity(AlertSeverity::Critical)
            .message("custom")
            .build();
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.message, "custom");
    }
}
