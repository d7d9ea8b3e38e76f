//! Health scoring from an anomaly mask.

use anomaly_api::HealthConfig;
use anomaly_spi::{AnomalyMask, Result};
use ndarray::Array1;

/// Score of a horizon without anomalies.
pub const HEALTH_BASELINE: f64 = 100.0;

/// Compute the per-step health score of a mask.
///
/// Step 0 is always the baseline. For `t >= 1` the penalty blends the
/// anomaly count of all earlier steps (`beta`) with the count at step `t`
/// (`1 - beta`), scaled by `alpha` and decayed by `exp(-gamma * (t - 1))`.
/// Scores are not clamped.
pub fn compute_health_score(mask: &AnomalyMask, alpha: f64, beta: f64, gamma: f64) -> Array1<f64> {
    let counts = mask.step_counts();
    let mut score = Array1::from_elem(counts.len(), HEALTH_BASELINE);
    let mut duration = 0.0;

    for t in 1..counts.len() {
        duration += counts[t - 1] as f64;
        let simultaneous = counts[t] as f64;
        let decay = (-gamma * (t - 1) as f64).exp();
        score[t] = HEALTH_BASELINE - alpha * (beta * duration + (1.0 - beta) * simultaneous) * decay;
        tracing::trace!(step = t, duration, simultaneous, score = score[t], "health step");
    }

    score
}

/// Health scorer with validated weights.
#[derive(Debug, Clone)]
pub struct HealthScorer {
    config: HealthConfig,
}

impl HealthScorer {
    pub fn new(config: HealthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    pub fn score(&self, mask: &AnomalyMask) -> Array1<f64> {
        let HealthConfig { alpha, beta, gamma } = self.config;
        let score = compute_health_score(mask, alpha, beta, gamma);
        tracing::debug!(
            horizon = score.len(),
            min = score.iter().copied().fold(HEALTH_BASELINE, f64::min),
            "health score"
        );
        score
    }
}

impl Default for HealthScorer {
    fn default() -> Self {
        Self {
            config: HealthConfig::default(),
        }
    }
}
