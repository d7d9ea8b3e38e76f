//! Anomaly detector implementations.

use anomaly_api::RateOfChangeConfig;
use anomaly_spi::{
    AnomalyDecision, AnomalyError, AnomalyMask, Decision, DecisionMode, EnvelopeInput,
    FeatureRecord, FeatureVerdict, RateOfChangeReport, Result, FEATURE_COUNT,
};
use ndarray::{Array2, ArrayView2, Axis, Zip};

// ============================================================================
// Envelope Detector
// ============================================================================

fn check_aligned(name: &str, expected: (usize, usize), actual: (usize, usize)) -> Result<()> {
    if expected != actual {
        return Err(AnomalyError::ShapeMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Flag every (step, channel) cell whose value lies strictly outside
/// `[lower, upper]`. Values equal to either bound are not flagged.
pub fn detect_anomalies(
    value: ArrayView2<'_, f64>,
    lower: ArrayView2<'_, f64>,
    upper: ArrayView2<'_, f64>,
) -> Result<AnomalyMask> {
    check_aligned("lower", value.dim(), lower.dim())?;
    check_aligned("upper", value.dim(), upper.dim())?;

    let flags = Zip::from(&value)
        .and(&lower)
        .and(&upper)
        .map_collect(|&v, &l, &u| v < l || v > u);
    Ok(AnomalyMask::from_flags(&flags))
}

/// Range detector over aggregated forecast cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeDetector;

impl EnvelopeDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect out-of-envelope cells.
    pub fn detect(&self, input: &EnvelopeInput) -> Result<AnomalyMask> {
        let mask = detect_anomalies(input.value.view(), input.lower.view(), input.upper.view())?;
        tracing::debug!(
            horizon = mask.horizon(),
            channels = mask.channels(),
            anomalies = mask.anomaly_count(),
            "envelope detection"
        );
        Ok(mask)
    }
}

impl AnomalyDecision for EnvelopeDetector {
    type Input = EnvelopeInput;

    fn mode(&self) -> DecisionMode {
        DecisionMode::Envelope
    }

    fn decide(&self, input: &EnvelopeInput) -> Result<Decision> {
        self.detect(input).map(Decision::Envelope)
    }
}

// ============================================================================
// Rate-of-Change Detector
// ============================================================================

/// Range-and-rate detector over tabular records.
///
/// A feature is flagged only when its latest value lies outside the
/// whole-table mean ± k·std band (sample standard deviation) AND its latest
/// absolute change exceeds the rate threshold.
#[derive(Debug, Clone)]
pub struct RateOfChangeDetector {
    config: RateOfChangeConfig,
}

impl RateOfChangeDetector {
    /// Create a new detector, validating the configuration.
    pub fn new(config: RateOfChangeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RateOfChangeConfig {
        &self.config
    }

    /// Check the latest record of the table.
    pub fn detect(&self, records: &[FeatureRecord]) -> Result<RateOfChangeReport> {
        let n = records.len();
        if n < 2 {
            return Err(AnomalyError::InsufficientData {
                required: 2,
                got: n,
            });
        }

        let table = Array2::from_shape_fn((n, FEATURE_COUNT), |(i, j)| records[i].values()[j]);
        let mean = table
            .mean_axis(Axis(0))
            .ok_or(AnomalyError::InsufficientData { required: 2, got: n })?;
        let std = table.std_axis(Axis(0), 1.0);
        let last = table.row(n - 1);
        let previous = table.row(n - 2);

        let RateOfChangeConfig {
            margin,
            rate_threshold,
            k,
        } = self.config;

        let features: [FeatureVerdict; FEATURE_COUNT] = std::array::from_fn(|j| {
            let upper = mean[j] + k * std[j];
            let lower = mean[j] - k * std[j];
            let rate_of_change = (last[j] - previous[j]).abs();
            let outside = last[j] > upper || last[j] < lower;
            FeatureVerdict {
                upper,
                lower,
                rate_of_change,
                anomaly_detected: outside && rate_of_change > rate_threshold,
            }
        });

        // Euclidean norm of the per-row deltas, rows 1..n
        let combined: Vec<f64> = table
            .axis_windows(Axis(0), 2)
            .into_iter()
            .map(|pair| {
                let delta = &pair.row(1) - &pair.row(0);
                delta.mapv(|d| d * d).sum().sqrt()
            })
            .collect();
        let max = combined.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = combined.iter().copied().fold(f64::INFINITY, f64::min);
        let latest = combined[combined.len() - 1];
        let upper = max + margin;
        let lower = min - margin;
        let combined = FeatureVerdict {
            upper,
            lower,
            rate_of_change: latest,
            anomaly_detected: latest > rate_threshold && (latest > upper || latest < lower),
        };

        let report = RateOfChangeReport { features, combined };
        tracing::debug!(
            records = n,
            flags = ?report.flags(),
            "rate-of-change detection"
        );
        Ok(report)
    }
}

impl Default for RateOfChangeDetector {
    fn default() -> Self {
        Self {
            config: RateOfChangeConfig::default(),
        }
    }
}

impl AnomalyDecision for RateOfChangeDetector {
    type Input = [FeatureRecord];

    fn mode(&self) -> DecisionMode {
        DecisionMode::RateOfChange
    }

    fn decide(&self, input: &[FeatureRecord]) -> Result<Decision> {
        self.detect(input).map(Decision::RateOfChange)
    }
}
