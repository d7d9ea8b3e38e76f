//! Tabular rate-of-change models.

use serde::{Deserialize, Serialize};

/// Number of feature columns a record carries.
pub const FEATURE_COUNT: usize = 3;

/// One row of the tabular input, in time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Free-form row label, typically a date.
    #[serde(default, alias = "date")]
    pub label: Option<String>,
    pub feature_1: f64,
    pub feature_2: f64,
    pub feature_3: f64,
}

impl FeatureRecord {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        let [feature_1, feature_2, feature_3] = values;
        Self {
            label: None,
            feature_1,
            feature_2,
            feature_3,
        }
    }

    pub fn labeled(label: impl Into<String>, values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(values)
        }
    }

    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [self.feature_1, self.feature_2, self.feature_3]
    }
}

/// Band, latest rate and verdict for one feature (or the combined series).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVerdict {
    pub upper: f64,
    pub lower: f64,
    pub rate_of_change: f64,
    pub anomaly_detected: bool,
}

/// Result of a rate-of-change check over a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateOfChangeReport {
    /// One verdict per feature column, in column order.
    pub features: [FeatureVerdict; FEATURE_COUNT],
    /// Verdict on the Euclidean norm of the three deltas.
    pub combined: FeatureVerdict,
}

impl RateOfChangeReport {
    /// Per-feature flags followed by the combined flag.
    pub fn flags(&self) -> Vec<bool> {
        self.features
            .iter()
            .chain(std::iter::once(&self.combined))
            .map(|verdict| verdict.anomaly_detected)
            .collect()
    }

    pub fn any_anomaly(&self) -> bool {
        self.flags().into_iter().any(|flag| flag)
    }
}
