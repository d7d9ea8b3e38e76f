//! Tagged anomaly decision.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::anomaly_mask::AnomalyMask;
use super::rate_of_change::RateOfChangeReport;

/// Which detection policy produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionMode {
    /// Range check on aggregated tensor cells.
    Envelope,
    /// Range-and-rate check on tabular records.
    RateOfChange,
}

/// Outcome of an anomaly decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    Envelope(AnomalyMask),
    RateOfChange(RateOfChangeReport),
}

impl Decision {
    pub fn mode(&self) -> DecisionMode {
        match self {
            Decision::Envelope(_) => DecisionMode::Envelope,
            Decision::RateOfChange(_) => DecisionMode::RateOfChange,
        }
    }

    /// Boolean flags shared by every policy.
    pub fn flags(&self) -> Vec<bool> {
        match self {
            Decision::Envelope(mask) => mask.flags(),
            Decision::RateOfChange(report) => report.flags(),
        }
    }

    pub fn is_anomalous(&self) -> bool {
        self.flags().into_iter().any(|flag| flag)
    }

    pub fn as_mask(&self) -> Option<&AnomalyMask> {
        match self {
            Decision::Envelope(mask) => Some(mask),
            Decision::RateOfChange(_) => None,
        }
    }

    pub fn as_report(&self) -> Option<&RateOfChangeReport> {
        match self {
            Decision::Envelope(_) => None,
            Decision::RateOfChange(report) => Some(report),
        }
    }
}

/// Three aligned (T', C) matrices consumed by the envelope policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeInput {
    pub value: Array2<f64>,
    pub lower: Array2<f64>,
    pub upper: Array2<f64>,
}

impl EnvelopeInput {
    pub fn new(value: Array2<f64>, lower: Array2<f64>, upper: Array2<f64>) -> Self {
        Self {
            value,
            lower,
            upper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_envelope_decision_flags() {
        let mask = AnomalyMask::try_from_matrix(array![[0, 1], [0, 0]]).unwrap();
        let decision = Decision::Envelope(mask);

        assert_eq!(decision.mode(), DecisionMode::Envelope);
        assert_eq!(decision.flags(), vec![false, true, false, false]);
        assert!(decision.is_anomalous());
        assert!(decision.as_mask().is_some());
        assert!(decision.as_report().is_none());
    }

    #[test]
    fn test_clear_decision_is_not_anomalous() {
        let decision = Decision::Envelope(AnomalyMask::clear(3, 2));
        assert!(!decision.is_anomalous());
    }
}
