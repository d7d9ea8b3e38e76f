//! Integration tests for the anomaly crate

use anomaly::{
    health_alerts, AlertConfig, AlertSeverity, AnomalyDecision, AnomalyError, AnomalyMask,
    Decision, DecisionMode, EnvelopeDetector, EnvelopeInput, FeatureRecord, HealthConfig,
    HealthScorer, RateOfChangeConfig, RateOfChangeDetector,
};
use ndarray::{array, Array2};

fn sensor_table() -> Vec<FeatureRecord> {
    [
        [10.0, 5.0, 3.0],
        [12.0, 6.0, 4.0],
        [15.0, 7.0, 5.0],
        [16.0, 8.0, 6.0],
        [18.0, 9.0, 7.0],
        [20.0, 10.0, 8.0],
    ]
    .into_iter()
    .map(FeatureRecord::new)
    .collect()
}

#[test]
fn test_envelope_mask_shape_matches_inputs() {
    for (horizon, channels) in [(1, 1), (3, 2), (8, 5)] {
        let value = Array2::from_elem((horizon, channels), 1.0);
        let lower = Array2::zeros((horizon, channels));
        let upper = Array2::from_elem((horizon, channels), 2.0);

        let mask = EnvelopeDetector::new()
            .detect(&EnvelopeInput::new(value, lower, upper))
            .unwrap();
        assert_eq!(mask.horizon(), horizon);
        assert_eq!(mask.channels(), channels);
        assert_eq!(mask.anomaly_count(), 0);
    }
}

#[test]
fn test_detection_is_independent_per_cell() {
    let lower = Array2::zeros((2, 3));
    let upper = Array2::from_elem((2, 3), 1.0);
    let base = Array2::from_elem((2, 3), 0.5);
    let detector = EnvelopeDetector::new();

    for step in 0..2 {
        for channel in 0..3 {
            let mut value = base.clone();
            value[[step, channel]] = 5.0;
            let mask = detector
                .detect(&EnvelopeInput::new(value, lower.clone(), upper.clone()))
                .unwrap();
            assert_eq!(mask.anomaly_indices(), vec![(step, channel)]);
        }
    }
}

#[test]
fn test_mismatched_upper_reported_by_name() {
    let input = EnvelopeInput::new(
        Array2::zeros((2, 2)),
        Array2::zeros((2, 2)),
        Array2::zeros((2, 3)),
    );
    match EnvelopeDetector::new().detect(&input) {
        Err(AnomalyError::ShapeMismatch { name, .. }) => assert_eq!(name, "upper"),
        other => panic!("expected shape mismatch, got {:?}", other),
    }
}

#[test]
fn test_health_score_penalizes_duration() {
    let scorer = HealthScorer::new(HealthConfig::new(0.9, 1.0, 0.0)).unwrap();
    let early = AnomalyMask::try_from_matrix(array![[1], [0], [0], [0]]).unwrap();
    let late = AnomalyMask::try_from_matrix(array![[0], [0], [0], [1]]).unwrap();

    let early_score = scorer.score(&early);
    let late_score = scorer.score(&late);

    // a persisting early anomaly drags every later step down
    assert!(early_score[3] < 100.0);
    assert_eq!(late_score[3], 100.0);
}

#[test]
fn test_health_alerts_from_dense_mask() {
    let mask = AnomalyMask::try_from_matrix(Array2::ones((4, 20))).unwrap();
    let score = HealthScorer::default().score(&mask);
    let alerts = health_alerts(score.view(), &AlertConfig::default());

    assert!(!alerts.is_empty());
    assert!(alerts.iter().all(|a| a.step > 0));
    assert!(alerts.iter().any(|a| a.severity == AlertSeverity::Critical));
}

#[test]
fn test_rate_detector_through_decision_trait() {
    let detector = RateOfChangeDetector::new(RateOfChangeConfig::new(0.5, 0.05, 2.0)).unwrap();
    let decision = detector.decide(sensor_table().as_slice()).unwrap();

    assert_eq!(decision.mode(), DecisionMode::RateOfChange);
    assert_eq!(decision.flags().len(), 4);
    assert!(!decision.is_anomalous());
    assert!(decision.as_report().is_some());
}

#[test]
fn test_combined_flag_with_negative_margin() {
    // accelerating deltas: the last combined step is the maximum
    let records: Vec<_> = [0.0, 1.0, 3.0, 7.0]
        .into_iter()
        .map(|x| FeatureRecord::new([x, x, x]))
        .collect();
    let detector = RateOfChangeDetector::new(RateOfChangeConfig::new(-1.0, 0.5, 2.0)).unwrap();
    let report = detector.detect(&records).unwrap();

    assert!(report.combined.anomaly_detected);
    assert!((report.combined.rate_of_change - 4.0 * 3f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_decisions_share_flag_contract() {
    let envelope = EnvelopeDetector::new()
        .decide(&EnvelopeInput::new(
            array![[3.0, 0.0]],
            array![[0.0, 0.0]],
            array![[1.0, 1.0]],
        ))
        .unwrap();
    let rate = RateOfChangeDetector::default()
        .decide(sensor_table().as_slice())
        .unwrap();

    let decisions: Vec<Decision> = vec![envelope, rate];
    let anomalous: Vec<bool> = decisions.iter().map(Decision::is_anomalous).collect();
    assert_eq!(anomalous, vec![true, false]);
}
