//! End-to-end tests for the anomaly crate
//!
//! Wires the forecast envelope into detection, health scoring and alerting
//! the way a serving loop would.

use anomaly::{
    alerts_for_window, health_alerts, AlertConfig, EnvelopeDetector, EnvelopeInput, HealthScorer,
};
use forecast::{ForecastConfig, ForecastOutput, ForecastPipeline, RollingForecast};
use ndarray::Array3;

fn flat_sensor(len: usize) -> Array3<f64> {
    Array3::ones((len, 2, 2))
}

fn envelope_input(output: &ForecastOutput) -> EnvelopeInput {
    EnvelopeInput::new(
        output.forecast.clone(),
        output.lower.clone(),
        output.upper.clone(),
    )
}

#[test]
fn e2e_spike_in_first_forecast_step() {
    let pipeline = ForecastPipeline::new(ForecastConfig::new(5, 3, 2, 2)).unwrap();
    let mut data = flat_sensor(8);
    data[[5, 0, 0]] = 100.0;

    let output = pipeline.forward(data.view()).unwrap();
    let mask = EnvelopeDetector::new().detect(&envelope_input(&output)).unwrap();
    assert_eq!(mask.to_rows(), vec![vec![1, 0], vec![0, 0], vec![0, 0]]);

    let health = HealthScorer::default().score(&mask);
    assert_eq!(health[0], 100.0);
    assert!((health[1] - 99.55).abs() < 1e-12);
    assert!((health[2] - (100.0 - 0.45 * (-0.1f64).exp())).abs() < 1e-12);

    // one early anomaly does not cross the default warning level
    assert!(health_alerts(health.view(), &AlertConfig::default()).is_empty());
}

#[test]
fn e2e_flat_sensor_stays_healthy() {
    let pipeline = ForecastPipeline::new(ForecastConfig::new(5, 3, 2, 2)).unwrap();
    let data = flat_sensor(8);

    let output = pipeline.forward(data.view()).unwrap();
    let mask = EnvelopeDetector::new().detect(&envelope_input(&output)).unwrap();
    assert_eq!(mask.anomaly_count(), 0);

    let health = HealthScorer::default().score(&mask);
    assert!(health.iter().all(|&h| h == 100.0));
}

#[test]
fn e2e_rolling_stream_with_sustained_fault() {
    let pipeline = ForecastPipeline::new(ForecastConfig::new(5, 3, 2, 2)).unwrap();
    let mut data = flat_sensor(20);
    // channel 1 jumps and stays high from step 11 on
    for t in 11..20 {
        data[[t, 1, 0]] = 50.0;
        data[[t, 1, 1]] = 50.0;
    }

    let detector = EnvelopeDetector::new();
    let scorer = HealthScorer::default();
    let config = AlertConfig::new(99.9, 80.0);

    let mut flagged_offsets = Vec::new();
    let mut alerts = Vec::new();
    for window in RollingForecast::new(&pipeline, data.view()).unwrap() {
        let window = window.unwrap();
        let mask = detector.detect(&envelope_input(&window.output)).unwrap();
        if mask.anomaly_count() > 0 {
            flagged_offsets.push(window.offset);
        }
        let health = scorer.score(&mask);
        alerts.extend(alerts_for_window(window.offset + 5, health.view(), &config));
    }

    // windows start at 0, 3, 6, 9, 12; forecast rows of offset 6 are 11..14
    assert_eq!(flagged_offsets, vec![6]);
    assert!(!alerts.is_empty());
    assert!(alerts.iter().all(|a| a.step >= 11));
}
