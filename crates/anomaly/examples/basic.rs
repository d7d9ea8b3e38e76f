//! Basic example demonstrating anomaly detection
//!
//! Run with: cargo run --example basic -p anomaly

use anomaly::{
    health_alerts, threshold_alert, AlertConfig, EnvelopeDetector, EnvelopeInput, FeatureRecord,
    HealthScorer, RateOfChangeConfig, RateOfChangeDetector,
};
use ndarray::array;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== anomaly Basic Examples ===\n");

    // 1. Envelope detection over a (T'=4, C=2) forecast
    println!("1. Envelope detector");
    let value = array![[1.0, 2.0], [1.2, 9.0], [0.2, 2.1], [1.1, 8.5]];
    let lower = array![[0.5, 1.5], [0.5, 1.5], [0.5, 1.5], [0.5, 1.5]];
    let upper = array![[1.5, 2.5], [1.5, 2.5], [1.5, 2.5], [1.5, 2.5]];
    let mask = EnvelopeDetector::new().detect(&EnvelopeInput::new(value.clone(), lower, upper))?;
    println!("   Mask: {:?}", mask.to_rows());
    println!("   Anomalies at (step, channel): {:?}\n", mask.anomaly_indices());

    // 2. Health score and alerts
    println!("2. Health score (alpha=0.9, beta=0.5, gamma=0.1)");
    let health = HealthScorer::default().score(&mask);
    println!(
        "   Scores: {:?}",
        health.iter().map(|s| format!("{:.2}", s)).collect::<Vec<_>>()
    );
    let config = AlertConfig::new(99.0, 95.0);
    for alert in health_alerts(health.view(), &config) {
        println!("   [{:?}] {}", alert.severity, alert.message);
    }
    for (step, row) in value.outer_iter().enumerate() {
        if let Some(alert) = threshold_alert(step, row, 1.5, 10.0) {
            println!("   step {}: {}", step, alert.message);
        }
    }

    // 3. Rate-of-change detector
    println!("\n3. Rate-of-change detector (k=1.5, rate_threshold=0.05, margin=0.5)");
    let records = vec![
        FeatureRecord::labeled("2023-01-01", [10.0, 5.0, 3.0]),
        FeatureRecord::labeled("2023-01-02", [12.0, 6.0, 4.0]),
        FeatureRecord::labeled("2023-01-03", [15.0, 7.0, 5.0]),
        FeatureRecord::labeled("2023-01-04", [16.0, 8.0, 6.0]),
        FeatureRecord::labeled("2023-01-05", [18.0, 9.0, 7.0]),
        FeatureRecord::labeled("2023-01-06", [100.0, 10.0, 8.0]),
    ];
    let detector = RateOfChangeDetector::new(RateOfChangeConfig::new(0.5, 0.05, 1.5))?;
    let report = detector.detect(&records)?;
    for (i, verdict) in report.features.iter().enumerate() {
        println!(
            "   feature_{}: band=[{:.2}, {:.2}] rate={:.2} anomaly={}",
            i + 1,
            verdict.lower,
            verdict.upper,
            verdict.rate_of_change,
            verdict.anomaly_detected
        );
    }
    println!(
        "   combined: rate={:.2} anomaly={}",
        report.combined.rate_of_change, report.combined.anomaly_detected
    );

    println!("\n=== Examples Complete ===");
    Ok(())
}
