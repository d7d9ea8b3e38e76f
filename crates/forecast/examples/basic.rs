//! Basic example demonstrating the envelope forecast
//!
//! Run with: cargo run --example basic -p forecast

use forecast::{ForecastConfig, ForecastPipeline, RollingForecast};
use ndarray::Array3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== forecast Basic Examples ===\n");

    // Three sensor axes, four redundant readings each; reading 3 drops out
    // (zero) every fifth step.
    let (history, horizon, channels, sub_channels) = (16, 8, 3, 4);
    let data = Array3::from_shape_fn((48, channels, sub_channels), |(t, c, v)| {
        if v == 3 && t % 5 == 0 {
            0.0
        } else {
            10.0 * (c + 1) as f64 + (t as f64 * 0.4).sin() + 0.05 * v as f64
        }
    });

    let config = ForecastConfig::new(history, horizon, channels, sub_channels).with_width(2.0);
    let pipeline = ForecastPipeline::new(config)?;

    // 1. Single forward pass
    println!("1. Forward pass (T={}, T'={})", history, horizon);
    let window = data.slice(ndarray::s![..history + horizon, .., ..]);
    let output = pipeline.forward(window)?;
    for step in output.steps() {
        println!(
            "   step {}: forecast={:?} lower={:?} upper={:?}",
            step.index,
            round(&step.forecast),
            round(&step.lower),
            round(&step.upper)
        );
    }

    // 2. Rolling forecast over the whole series
    println!("\n2. Rolling forecast over {} steps", data.shape()[0]);
    let rolling = RollingForecast::new(&pipeline, data.view())?;
    println!("   windows: {}", rolling.window_count());
    for window in rolling {
        let window = window?;
        println!(
            "   offset {:>2}: first forecast row {:?}",
            window.offset,
            round(&window.output.forecast.row(0).to_vec())
        );
    }

    println!("\n=== Examples Complete ===");
    Ok(())
}

fn round(values: &[f64]) -> Vec<String> {
    values.iter().map(|v| format!("{:.2}", v)).collect()
}
