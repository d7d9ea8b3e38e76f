//! End-to-end tests for the forecast stack
//!
//! Drives complete forward and rolling workflows using only the facade API.

use forecast_facade::{ForecastConfig, ForecastPipeline, RollingForecast};
use ndarray::{s, Array3};

fn drifting_sensor(len: usize) -> Array3<f64> {
    Array3::from_shape_fn((len, 3, 4), |(t, c, v)| {
        let base = 20.0 + 5.0 * c as f64;
        let reading = base + (t as f64 * 0.3).sin() + 0.1 * v as f64;
        // sub-channel 3 drops out every fourth step
        if v == 3 && t % 4 == 0 {
            0.0
        } else {
            reading
        }
    })
}

#[test]
fn e2e_forward_then_step_by_step_emission() {
    let pipeline = ForecastPipeline::new(ForecastConfig::new(16, 8, 3, 4)).unwrap();
    let data = drifting_sensor(24);

    let output = pipeline.forward(data.view()).unwrap();
    let steps: Vec<_> = output.steps().collect();

    assert_eq!(steps.len(), 8);
    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step.index, i);
        assert_eq!(step.forecast.len(), 3);
        assert_eq!(step.lower.len(), 3);
        assert_eq!(step.upper.len(), 3);
    }
}

#[test]
fn e2e_rolling_forecast_covers_series() {
    let pipeline = ForecastPipeline::new(ForecastConfig::new(5, 3, 3, 4)).unwrap();
    let data = drifting_sensor(30);

    let rolling = RollingForecast::new(&pipeline, data.view()).unwrap();
    let history = rolling.initial_history().unwrap();
    assert_eq!(history.dim(), (5, 3));

    let windows: Vec<_> = rolling.collect::<Result<_, _>>().unwrap();
    assert_eq!(windows.len(), 8);

    // every window's forecast equals the aggregated tail of its own slice
    for window in &windows {
        let tail = data.slice(s![window.offset + 5..window.offset + 8, .., ..]);
        let expected = forecast_facade::weighted_sum(tail);
        assert_eq!(window.output.forecast, expected);
    }
}

#[test]
fn e2e_wider_band_contains_narrow_band() {
    let data = drifting_sensor(24);
    let narrow = ForecastPipeline::new(ForecastConfig::new(16, 8, 3, 4).with_width(0.5))
        .unwrap()
        .forward(data.view())
        .unwrap();
    let wide = ForecastPipeline::new(ForecastConfig::new(16, 8, 3, 4).with_width(2.0))
        .unwrap()
        .forward(data.view())
        .unwrap();

    for ((wl, nl), (wu, nu)) in wide
        .lower
        .iter()
        .zip(narrow.lower.iter())
        .zip(wide.upper.iter().zip(narrow.upper.iter()))
    {
        assert!(wl <= nl);
        assert!(wu >= nu);
    }
}

#[test]
fn e2e_output_serializes() {
    let pipeline = ForecastPipeline::new(ForecastConfig::new(5, 3, 3, 4)).unwrap();
    let output = pipeline.forward(drifting_sensor(8).view()).unwrap();

    let step = output.step(0).unwrap();
    let json = serde_json::to_value(&step).unwrap();
    assert_eq!(json["index"], 0);
    assert_eq!(json["forecast"].as_array().unwrap().len(), 3);
}
