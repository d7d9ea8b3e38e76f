//! # sensor-health
//!
//! Command-line interface for the envelope forecast and anomaly engine.
//! Reports go to stdout as JSON; logs go to stderr.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anomaly::{
    alerts_for_window, health_alerts, Alert, AlertConfig, AnomalyMask, EnvelopeDetector,
    EnvelopeInput, FeatureRecord, HealthConfig, HealthScorer, RateOfChangeConfig,
    RateOfChangeDetector, RateOfChangeReport,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use forecast::{
    observation, ForecastConfig, ForecastOutput, ForecastPipeline, ForecastStep, RollingForecast,
};
use ndarray::{Array1, Array3};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "sensor-health")]
#[command(about = "Expected-range forecasting and anomaly scoring for sensor streams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast one (T + T') window and score it
    Forecast(ForecastArgs),

    /// Roll the forecast over a long tensor, one JSON line per forecast step
    Rolling(ForecastArgs),

    /// Check the latest record of a feature table for range-and-rate anomalies
    Rate(RateArgs),
}

#[derive(Args, Debug, Clone)]
struct ForecastArgs {
    /// Observation tensor (JSON, nested as [time][channel][sub-channel])
    #[arg(short, long)]
    input: PathBuf,

    /// Historical horizon T
    #[arg(long)]
    history: Option<usize>,

    /// Forecast horizon T'
    #[arg(long)]
    horizon: Option<usize>,

    /// Standard-deviation multiplier of the envelope
    #[arg(short, long)]
    width: Option<f64>,

    /// Reference window length (defaults to T)
    #[arg(long)]
    reference: Option<usize>,

    /// Engine configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct RateArgs {
    /// Feature records (JSON array of {date, feature_1, feature_2, feature_3})
    #[arg(short, long)]
    input: PathBuf,

    /// Standard-deviation multiplier of the per-feature band
    #[arg(short, long)]
    k: Option<f64>,

    /// Minimum latest absolute change for a flag
    #[arg(long)]
    rate_threshold: Option<f64>,

    /// Widening of the combined min/max bound
    #[arg(long, allow_hyphen_values = true)]
    margin: Option<f64>,

    /// Engine configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Engine configuration file. Every section is optional; explicit flags
/// override file values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct EngineConfig {
    forecast: Option<ForecastConfig>,
    health: HealthConfig,
    alert: AlertConfig,
    rate: RateOfChangeConfig,
}

fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let file = File::open(path)
        .with_context(|| format!("failed to open config {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse config {}", path.display()))
}

/// Merge the file's forecast section with command-line flags. Channel and
/// sub-channel counts default to the tensor's own.
fn resolve_forecast_config(
    args: &ForecastArgs,
    file: Option<ForecastConfig>,
    dim: (usize, usize, usize),
) -> Result<ForecastConfig> {
    let (_, channels, sub_channels) = dim;
    let mut config = match file {
        Some(config) => config,
        None => {
            let (Some(history), Some(horizon)) = (args.history, args.horizon) else {
                bail!("--history and --horizon are required unless the config file has a forecast section");
            };
            ForecastConfig::new(history, horizon, channels, sub_channels)
        }
    };

    if let Some(history) = args.history {
        config.history = history;
    }
    if let Some(horizon) = args.horizon {
        config.horizon = horizon;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(reference) = args.reference {
        config.reference = Some(reference);
    }
    Ok(config)
}

fn resolve_rate_config(args: &RateArgs, mut config: RateOfChangeConfig) -> RateOfChangeConfig {
    if let Some(k) = args.k {
        config.k = k;
    }
    if let Some(rate_threshold) = args.rate_threshold {
        config.rate_threshold = rate_threshold;
    }
    if let Some(margin) = args.margin {
        config.margin = margin;
    }
    config
}

// ============================================================================
// Input / Output
// ============================================================================

fn load_tensor(path: &Path) -> Result<Array3<f64>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open tensor {}", path.display()))?;
    let rows: Vec<Vec<Vec<f64>>> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse tensor {}", path.display()))?;
    observation::from_nested(rows)
        .with_context(|| format!("invalid tensor in {}", path.display()))
}

fn load_records(path: &Path) -> Result<Vec<FeatureRecord>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open records {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse records {}", path.display()))
}

fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    })
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let mut writer = open_output(output)?;
    serde_json::to_writer_pretty(&mut writer, value).context("failed to write JSON")?;
    writeln!(writer)?;
    writer.flush()?;
    if let Some(path) = output {
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(())
}

// ============================================================================
// Scoring
// ============================================================================

/// Detection, health scoring and alert thresholds applied to each forecast.
struct Scoring {
    detector: EnvelopeDetector,
    scorer: HealthScorer,
    alert: AlertConfig,
}

impl Scoring {
    fn new(engine: &EngineConfig) -> Result<Self> {
        engine.alert.validate()?;
        Ok(Self {
            detector: EnvelopeDetector::new(),
            scorer: HealthScorer::new(engine.health.clone())?,
            alert: engine.alert.clone(),
        })
    }

    fn score(&self, output: &ForecastOutput) -> Result<(AnomalyMask, Array1<f64>)> {
        let input = EnvelopeInput::new(
            output.forecast.clone(),
            output.lower.clone(),
            output.upper.clone(),
        );
        let mask = self.detector.detect(&input)?;
        let health = self.scorer.score(&mask);
        Ok((mask, health))
    }
}

/// Output of the `forecast` command.
#[derive(Debug, Serialize)]
struct ForecastReport {
    history_weighted: Vec<Vec<f64>>,
    forecast: Vec<Vec<f64>>,
    lower: Vec<Vec<f64>>,
    upper: Vec<Vec<f64>>,
    anomalies: Vec<Vec<u8>>,
    health: Vec<f64>,
    alerts: Vec<Alert>,
}

fn build_forecast_report(
    data: &Array3<f64>,
    config: ForecastConfig,
    engine: &EngineConfig,
) -> Result<ForecastReport> {
    let pipeline = ForecastPipeline::new(config)?;
    let scoring = Scoring::new(engine)?;

    let history = pipeline.history_weighted(data.view())?;
    let output = pipeline.forward(data.view())?;
    let (mask, health) = scoring.score(&output)?;
    let alerts = health_alerts(health.view(), &scoring.alert);

    Ok(ForecastReport {
        history_weighted: observation::to_rows(&history),
        forecast: observation::to_rows(&output.forecast),
        lower: observation::to_rows(&output.lower),
        upper: observation::to_rows(&output.upper),
        anomalies: mask.to_rows(),
        health: health.to_vec(),
        alerts,
    })
}

/// One line of the `rolling` command.
#[derive(Debug, Serialize)]
struct StepLine {
    /// Window offset in the full tensor
    offset: usize,
    /// Time index of this forecast step in the full tensor
    time: usize,
    #[serde(flatten)]
    step: ForecastStep,
    anomalies: Vec<u8>,
    health: f64,
}

/// Output of the `rolling` command.
#[derive(Debug)]
struct RollingReport {
    initial_history: Vec<Vec<f64>>,
    lines: Vec<StepLine>,
    alerts: Vec<Alert>,
}

fn build_rolling_report(
    data: &Array3<f64>,
    config: ForecastConfig,
    engine: &EngineConfig,
) -> Result<RollingReport> {
    let pipeline = ForecastPipeline::new(config)?;
    let scoring = Scoring::new(engine)?;
    let history = pipeline.config().history;

    let rolling = RollingForecast::new(&pipeline, data.view())?;
    let initial_history = observation::to_rows(&rolling.initial_history()?);
    tracing::info!(windows = rolling.window_count(), "rolling forecast");

    let mut lines = Vec::new();
    let mut alerts = Vec::new();
    for window in rolling {
        let window = window?;
        let (mask, health) = scoring.score(&window.output)?;
        let start = window.offset + history;
        alerts.extend(alerts_for_window(start, health.view(), &scoring.alert));

        for (step, anomalies) in window.output.steps().zip(mask.to_rows()) {
            lines.push(StepLine {
                offset: window.offset,
                time: start + step.index,
                health: health[step.index],
                step,
                anomalies,
            });
        }
    }

    Ok(RollingReport {
        initial_history,
        lines,
        alerts,
    })
}

/// Output of the `rate` command.
#[derive(Debug, Serialize)]
struct RateOutput {
    /// Label of the record that was checked
    label: Option<String>,
    #[serde(flatten)]
    report: RateOfChangeReport,
}

fn build_rate_output(records: &[FeatureRecord], config: RateOfChangeConfig) -> Result<RateOutput> {
    let report = RateOfChangeDetector::new(config)?.detect(records)?;
    Ok(RateOutput {
        label: records.last().and_then(|record| record.label.clone()),
        report,
    })
}

// ============================================================================
// Commands
// ============================================================================

fn run_forecast(args: &ForecastArgs) -> Result<()> {
    let engine = load_engine_config(args.config.as_deref())?;
    let data = load_tensor(&args.input)?;
    tracing::info!(shape = ?data.shape(), input = %args.input.display(), "loaded tensor");

    let config = resolve_forecast_config(args, engine.forecast.clone(), data.dim())?;
    let report = build_forecast_report(&data, config, &engine)?;
    for alert in &report.alerts {
        tracing::warn!(step = alert.step, severity = ?alert.severity, "{}", alert.message);
    }
    write_json(&report, args.output.as_deref())
}

fn run_rolling(args: &ForecastArgs) -> Result<()> {
    let engine = load_engine_config(args.config.as_deref())?;
    let data = load_tensor(&args.input)?;
    tracing::info!(shape = ?data.shape(), input = %args.input.display(), "loaded tensor");

    let config = resolve_forecast_config(args, engine.forecast.clone(), data.dim())?;
    let report = build_rolling_report(&data, config, &engine)?;
    for alert in &report.alerts {
        tracing::warn!(step = alert.step, severity = ?alert.severity, "{}", alert.message);
    }

    let mut writer = open_output(args.output.as_deref())?;
    serde_json::to_writer(
        &mut writer,
        &serde_json::json!({ "history_weighted": report.initial_history }),
    )?;
    writeln!(writer)?;
    for line in &report.lines {
        serde_json::to_writer(&mut writer, line)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn run_rate(args: &RateArgs) -> Result<()> {
    let engine = load_engine_config(args.config.as_deref())?;
    let records = load_records(&args.input)?;
    tracing::info!(records = records.len(), input = %args.input.display(), "loaded records");

    let output = build_rate_output(&records, resolve_rate_config(args, engine.rate))?;
    if output.report.any_anomaly() {
        tracing::warn!(flags = ?output.report.flags(), "rate-of-change anomaly");
    }
    write_json(&output, args.output.as_deref())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "sensor_health=info".into()))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast(args) => run_forecast(&args),
        Commands::Rolling(args) => run_rolling(&args),
        Commands::Rate(args) => run_rate(&args),
    }
}
