//! market-lens - Technical analysis and forecasting CLI
//!
//! Loads one price series, computes every enabled indicator with
//! support/resistance levels and a vote summary, and runs a recursive
//! multi-step forecast. Both pipelines read the same immutable series and
//! run side by side:
//!
//! ```text
//!                  ┌──────────────────┐
//!              ┌──►│ IndicatorEngine  │──► indicators
//! SeriesStore ─┤   └──────────────────┘
//!              │   ┌──────────────────┐
//!              └──►│  ForecastEngine  │──► forecast
//!                  └──────────────────┘
//! ```
//!
//! The report is printed to stdout as JSON; logs go to stderr.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use forecast::{
    ForecastConfig, ForecastEngine, ForecastReport, LinearSequenceModel, MinMaxScaler, PersistenceModel, Scaler,
    SequenceModel, feature_rows,
};
use quant::IndicatorEngine;
use serde::Serialize;
use storage::{ClosePricesSource, CsvSource, SeriesStore, load_from};
use tracing::{error, info};
use types::{IndicatorReport, Series};

pub use config::{AppConfig, InputSource};

/// market-lens - indicators, signals and forecasts for one price series
#[derive(Parser, Debug)]
#[command(name = "market-lens")]
#[command(about = "Technical indicators, signal aggregation and recursive price forecasting")]
#[command(version)]
struct Args {
    /// CSV file with a timestamp/date column and close (open/high/low/volume optional)
    #[arg(long, env = "MARKET_LENS_CSV", conflicts_with = "prices_json")]
    csv: Option<PathBuf>,

    /// JSON array of closes, oldest first (daily timestamps are synthesized)
    #[arg(long, env = "MARKET_LENS_PRICES_JSON")]
    prices_json: Option<String>,

    /// Asset symbol for the report
    #[arg(long, env = "MARKET_LENS_SYMBOL", default_value = "ASSET")]
    symbol: String,

    /// Scaler JSON (fit on the loaded history when omitted)
    #[arg(long, env = "MARKET_LENS_SCALER")]
    scaler: Option<PathBuf>,

    /// Linear sequence model JSON (persistence baseline when omitted)
    #[arg(long, env = "MARKET_LENS_MODEL")]
    model: Option<PathBuf>,

    /// Forecast steps
    #[arg(long, env = "MARKET_LENS_HORIZON")]
    horizon: Option<usize>,

    /// Feature rows in the model window (defaults to the model's own length)
    #[arg(long, env = "MARKET_LENS_SEQUENCE_LENGTH")]
    sequence_length: Option<usize>,

    /// Indicator parameters JSON
    #[arg(long, env = "MARKET_LENS_INDICATORS_CONFIG")]
    indicators_config: Option<PathBuf>,

    /// Run everything on the calling thread
    #[arg(long, env = "MARKET_LENS_SEQUENTIAL")]
    sequential: bool,

    /// Pretty-print the JSON report
    #[arg(long, env = "MARKET_LENS_PRETTY")]
    pretty: bool,
}

/// Forecast half of the report; failures are reported in place.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum ForecastOutcome {
    Ok(ForecastReport),
    Error(String),
}

/// Everything printed for one run.
#[derive(Debug, Serialize)]
struct Report {
    indicators: IndicatorReport,
    forecast: ForecastOutcome,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(args)?;
    info!(
        symbol = %config.symbol,
        parallel = parallel::is_parallel_enabled() && !config.sequential,
        "starting run"
    );

    let report = run(&config)?;

    let json = if config.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("failed to serialize report")?;
    println!("{}", json);

    Ok(())
}

/// Load the series and run both pipelines over the same snapshot.
///
/// Only a series that cannot be loaded fails the run; forecast failures,
/// including model or scaler setup, land in [`ForecastOutcome::Error`].
fn run(config: &AppConfig) -> Result<Report> {
    let store = load_store(config)?;
    let series = store.snapshot();
    info!(
        symbol = %config.symbol,
        observations = series.len(),
        approximated = series.approximated_count(),
        "series loaded"
    );

    let indicator_engine = IndicatorEngine::new(config.indicators.clone());
    let (indicators, forecast) = parallel::join(
        || indicator_engine.analyze(&series),
        || forecast_pipeline(config, &series),
        config.sequential,
    );

    let forecast = match forecast {
        Ok(f) => {
            info!(
                model = %f.model,
                horizon = f.multi_step.len(),
                next_step = f.next_step,
                "forecast ready"
            );
            ForecastOutcome::Ok(f)
        }
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "forecast failed");
            ForecastOutcome::Error(message)
        }
    };

    Ok(Report {
        indicators,
        forecast,
    })
}

/// Resolve the model and scaler, then forecast the configured horizon.
fn forecast_pipeline(config: &AppConfig, series: &Series) -> Result<ForecastReport> {
    let (model, forecast_config) = load_model(config)?;
    let scaler = load_scaler(config, &forecast_config, series)?;
    let report = ForecastEngine::new(model, scaler, forecast_config).run_default(series)?;
    Ok(report)
}

/// Resolve CLI arguments and config files into one run configuration.
fn build_config(args: Args) -> Result<AppConfig> {
    let source = AppConfig::source_from(args.csv, args.prices_json)?;

    let mut config = AppConfig::new(args.symbol, source);
    if let Some(path) = &args.indicators_config {
        config.indicators = config::load_indicator_config(path)?;
    }
    if args.sequential {
        config.indicators.force_sequential = true;
        config.sequential = true;
    }
    config.scaler_path = args.scaler;
    config.model_path = args.model;
    config.pretty = args.pretty;

    Ok(config.with_forecast_overrides(args.horizon, args.sequence_length))
}

fn load_store(config: &AppConfig) -> Result<SeriesStore> {
    let store = match &config.source {
        InputSource::Csv(path) => load_from(&config.symbol, &CsvSource::new(path))
            .with_context(|| format!("failed to load {}", path.display()))?,
        InputSource::ClosePrices(json) => {
            let source = ClosePricesSource::from_json_str(json)
                .context("failed to parse --prices-json")?;
            load_from(&config.symbol, &source).context("failed to load close prices")?
        }
    };
    Ok(store)
}

/// Load the model; a model file's window length applies unless pinned.
fn load_model(config: &AppConfig) -> Result<(Arc<dyn SequenceModel>, ForecastConfig)> {
    let mut forecast = config.forecast;
    match &config.model_path {
        Some(path) => {
            let model = LinearSequenceModel::from_json(path)
                .with_context(|| format!("failed to load model {}", path.display()))?;
            if !config.sequence_length_pinned && forecast.sequence_length != model.sequence_length()
            {
                info!(
                    model = model.name(),
                    sequence_length = model.sequence_length(),
                    "using the model's sequence length"
                );
                forecast.sequence_length = model.sequence_length();
            }
            Ok((Arc::new(model), forecast))
        }
        None => {
            info!("no model given, using the persistence baseline");
            Ok((Arc::new(PersistenceModel), forecast))
        }
    }
}

fn load_scaler(
    config: &AppConfig,
    forecast: &ForecastConfig,
    series: &Series,
) -> Result<Arc<dyn Scaler>> {
    let scaler = match &config.scaler_path {
        Some(path) => MinMaxScaler::from_json(path)
            .with_context(|| format!("failed to load scaler {}", path.display()))?,
        None => {
            let rows = feature_rows(series, forecast.rsi_period, forecast.ema_period);
            info!(rows = rows.len(), "no scaler given, fitting on the loaded history");
            MinMaxScaler::fit(&rows).context("not enough history to fit a scaler")?
        }
    };
    Ok(Arc::new(scaler))
}
