//! Run configuration for the market-lens binary.
//!
//! Resolved once from CLI arguments (with `MARKET_LENS_*` environment
//! fallbacks) and optional JSON files, then handed to the pipelines.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use forecast::ForecastConfig;
use types::IndicatorConfig;

/// Where the price history comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// CSV file with a time column and at least `close`.
    Csv(PathBuf),
    /// Inline JSON array of closes, oldest first.
    ClosePrices(String),
}

/// Master configuration for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────
    pub symbol: String,
    pub source: InputSource,

    // ─────────────────────────────────────────────────────────────────────────
    // Pipelines
    // ─────────────────────────────────────────────────────────────────────────
    pub indicators: IndicatorConfig,
    pub forecast: ForecastConfig,
    /// Scaler JSON; fit on the loaded history when absent.
    pub scaler_path: Option<PathBuf>,
    /// Linear model JSON; the persistence baseline when absent.
    pub model_path: Option<PathBuf>,
    /// `forecast.sequence_length` was set explicitly and must not follow the model.
    pub sequence_length_pinned: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Output
    // ─────────────────────────────────────────────────────────────────────────
    pub sequential: bool,
    pub pretty: bool,
}

impl AppConfig {
    /// Defaults for everything but the input.
    pub fn new(symbol: impl Into<String>, source: InputSource) -> Self {
        Self {
            symbol: symbol.into(),
            source,
            indicators: IndicatorConfig::default(),
            forecast: ForecastConfig::default(),
            scaler_path: None,
            model_path: None,
            sequence_length_pinned: false,
            sequential: false,
            pretty: false,
        }
    }

    /// Pick the input source; exactly one must be given.
    pub fn source_from(csv: Option<PathBuf>, prices_json: Option<String>) -> Result<InputSource> {
        match (csv, prices_json) {
            (Some(path), None) => Ok(InputSource::Csv(path)),
            (None, Some(json)) => Ok(InputSource::ClosePrices(json)),
            (Some(_), Some(_)) => bail!("--csv and --prices-json are mutually exclusive"),
            (None, None) => bail!("no input: pass --csv PATH or --prices-json JSON"),
        }
    }

    /// Apply the horizon and sequence length overrides.
    pub fn with_forecast_overrides(
        mut self,
        horizon: Option<usize>,
        sequence_length: Option<usize>,
    ) -> Self {
        if let Some(h) = horizon {
            self.forecast.horizon = h;
        }
        if let Some(n) = sequence_length {
            self.forecast.sequence_length = n;
            self.sequence_length_pinned = true;
        }
        self
    }
}

/// Load indicator parameters from a JSON file; missing fields keep defaults.
pub fn load_indicator_config(path: &Path) -> Result<IndicatorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read indicator config {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid indicator config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_selection() {
        assert_eq!(
            AppConfig::source_from(Some("a.csv".into()), None).unwrap(),
            InputSource::Csv("a.csv".into())
        );
        assert!(AppConfig::source_from(None, None).is_err());
        assert!(AppConfig::source_from(Some("a.csv".into()), Some("[1]".into())).is_err());
    }

    #[test]
    fn test_indicator_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indicators.json");
        std::fs::write(&path, r#"{"rsi_period": 7, "enabled": ["rsi", "ema"]}"#).unwrap();

        let config = load_indicator_config(&path).unwrap();
        assert_eq!(config.rsi_period, 7);
        assert_eq!(config.enabled.len(), 2);
        assert_eq!(config.ema_period, IndicatorConfig::default().ema_period);

        assert!(load_indicator_config(&dir.path().join("missing.json")).is_err());
    }
}
