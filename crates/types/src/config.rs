//! Configuration types for the indicator pipeline.
//!
//! Every period and threshold the engine uses lives here so a run can be
//! tuned from a JSON file without touching code. `Default` reproduces the
//! standard parameterization (RSI 14, EMA 21, MACD 12/26/9, Bollinger 20/2,
//! Stochastic 14/3, volume 10/20/50, trend 20/50/200).

use crate::indicators::IndicatorKind;
use serde::{Deserialize, Serialize};

// =============================================================================
// Indicator Configuration
// =============================================================================

/// Parameters for every indicator family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Families to compute, in report order.
    pub enabled: Vec<IndicatorKind>,

    pub rsi_period: usize,
    /// RSI at or above this is overbought.
    pub rsi_upper: f64,
    /// RSI at or below this is oversold.
    pub rsi_lower: f64,

    pub ema_period: usize,

    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,

    pub bollinger_period: usize,
    /// Band width in standard deviations.
    pub bollinger_k: f64,

    pub stochastic_k: usize,
    pub stochastic_d: usize,
    pub stochastic_upper: f64,
    pub stochastic_lower: f64,

    /// Short/mid/long volume averages; the mid one is the ratio baseline.
    pub volume_windows: [usize; 3],
    /// Short/mid/long price SMAs for the trend verdict.
    pub trend_windows: [usize; 3],

    pub levels: LevelConfig,

    /// Compute indicators on the calling thread even when the `parallel`
    /// feature is enabled.
    pub force_sequential: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            enabled: IndicatorKind::ALL.to_vec(),
            rsi_period: 14,
            rsi_upper: 70.0,
            rsi_lower: 30.0,
            ema_period: 21,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_k: 2.0,
            stochastic_k: 14,
            stochastic_d: 3,
            stochastic_upper: 80.0,
            stochastic_lower: 20.0,
            volume_windows: [10, 20, 50],
            trend_windows: [20, 50, 200],
            levels: LevelConfig::default(),
            force_sequential: false,
        }
    }
}

impl IndicatorConfig {
    /// Restrict the run to the given families.
    pub fn with_enabled(mut self, kinds: &[IndicatorKind]) -> Self {
        self.enabled = kinds.to_vec();
        self
    }
}

// =============================================================================
// Support / Resistance Configuration
// =============================================================================

/// Parameters for support/resistance detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Number of trailing observations inspected.
    pub lookback: usize,
    /// Width of the centered extrema window.
    pub extrema_window: usize,
    /// Maximum levels returned per side.
    pub max_levels: usize,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            lookback: 50,
            extrema_window: 5,
            max_levels: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: IndicatorConfig = serde_json::from_str(r#"{"rsi_period": 7}"#).unwrap();
        assert_eq!(cfg.rsi_period, 7);
        assert_eq!(cfg.ema_period, 21);
        assert_eq!(cfg.levels, LevelConfig::default());
        assert_eq!(cfg.enabled.len(), IndicatorKind::ALL.len());
    }

    #[test]
    fn test_enabled_kinds_parse_snake_case() {
        let cfg: IndicatorConfig =
            serde_json::from_str(r#"{"enabled": ["rsi", "macd"]}"#).unwrap();
        assert_eq!(cfg.enabled, vec![IndicatorKind::Rsi, IndicatorKind::Macd]);
    }
}
