//! Technical indicator types.
//!
//! This module defines the indicator families, the closed signal vocabulary,
//! per-family output values, and the report shape produced by the indicator
//! pipeline.

use std::collections::BTreeMap;
use std::fmt;

use crate::Symbol;
use crate::Timestamp;
use crate::error::IndicatorError;
use serde::{Deserialize, Serialize};

// =============================================================================
// Indicator Kind
// =============================================================================

/// Indicator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    /// Relative Strength Index.
    Rsi,
    /// Exponential Moving Average vs price.
    Ema,
    /// Moving Average Convergence Divergence.
    Macd,
    /// Bollinger Bands.
    Bollinger,
    /// Stochastic Oscillator.
    Stochastic,
    /// On-Balance Volume.
    Obv,
    /// Volume ratio and volume-average trend.
    Volume,
    /// Price vs 20/50/200 simple moving averages.
    Trend,
}

impl IndicatorKind {
    /// Every family, in report order.
    pub const ALL: [Self; 8] = [
        Self::Rsi,
        Self::Ema,
        Self::Macd,
        Self::Bollinger,
        Self::Stochastic,
        Self::Obv,
        Self::Volume,
        Self::Trend,
    ];

    /// Stable lowercase name used as the report key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rsi => "rsi",
            Self::Ema => "ema",
            Self::Macd => "macd",
            Self::Bollinger => "bollinger",
            Self::Stochastic => "stochastic",
            Self::Obv => "obv",
            Self::Volume => "volume",
            Self::Trend => "trend",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Signal
// =============================================================================

/// Closed set of per-indicator signals.
///
/// Oscillators (RSI, Stochastic, Bollinger) label a high reading
/// `Overbought` and a low reading `Oversold`, uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Overbought,
    Oversold,
    NearOverbought,
    NearOversold,
    Neutral,
    Bullish,
    Bearish,
    /// Bullish crossover.
    Buy,
    /// Bearish crossover.
    Sell,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Overbought => "OVERBOUGHT",
            Self::Oversold => "OVERSOLD",
            Self::NearOverbought => "NEAR_OVERBOUGHT",
            Self::NearOversold => "NEAR_OVERSOLD",
            Self::Neutral => "NEUTRAL",
            Self::Bullish => "BULLISH",
            Self::Bearish => "BEARISH",
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        };
        f.write_str(s)
    }
}

// =============================================================================
// MACD Output
// =============================================================================

/// MACD output values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA).
    pub macd_line: f64,
    /// Signal line (EMA of MACD line).
    pub signal_line: f64,
    /// Histogram (MACD - Signal).
    pub histogram: f64,
}

/// Trailing values of the three MACD lines (oldest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MacdHistory {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

// =============================================================================
// Bollinger Bands Output
// =============================================================================

/// Bollinger Bands output values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BollingerOutput {
    /// Upper band.
    pub upper: f64,
    /// Middle band (SMA).
    pub middle: f64,
    /// Lower band.
    pub lower: f64,
    /// Band width as percentage of middle.
    pub bandwidth: f64,
    /// %B: where price is relative to bands (0 = lower, 1 = upper).
    pub percent_b: f64,
    /// Price the position was measured at.
    pub price: f64,
}

// =============================================================================
// Stochastic Output
// =============================================================================

/// Stochastic oscillator lines, both on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct StochasticOutput {
    /// %K: close relative to the recent high/low range.
    pub k: f64,
    /// %D: SMA of %K.
    pub d: f64,
}

// =============================================================================
// Volume Output
// =============================================================================

/// Current volume relative to its 20-period mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeLevel {
    /// Above 200% of the mean.
    VeryHigh,
    /// 150-200% of the mean.
    High,
    Normal,
    /// Below 50% of the mean.
    Low,
}

/// Ordering of the short/mid/long volume averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeTrend {
    Increasing,
    Decreasing,
    Flat,
}

/// Volume ratio and trend values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeOutput {
    pub current: f64,
    pub sma_short: f64,
    pub sma_mid: f64,
    pub sma_long: f64,
    /// current / sma_mid (1.0 when the mean is zero).
    pub ratio: f64,
    pub level: VolumeLevel,
    pub trend: VolumeTrend,
}

// =============================================================================
// Trend Output
// =============================================================================

/// Price position against the 20/50/200 simple moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendOutput {
    pub sma_short: f64,
    pub sma_mid: f64,
    pub sma_long: f64,
    /// Verdict from price vs SMA200 and SMA50 vs SMA200.
    pub long_term: Signal,
    /// Verdict from price vs SMA20 and SMA20 vs SMA50.
    pub short_term: Signal,
}

// =============================================================================
// Indicator Output
// =============================================================================

/// Family-specific indicator values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndicatorValues {
    Rsi {
        value: f64,
        period: usize,
    },
    Ema {
        price: f64,
        ema: f64,
        period: usize,
    },
    Macd {
        #[serde(flatten)]
        output: MacdOutput,
        history: MacdHistory,
    },
    Bollinger(BollingerOutput),
    Stochastic(StochasticOutput),
    Obv {
        obv: f64,
        /// current volume / 20-period mean volume.
        volume_ratio: f64,
    },
    Volume(VolumeOutput),
    Trend(TrendOutput),
}

/// A successfully computed indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorOutput {
    pub kind: IndicatorKind,
    /// Display name including parameters (e.g. "EMA_21").
    pub name: String,
    pub values: IndicatorValues,
    pub signal: Signal,
    /// Human-readable interpretation of the signal.
    pub message: String,
    /// Up to [`crate::HISTORY_LEN`] trailing primary values, oldest first.
    pub history: Vec<f64>,
}

/// Outcome of one indicator computation.
pub type IndicatorResult = Result<IndicatorOutput, IndicatorError>;

// =============================================================================
// Support / Resistance
// =============================================================================

/// Support and resistance levels from recent local extrema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LevelSet {
    /// Distinct local-peak highs, highest first.
    pub resistance: Vec<f64>,
    /// Distinct local-trough lows, lowest first.
    pub support: Vec<f64>,
    /// Why the set is empty, when detection could not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl LevelSet {
    /// Empty set carrying the reason detection could not run.
    pub fn empty_with(diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: Some(diagnostic.into()),
            ..Default::default()
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Aggregate verdict over all indicator signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallSignal {
    Bullish,
    Bearish,
    Neutral,
}

/// Vote counts and the resulting verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSummary {
    pub overall_signal: OverallSignal,
    pub recommendation: String,
    pub bullish_signals: usize,
    pub bearish_signals: usize,
    /// Number of indicators requested, including failed ones.
    pub total_indicators: usize,
}

/// Full output of the indicator pipeline for one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReport {
    pub symbol: Symbol,
    /// Timestamp of the last observation.
    pub as_of: Option<Timestamp>,
    pub last_close: Option<f64>,
    /// Rows whose high/low were derived from close.
    pub approximated_rows: usize,
    pub indicators: BTreeMap<String, IndicatorResult>,
    pub levels: LevelSet,
    pub summary: SignalSummary,
}
