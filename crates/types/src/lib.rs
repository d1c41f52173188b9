//! Core types for market-lens.
//!
//! This crate provides the shared data model used by the series store, the
//! indicator engine and the forecast engine: observations and validated
//! series, indicator outputs and signals, support/resistance levels, and the
//! error types every computation reports through.

pub mod config;
pub mod error;
pub mod features;
pub mod indicators;
pub mod market_data;

// =============================================================================
// Symbol Type
// =============================================================================

/// Asset ticker symbol (e.g., "BTC", "ETH").
pub type Symbol = String;

// =============================================================================
// Time Types
// =============================================================================

/// Wall clock timestamp in milliseconds since epoch.
pub type Timestamp = i64;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{IndicatorConfig, LevelConfig};
pub use error::{IndicatorError, SeriesError};
pub use features::{FEATURE_NAMES, FeatureVector, N_FEATURES, PRIMARY_FEATURE};
pub use indicators::{
    BollingerOutput, IndicatorKind, IndicatorOutput, IndicatorReport, IndicatorResult,
    IndicatorValues, LevelSet, MacdHistory, MacdOutput, OverallSignal, Signal, SignalSummary,
    StochasticOutput, TrendOutput, VolumeLevel, VolumeOutput, VolumeTrend,
};
pub use market_data::{Observation, RawObservation, Series};

/// Maximum number of trailing values carried in an indicator's history.
pub const HISTORY_LEN: usize = 10;
