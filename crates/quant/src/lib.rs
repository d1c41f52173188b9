//! Quantitative analysis crate for market-lens.
//!
//! This crate provides technical indicators, support/resistance detection,
//! signal aggregation and the statistical utilities behind them.
//!
//! # Modules
//!
//! - [`indicators`] - Technical indicators (RSI, EMA, MACD, Bollinger, Stochastic, OBV, Volume, Trend)
//! - [`engine`] - Indicator engine producing the full report
//! - [`levels`] - Support/resistance from local extrema
//! - [`signals`] - Majority-vote signal aggregation
//! - [`rolling`] - Rolling window data structures
//! - [`stats`] - Statistical utilities
//!
//! # Example
//!
//! ```
//! use quant::IndicatorEngine;
//! use types::{IndicatorConfig, Observation, Series};
//!
//! let obs = (0..60)
//!     .map(|i| Observation::new(i, 1.0, 2.0, 0.5, 100.0 + i as f64, 10.0))
//!     .collect();
//! let series = Series::new("ETH", obs).unwrap();
//!
//! let report = IndicatorEngine::new(IndicatorConfig::default()).analyze(&series);
//! println!("{:?}", report.summary.overall_signal);
//! ```
//!
//! # Design Notes
//!
//! - All indicator calculations use `f64`
//! - Indicators are stateless and recompute from the full series
//! - Indicators are thread-safe (`Send + Sync`) so the engine can fan them out
//! - Short history is an `Err(InsufficientData)`, never a NaN

pub mod engine;
pub mod indicators;
pub mod levels;
pub mod rolling;
pub mod signals;
pub mod stats;

// Re-export main types at crate root for convenience
pub use engine::IndicatorEngine;
pub use indicators::{
    BollingerBands, Ema, Indicator, Macd, Obv, Rsi, Sma, Stochastic, Trend, VolumeAnalysis,
    create_indicator,
};
pub use levels::SupportResistanceDetector;
pub use rolling::RollingWindow;
pub use signals::{SignalAggregator, Vote};
