//! Indicator engine for batch computation over a series.
//!
//! The engine owns one configured instance per enabled indicator family,
//! a support/resistance detector, and produces the full report.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │       IndicatorEngine        │
//! │  ┌────────────────────────┐  │
//! │  │  Enabled Indicators    │──┼──► parallel::map_slice
//! │  └────────────────────────┘  │         │
//! │  ┌────────────────────────┐  │         ▼
//! │  │ SupportResistance      │  │   Vec<(kind, result)>
//! │  └────────────────────────┘  │         │
//! │                              │         ▼
//! │                              │   SignalAggregator
//! └──────────────────────────────┘         │
//!                                          ▼
//!                                   IndicatorReport
//! ```
//!
//! # Usage
//!
//! ```
//! use quant::IndicatorEngine;
//! use types::{IndicatorConfig, IndicatorKind, Observation, Series};
//!
//! let obs = (0..30)
//!     .map(|i| Observation::new(i, 1.0, 2.0, 0.5, 1.0 + i as f64, 100.0))
//!     .collect();
//! let series = Series::new("BTC", obs).unwrap();
//!
//! let config = IndicatorConfig::default().with_enabled(&[IndicatorKind::Rsi]);
//! let report = IndicatorEngine::new(config).analyze(&series);
//! assert!(report.indicators["rsi"].is_ok());
//! ```

use std::collections::BTreeMap;

use tracing::{debug, warn};
use types::{IndicatorConfig, IndicatorKind, IndicatorReport, IndicatorResult, Series};

use crate::indicators::{Indicator, create_indicator};
use crate::levels::SupportResistanceDetector;
use crate::signals::SignalAggregator;

/// Engine for computing the enabled technical indicators.
pub struct IndicatorEngine {
    config: IndicatorConfig,
    /// Enabled indicators, in report order, without duplicates.
    indicators: Vec<Box<dyn Indicator>>,
    levels: SupportResistanceDetector,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(IndicatorConfig::default())
    }
}

impl IndicatorEngine {
    /// Build an engine for the families enabled in `config`.
    pub fn new(config: IndicatorConfig) -> Self {
        let mut kinds: Vec<IndicatorKind> = Vec::with_capacity(config.enabled.len());
        for kind in &config.enabled {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }

        let indicators = kinds
            .into_iter()
            .map(|kind| create_indicator(kind, &config))
            .collect();

        Self {
            levels: SupportResistanceDetector::new(config.levels),
            config,
            indicators,
        }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Families this engine computes, in report order.
    pub fn registered_kinds(&self) -> Vec<IndicatorKind> {
        self.indicators.iter().map(|i| i.kind()).collect()
    }

    /// Check if a family is enabled.
    pub fn is_registered(&self, kind: IndicatorKind) -> bool {
        self.indicators.iter().any(|i| i.kind() == kind)
    }

    /// Get the configured indicator for a family, if enabled.
    pub fn get(&self, kind: IndicatorKind) -> Option<&dyn Indicator> {
        self.indicators
            .iter()
            .find(|i| i.kind() == kind)
            .map(|b| b.as_ref())
    }

    /// Compute a single family, enabled or not, with this engine's parameters.
    pub fn compute(&self, kind: IndicatorKind, series: &Series) -> IndicatorResult {
        match self.get(kind) {
            Some(indicator) => indicator.calculate(series),
            None => create_indicator(kind, &self.config).calculate(series),
        }
    }

    /// Compute every enabled family.
    ///
    /// Families are independent and may run on worker threads; the result
    /// keeps report order regardless.
    pub fn compute_all(&self, series: &Series) -> Vec<(IndicatorKind, IndicatorResult)> {
        parallel::map_slice(
            &self.indicators,
            |indicator| {
                let result = indicator.calculate(series);
                match &result {
                    Ok(out) => debug!(
                        indicator = %indicator.kind(),
                        signal = %out.signal,
                        "indicator computed"
                    ),
                    Err(e) => debug!(indicator = %indicator.kind(), error = %e, "indicator failed"),
                }
                (indicator.kind(), result)
            },
            self.config.force_sequential,
        )
    }

    /// Full analysis: every enabled indicator, levels, and the vote summary.
    pub fn analyze(&self, series: &Series) -> IndicatorReport {
        let results = self.compute_all(series);
        let summary = SignalAggregator::aggregate(&results);
        let levels = self.levels.detect(series);

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        if failed > 0 {
            warn!(
                symbol = series.symbol(),
                failed,
                total = results.len(),
                "some indicators could not be computed"
            );
        }

        let indicators: BTreeMap<String, IndicatorResult> = results
            .into_iter()
            .map(|(kind, result)| (kind.name().to_string(), result))
            .collect();

        let last = series.last();
        IndicatorReport {
            symbol: series.symbol().to_string(),
            as_of: last.map(|o| o.timestamp),
            last_close: last.map(|o| o.close),
            approximated_rows: series.approximated_count(),
            indicators,
            levels,
            summary,
        }
    }
}

impl std::fmt::Debug for IndicatorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorEngine")
            .field("indicators", &self.registered_kinds())
            .field("levels", self.levels.config())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::make_series;
    use types::{IndicatorError, OverallSignal};

    fn rising(n: usize) -> Series {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        make_series(&closes)
    }

    #[test]
    fn test_engine_registration_dedups() {
        let config = IndicatorConfig::default().with_enabled(&[
            IndicatorKind::Rsi,
            IndicatorKind::Ema,
            IndicatorKind::Rsi,
        ]);
        let engine = IndicatorEngine::new(config);
        assert_eq!(
            engine.registered_kinds(),
            vec![IndicatorKind::Rsi, IndicatorKind::Ema]
        );
        assert!(engine.is_registered(IndicatorKind::Ema));
        assert!(!engine.is_registered(IndicatorKind::Macd));
    }

    #[test]
    fn test_compute_unregistered_kind() {
        let engine =
            IndicatorEngine::new(IndicatorConfig::default().with_enabled(&[IndicatorKind::Rsi]));
        assert!(engine.compute(IndicatorKind::Ema, &rising(30)).is_ok());
    }

    #[test]
    fn test_compute_all_keeps_order() {
        let engine = IndicatorEngine::default();
        let results = engine.compute_all(&rising(30));
        let kinds: Vec<_> = results.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, IndicatorKind::ALL.to_vec());
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let series = rising(250);
        let par = IndicatorEngine::default().analyze(&series);
        let seq = IndicatorEngine::new(IndicatorConfig {
            force_sequential: true,
            ..Default::default()
        })
        .analyze(&series);
        assert_eq!(par, seq);
    }

    #[test]
    fn test_analyze_contains_failures_in_place() {
        // 30 points: enough for RSI/EMA/Bollinger/Stochastic/OBV, not MACD/Volume/Trend
        let report = IndicatorEngine::default().analyze(&rising(30));

        assert_eq!(report.indicators.len(), IndicatorKind::ALL.len());
        assert!(report.indicators["rsi"].is_ok());
        assert!(matches!(
            report.indicators["macd"],
            Err(IndicatorError::InsufficientData { required: 35, available: 30 })
        ));
        assert!(report.indicators["trend"].is_err());
        assert_eq!(report.summary.total_indicators, IndicatorKind::ALL.len());
        assert_eq!(report.last_close, Some(129.0));
        assert_eq!(report.as_of, Some(29));
    }

    #[test]
    fn test_analyze_uptrend_summary() {
        let report = IndicatorEngine::default().analyze(&rising(250));
        // RSI/Bollinger/Stochastic overbought vote bearish; EMA/MACD/Trend vote bullish
        assert!(report.summary.bullish_signals >= 3);
        assert!(report.summary.bearish_signals >= 1);
        assert_ne!(report.summary.overall_signal, OverallSignal::Bearish);
    }
}
