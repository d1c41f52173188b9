//! Technical indicators for market analysis.
//!
//! This module provides a trait-based interface for computing technical
//! indicators over a [`Series`]. Every indicator is a pure function of the
//! series: it either produces an [`IndicatorOutput`] (values, signal,
//! message, trailing history) or an [`IndicatorError`], never NaN.
//!
//! # Supported Indicators
//! - **RSI** - Relative Strength Index (simple rolling mean of gains/losses)
//! - **EMA** - Exponential Moving Average vs price
//! - **MACD** - Moving Average Convergence Divergence with crossover detection
//! - **Bollinger Bands** - Sample-std volatility bands around SMA
//! - **Stochastic** - %K / %D oscillator
//! - **OBV** - On-Balance Volume with volume confirmation
//! - **Volume** - Volume ratio and short/mid/long average ordering
//! - **Trend** - Price vs 20/50/200 SMAs
//!
//! # Example
//! ```
//! use quant::indicators::{Ema, Indicator};
//! use types::{Observation, Series};
//!
//! let obs = (0..5)
//!     .map(|i| Observation::new(i, 1.0, 1.0, 1.0, 1.0 + i as f64, 10.0))
//!     .collect();
//! let series = Series::new("BTC", obs).unwrap();
//! let out = Ema::new(3).calculate(&series).unwrap();
//! assert_eq!(out.name, "EMA_3");
//! ```

use types::{
    IndicatorConfig, IndicatorError, IndicatorKind, IndicatorOutput, IndicatorResult, Series,
    Signal,
};

// =============================================================================
// Indicator Modules
// =============================================================================

mod bollinger;
mod ema;
mod macd;
mod obv;
mod rsi;
mod sma;
mod stochastic;
mod trend;
mod volume;

// =============================================================================
// Re-exports
// =============================================================================

pub use bollinger::BollingerBands;
pub use ema::Ema;
pub use macd::Macd;
pub use obv::Obv;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::Stochastic;
pub use trend::Trend;
pub use volume::VolumeAnalysis;

// =============================================================================
// Indicator Trait
// =============================================================================

/// Trait for technical indicators.
///
/// Indicators consume a time-ascending series and produce one output.
/// They declare their family and the minimum history they need.
pub trait Indicator: Send + Sync {
    /// The family of this indicator.
    fn kind(&self) -> IndicatorKind;

    /// Display name including parameters, e.g. `RSI_14`.
    fn name(&self) -> String;

    /// Minimum number of observations required for a valid calculation.
    fn required_periods(&self) -> usize;

    /// Calculate the indicator over the whole series.
    fn calculate(&self, series: &Series) -> IndicatorResult;

    /// Fail with `InsufficientData` when the series is too short.
    fn ensure_history(&self, series: &Series) -> Result<(), IndicatorError> {
        let required = self.required_periods();
        if series.len() < required {
            return Err(IndicatorError::insufficient(required, series.len()));
        }
        Ok(())
    }
}

// =============================================================================
// Factory Function
// =============================================================================

/// Create an indicator from its family, parameterized by `config`.
pub fn create_indicator(kind: IndicatorKind, config: &IndicatorConfig) -> Box<dyn Indicator> {
    match kind {
        IndicatorKind::Rsi => Box::new(
            Rsi::new(config.rsi_period).with_thresholds(config.rsi_upper, config.rsi_lower),
        ),
        IndicatorKind::Ema => Box::new(Ema::new(config.ema_period)),
        IndicatorKind::Macd => Box::new(Macd::new(
            config.macd_fast,
            config.macd_slow,
            config.macd_signal,
        )),
        IndicatorKind::Bollinger => Box::new(BollingerBands::new(
            config.bollinger_period,
            config.bollinger_k,
        )),
        IndicatorKind::Stochastic => Box::new(
            Stochastic::new(config.stochastic_k, config.stochastic_d)
                .with_thresholds(config.stochastic_upper, config.stochastic_lower),
        ),
        IndicatorKind::Obv => Box::new(Obv::new(config.volume_windows[1])),
        IndicatorKind::Volume => Box::new(VolumeAnalysis::new(config.volume_windows)),
        IndicatorKind::Trend => Box::new(Trend::new(config.trend_windows)),
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Reject zero periods before they turn into divisions by zero.
fn require_positive(name: &str, periods: &[usize]) -> Result<(), IndicatorError> {
    if periods.contains(&0) {
        return Err(IndicatorError::UndefinedComputation(format!(
            "{} periods must be > 0",
            name
        )));
    }
    Ok(())
}

/// Map an oscillator reading onto the overbought/oversold vocabulary.
///
/// High readings are `Overbought`, low readings `Oversold`, uniformly for
/// every oscillator.
fn oscillator_signal(value: f64, upper: f64, lower: f64) -> Signal {
    if value >= upper {
        Signal::Overbought
    } else if value <= lower {
        Signal::Oversold
    } else {
        Signal::Neutral
    }
}

/// Assemble an output record.
fn output(
    indicator: &dyn Indicator,
    values: types::IndicatorValues,
    signal: Signal,
    message: impl Into<String>,
    history: Vec<f64>,
) -> IndicatorOutput {
    IndicatorOutput {
        kind: indicator.kind(),
        name: indicator.name(),
        values,
        signal,
        message: message.into(),
        history,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use types::{Observation, Series};

    /// Series with the given closes, high/low one unit away, flat volume.
    pub fn make_series(closes: &[f64]) -> Series {
        make_series_with_volume(closes, &vec![1000.0; closes.len()])
    }

    /// Series with the given closes and volumes.
    pub fn make_series_with_volume(closes: &[f64], volumes: &[f64]) -> Series {
        let obs = closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&close, &volume))| {
                Observation::new(i as i64, close, close + 1.0, close - 1.0, close, volume)
            })
            .collect();
        Series::new("TEST", obs).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::make_series;
    use super::*;

    #[test]
    fn test_oscillator_signal_direction() {
        assert_eq!(oscillator_signal(75.0, 70.0, 30.0), Signal::Overbought);
        assert_eq!(oscillator_signal(70.0, 70.0, 30.0), Signal::Overbought);
        assert_eq!(oscillator_signal(25.0, 70.0, 30.0), Signal::Oversold);
        assert_eq!(oscillator_signal(50.0, 70.0, 30.0), Signal::Neutral);
    }

    #[test]
    fn test_factory_uses_config_periods() {
        let config = IndicatorConfig {
            rsi_period: 7,
            ema_period: 9,
            ..Default::default()
        };
        let rsi = create_indicator(IndicatorKind::Rsi, &config);
        assert_eq!(rsi.required_periods(), 8);
        assert_eq!(rsi.name(), "RSI_7");

        let ema = create_indicator(IndicatorKind::Ema, &config);
        assert_eq!(ema.required_periods(), 9);

        let macd = create_indicator(IndicatorKind::Macd, &config);
        assert_eq!(macd.required_periods(), 26 + 9);

        let trend = create_indicator(IndicatorKind::Trend, &config);
        assert_eq!(trend.required_periods(), 200);
    }

    #[test]
    fn test_every_kind_reports_insufficient_on_one_point() {
        let config = IndicatorConfig::default();
        let series = make_series(&[100.0]);
        for kind in IndicatorKind::ALL {
            let indicator = create_indicator(kind, &config);
            assert_eq!(indicator.kind(), kind);
            match indicator.calculate(&series) {
                Err(IndicatorError::InsufficientData {
                    required,
                    available,
                }) => {
                    assert_eq!(available, 1);
                    assert!(required > 1, "{kind} should need more than one point");
                }
                other => panic!("{kind}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_period_is_undefined() {
        let series = make_series(&[1.0, 2.0, 3.0]);
        let err = Ema::new(0).calculate(&series).unwrap_err();
        assert!(matches!(err, IndicatorError::UndefinedComputation(_)));
    }
}
