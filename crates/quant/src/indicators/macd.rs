//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema::Ema;
use super::{Indicator, output, require_positive};
use crate::stats::tail;
use types::{
    HISTORY_LEN, IndicatorError, IndicatorKind, IndicatorResult, IndicatorValues, MacdHistory,
    MacdOutput, Series, Signal,
};

/// MACD indicator.
///
/// Shows the relationship between two EMAs and includes a signal line.
/// Standard configuration is (12, 26, 9).
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

/// The three MACD lines at every position, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }

    /// Create MACD with standard (12, 26, 9) configuration.
    pub fn standard() -> Self {
        Self::new(12, 26, 9)
    }

    /// Compute all three lines over the full price history.
    ///
    /// Both EMAs and the signal EMA are seeded at the first value, so every
    /// line has the same length as `prices`.
    pub fn lines(&self, prices: &[f64]) -> MacdLines {
        let fast = Ema::series(prices, self.fast_period);
        let slow = Ema::series(prices, self.slow_period);
        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = Ema::series(&macd, self.signal_period);
        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();
        MacdLines {
            macd,
            signal,
            histogram,
        }
    }

    /// Latest MACD output from price data.
    pub fn calculate_full_from_prices(&self, prices: &[f64]) -> Option<MacdOutput> {
        if prices.len() < self.required_periods() {
            return None;
        }
        let lines = self.lines(prices);
        Some(MacdOutput {
            macd_line: *lines.macd.last()?,
            signal_line: *lines.signal.last()?,
            histogram: *lines.histogram.last()?,
        })
    }
}

/// Crossover classification from the previous histogram and current lines.
fn crossover_signal(prev_histogram: f64, current: &MacdOutput) -> (Signal, &'static str) {
    let above = current.macd_line > current.signal_line;
    let below = current.macd_line < current.signal_line;
    if above && prev_histogram < 0.0 {
        (Signal::Buy, "MACD crossed above signal - buy signal")
    } else if below && prev_histogram > 0.0 {
        (Signal::Sell, "MACD crossed below signal - sell signal")
    } else if above {
        (Signal::Bullish, "MACD above signal - uptrend")
    } else {
        (Signal::Bearish, "MACD below signal - downtrend")
    }
}

impl Indicator for Macd {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Macd
    }

    fn name(&self) -> String {
        format!(
            "MACD_{}_{}_{}",
            self.fast_period, self.slow_period, self.signal_period
        )
    }

    // Need enough data for slow EMA + signal EMA
    fn required_periods(&self) -> usize {
        self.slow_period + self.signal_period
    }

    fn calculate(&self, series: &Series) -> IndicatorResult {
        require_positive(
            "MACD",
            &[self.fast_period, self.slow_period, self.signal_period],
        )?;
        self.ensure_history(series)?;

        let lines = self.lines(&series.closes());
        let n = lines.histogram.len();
        if n < 2 {
            return Err(IndicatorError::insufficient(2, n));
        }

        let current = MacdOutput {
            macd_line: lines.macd[n - 1],
            signal_line: lines.signal[n - 1],
            histogram: lines.histogram[n - 1],
        };
        let (signal, message) = crossover_signal(lines.histogram[n - 2], &current);

        let history = MacdHistory {
            macd: tail(&lines.macd, HISTORY_LEN),
            signal: tail(&lines.signal, HISTORY_LEN),
            histogram: tail(&lines.histogram, HISTORY_LEN),
        };
        let primary = history.histogram.clone();

        Ok(output(
            self,
            IndicatorValues::Macd {
                output: current,
                history,
            },
            signal,
            message,
            primary,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::make_series;
    use super::*;

    fn macd_output(macd_line: f64, signal_line: f64) -> MacdOutput {
        MacdOutput {
            macd_line,
            signal_line,
            histogram: macd_line - signal_line,
        }
    }

    #[test]
    fn test_macd_histogram_identity() {
        let prices: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();
        let output = Macd::standard().calculate_full_from_prices(&prices).unwrap();
        assert!((output.histogram - (output.macd_line - output.signal_line)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_constant_prices_flat() {
        let output = Macd::standard()
            .calculate_full_from_prices(&[50.0; 60])
            .unwrap();
        assert_eq!(output.macd_line, 0.0);
        assert_eq!(output.histogram, 0.0);
    }

    #[test]
    fn test_crossover_signals() {
        assert_eq!(crossover_signal(-0.5, &macd_output(1.0, 0.5)).0, Signal::Buy);
        assert_eq!(crossover_signal(0.5, &macd_output(0.5, 1.0)).0, Signal::Sell);
        assert_eq!(crossover_signal(0.5, &macd_output(1.0, 0.5)).0, Signal::Bullish);
        assert_eq!(crossover_signal(-0.5, &macd_output(0.5, 1.0)).0, Signal::Bearish);
        // Equal lines never count as a cross
        assert_eq!(crossover_signal(-0.5, &macd_output(1.0, 1.0)).0, Signal::Bearish);
    }

    #[test]
    fn test_macd_uptrend_is_bullish() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let out = Macd::standard().calculate(&make_series(&prices)).unwrap();
        assert!(matches!(out.signal, Signal::Bullish | Signal::Buy));
        match out.values {
            IndicatorValues::Macd { output, history } => {
                assert!(output.macd_line > 0.0);
                assert_eq!(history.macd.len(), HISTORY_LEN);
                assert_eq!(history.signal.len(), HISTORY_LEN);
                assert_eq!(history.histogram, out.history);
            }
            other => panic!("unexpected values {other:?}"),
        }
    }

    #[test]
    fn test_macd_insufficient() {
        let err = Macd::standard().calculate(&make_series(&[1.0; 34])).unwrap_err();
        assert_eq!(err, IndicatorError::insufficient(35, 34));
    }
}
