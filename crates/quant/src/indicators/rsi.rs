//! Relative Strength Index (RSI) indicator.

use super::{Indicator, oscillator_signal, output, require_positive};
use crate::stats::{deltas, tail};
use types::{HISTORY_LEN, IndicatorKind, IndicatorResult, IndicatorValues, Series, Signal};

/// Relative Strength Index indicator.
///
/// Measures the speed and change of price movements on a 0-100 scale.
/// Average gain and loss are simple means over the last `period` price
/// changes (not Wilder-smoothed).
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    upper: f64,
    lower: f64,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            upper: 70.0,
            lower: 30.0,
        }
    }

    /// Override the overbought/oversold thresholds.
    pub fn with_thresholds(mut self, upper: f64, lower: f64) -> Self {
        self.upper = upper;
        self.lower = lower;
        self
    }

    /// RSI at every position with `period` prior changes, oldest first.
    ///
    /// Entry `i` corresponds to `prices[i + period]`. Empty when fewer than
    /// `period + 1` prices are given.
    pub fn series(prices: &[f64], period: usize) -> Vec<f64> {
        if period == 0 || prices.len() < period + 1 {
            return Vec::new();
        }
        deltas(prices)
            .windows(period)
            .map(|window| {
                let (gain, loss) = window.iter().fold((0.0, 0.0), |(g, l), &change| {
                    if change > 0.0 {
                        (g + change, l)
                    } else {
                        (g, l - change)
                    }
                });
                rsi_value(gain / period as f64, loss / period as f64)
            })
            .collect()
    }

    /// Latest RSI value.
    pub fn calculate_from_prices(prices: &[f64], period: usize) -> Option<f64> {
        Self::series(prices, period).last().copied()
    }
}

/// `100 − 100/(1 + gain/loss)`, with the zero-loss cases pinned.
///
/// No losses and no gains (a flat window) is neutral 50; gains without
/// losses is the limit 100.
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 { 50.0 } else { 100.0 }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}

impl Indicator for Rsi {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rsi
    }

    fn name(&self) -> String {
        format!("RSI_{}", self.period)
    }

    // Need period + 1 prices for period price changes
    fn required_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, series: &Series) -> IndicatorResult {
        require_positive("RSI", &[self.period])?;
        self.ensure_history(series)?;

        let values = Self::series(&series.closes(), self.period);
        let Some(&value) = values.last() else {
            return Err(types::IndicatorError::insufficient(
                self.required_periods(),
                series.len(),
            ));
        };

        let signal = oscillator_signal(value, self.upper, self.lower);
        let message = match signal {
            Signal::Overbought => "Overbought zone - possible sell",
            Signal::Oversold => "Oversold zone - possible buy",
            _ => "Neutral zone",
        };

        Ok(output(
            self,
            IndicatorValues::Rsi {
                value,
                period: self.period,
            },
            signal,
            message,
            tail(&values, HISTORY_LEN),
        ))
    }
}
