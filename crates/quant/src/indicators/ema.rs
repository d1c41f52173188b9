//! Exponential Moving Average (EMA) indicator.

use super::{Indicator, output, require_positive};
use crate::stats::tail;
use types::{HISTORY_LEN, IndicatorKind, IndicatorResult, IndicatorValues, Series, Signal};

/// Exponential Moving Average indicator.
///
/// Gives more weight to recent prices using exponential smoothing.
/// Multiplier = 2 / (period + 1), seeded with the first price.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// EMA at every position, oldest first.
    ///
    /// `EMA_0 = p_0`, `EMA_t = α·p_t + (1−α)·EMA_{t−1}`. The output has the
    /// same length as the input; empty for an empty input or zero period.
    pub fn series(prices: &[f64], period: usize) -> Vec<f64> {
        if period == 0 {
            return Vec::new();
        }
        let multiplier = 2.0 / (period as f64 + 1.0);
        let mut prev: Option<f64> = None;
        prices
            .iter()
            .map(|&price| {
                let ema = match prev {
                    Some(p) => (price - p) * multiplier + p,
                    None => price,
                };
                prev = Some(ema);
                ema
            })
            .collect()
    }

    /// Latest EMA value; `None` with fewer than `period` prices.
    pub fn calculate_from_prices(prices: &[f64], period: usize) -> Option<f64> {
        if prices.len() < period || period == 0 {
            return None;
        }
        Self::series(prices, period).last().copied()
    }
}

impl Indicator for Ema {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Ema
    }

    fn name(&self) -> String {
        format!("EMA_{}", self.period)
    }

    fn required_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &Series) -> IndicatorResult {
        require_positive("EMA", &[self.period])?;
        self.ensure_history(series)?;

        let prices = series.closes();
        let emas = Self::series(&prices, self.period);
        let (Some(&price), Some(&ema)) = (prices.last(), emas.last()) else {
            return Err(types::IndicatorError::insufficient(self.period, 0));
        };

        let (signal, message) = if price > ema {
            (Signal::Bullish, format!("Price above {} - uptrend", self.name()))
        } else {
            (Signal::Bearish, format!("Price below {} - downtrend", self.name()))
        };

        Ok(output(
            self,
            IndicatorValues::Ema {
                price,
                ema,
                period: self.period,
            },
            signal,
            message,
            tail(&emas, HISTORY_LEN),
        ))
    }
}
