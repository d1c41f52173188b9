//! Stochastic Oscillator indicator.

use super::sma::Sma;
use super::{Indicator, output, require_positive};
use crate::rolling::rolling_range;
use crate::stats::tail;
use types::{
    HISTORY_LEN, IndicatorError, IndicatorKind, IndicatorResult, IndicatorValues, Series, Signal,
    StochasticOutput,
};

/// Stochastic Oscillator.
///
/// `%K = 100 · (close − lowest low) / (highest high − lowest low)` over `k`
/// periods, `%D = SMA_d(%K)`. A zero high/low range yields %K = 50.
#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
    upper: f64,
    lower: f64,
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize) -> Self {
        Self {
            k_period,
            d_period,
            upper: 80.0,
            lower: 20.0,
        }
    }

    /// Override the overbought/oversold thresholds.
    pub fn with_thresholds(mut self, upper: f64, lower: f64) -> Self {
        self.upper = upper;
        self.lower = lower;
        self
    }

    /// %K at every position with a full `k` window, oldest first.
    pub fn k_series(closes: &[f64], highs: &[f64], lows: &[f64], k_period: usize) -> Vec<f64> {
        if k_period == 0 {
            return Vec::new();
        }
        rolling_range(highs, lows, k_period)
            .into_iter()
            .zip(&closes[(k_period - 1).min(closes.len())..])
            .map(|((highest, lowest), &close)| {
                let range = highest - lowest;
                if range == 0.0 {
                    50.0
                } else {
                    (100.0 * (close - lowest) / range).clamp(0.0, 100.0)
                }
            })
            .collect()
    }

    fn classify(&self, current: &StochasticOutput) -> (Signal, &'static str) {
        let StochasticOutput { k, d } = *current;
        if k >= self.upper && d >= self.upper {
            (Signal::Overbought, "Stochastic in overbought zone")
        } else if k <= self.lower && d <= self.lower {
            (Signal::Oversold, "Stochastic in oversold zone")
        } else if k > d {
            (Signal::Bullish, "%K above %D - rising momentum")
        } else {
            (Signal::Bearish, "%K below %D - falling momentum")
        }
    }
}

impl Indicator for Stochastic {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Stochastic
    }

    fn name(&self) -> String {
        format!("STOCH_{}_{}", self.k_period, self.d_period)
    }

    // d %K values, the first of which needs k observations
    fn required_periods(&self) -> usize {
        (self.k_period + self.d_period).saturating_sub(1)
    }

    fn calculate(&self, series: &Series) -> IndicatorResult {
        require_positive("Stochastic", &[self.k_period, self.d_period])?;
        self.ensure_history(series)?;

        let k_values = Self::k_series(
            &series.closes(),
            &series.highs(),
            &series.lows(),
            self.k_period,
        );
        let d_values = Sma::series(&k_values, self.d_period);
        let (Some(&k), Some(&d)) = (k_values.last(), d_values.last()) else {
            return Err(IndicatorError::insufficient(
                self.required_periods(),
                series.len(),
            ));
        };

        let current = StochasticOutput { k, d };
        let (signal, message) = self.classify(&current);

        Ok(output(
            self,
            IndicatorValues::Stochastic(current),
            signal,
            message,
            tail(&k_values, HISTORY_LEN),
        ))
    }
}
