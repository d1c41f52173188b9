//! Moving-average trend indicator.

use super::sma::Sma;
use super::{Indicator, output, require_positive};
use crate::stats::tail;
use types::{
    HISTORY_LEN, IndicatorError, IndicatorKind, IndicatorResult, IndicatorValues, Series, Signal,
    TrendOutput,
};

/// Price position against short, mid and long SMAs (20/50/200 by default).
///
/// Long-term: price and the mid SMA both above the long SMA is bullish, both
/// below is bearish. Short-term: price above the short SMA above the mid SMA
/// is bullish, the mirror image is bearish. The long-term verdict is the
/// indicator's signal.
#[derive(Debug, Clone)]
pub struct Trend {
    windows: [usize; 3],
}

impl Trend {
    pub fn new(windows: [usize; 3]) -> Self {
        Self { windows }
    }
}

/// Bullish when price is above `anchor` and `confirm` is above `slow`,
/// bearish on the mirror image.
fn verdict(price: f64, anchor: f64, confirm: f64, slow: f64) -> Signal {
    if price > anchor && confirm > slow {
        Signal::Bullish
    } else if price < anchor && confirm < slow {
        Signal::Bearish
    } else {
        Signal::Neutral
    }
}

impl Indicator for Trend {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Trend
    }

    fn name(&self) -> String {
        let [s, m, l] = self.windows;
        format!("SMA_{}_{}_{}", s, m, l)
    }

    fn required_periods(&self) -> usize {
        self.windows.iter().copied().max().unwrap_or(0)
    }

    fn calculate(&self, series: &Series) -> IndicatorResult {
        require_positive("Trend", &self.windows)?;
        self.ensure_history(series)?;

        let closes = series.closes();
        let [short, mid, long] = self.windows.map(|w| Sma::calculate_from_prices(&closes, w));
        let (Some(sma_short), Some(sma_mid), Some(sma_long), Some(&price)) =
            (short, mid, long, closes.last())
        else {
            return Err(IndicatorError::insufficient(
                self.required_periods(),
                series.len(),
            ));
        };

        // Long-term: price vs long SMA, mid SMA vs long SMA
        let long_term = verdict(price, sma_long, sma_mid, sma_long);
        // Short-term: price vs short SMA, short SMA vs mid SMA
        let short_term = verdict(price, sma_short, sma_short, sma_mid);

        let message = format!("Long-term trend {}, short-term trend {}", long_term, short_term);

        Ok(output(
            self,
            IndicatorValues::Trend(TrendOutput {
                sma_short,
                sma_mid,
                sma_long,
                long_term,
                short_term,
            }),
            long_term,
            message,
            tail(&Sma::series(&closes, self.windows[0]), HISTORY_LEN),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::make_series;
    use super::*;

    #[test]
    fn test_verdict() {
        assert_eq!(verdict(110.0, 100.0, 105.0, 100.0), Signal::Bullish);
        assert_eq!(verdict(90.0, 100.0, 95.0, 100.0), Signal::Bearish);
        assert_eq!(verdict(110.0, 100.0, 95.0, 100.0), Signal::Neutral);
    }

    #[test]
    fn test_trend_uptrend() {
        let closes: Vec<f64> = (0..210).map(|i| 50.0 + i as f64 * 0.5).collect();
        let out = Trend::new([20, 50, 200]).calculate(&make_series(&closes)).unwrap();
        assert_eq!(out.signal, Signal::Bullish);
        match out.values {
            IndicatorValues::Trend(t) => {
                assert_eq!(t.short_term, Signal::Bullish);
                assert!(t.sma_short > t.sma_mid && t.sma_mid > t.sma_long);
            }
            other => panic!("unexpected values {other:?}"),
        }
    }

    #[test]
    fn test_trend_flat_is_neutral() {
        let out = Trend::new([20, 50, 200])
            .calculate(&make_series(&[75.0; 200]))
            .unwrap();
        assert_eq!(out.signal, Signal::Neutral);
    }

    #[test]
    fn test_trend_insufficient() {
        let err = Trend::new([20, 50, 200])
            .calculate(&make_series(&[1.0; 199]))
            .unwrap_err();
        assert_eq!(err, IndicatorError::insufficient(200, 199));
    }
}
