//! Bollinger Bands indicator.

use super::sma::Sma;
use super::{Indicator, output, require_positive};
use crate::stats::{mean, sample_std_dev, tail};
use types::{
    BollingerOutput, HISTORY_LEN, IndicatorError, IndicatorKind, IndicatorResult, IndicatorValues,
    Series, Signal,
};

/// %B above this (inside the bands) is near overbought.
const NEAR_UPPER: f64 = 0.8;
/// %B below this (inside the bands) is near oversold.
const NEAR_LOWER: f64 = 0.2;

/// Sample std at or below this fraction of the middle band counts as zero.
const FLAT_TOLERANCE: f64 = 1e-12;

/// Bollinger Bands indicator.
///
/// Volatility bands placed above and below a moving average, using the
/// sample standard deviation of the window. Default is 20-period SMA with
/// 2 standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with custom parameters.
    ///
    /// # Arguments
    /// * `period` - SMA period for middle band
    /// * `std_dev_multiplier` - Number of standard deviations for bands (typically 2.0)
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    /// Create Bollinger Bands with standard (20, 2.0) configuration.
    pub fn standard() -> Self {
        Self::new(20, 2.0)
    }

    /// Calculate bands over the last `period` prices.
    ///
    /// `None` when the window is too short or has fewer than two points
    /// (sample std is undefined).
    pub fn calculate_from_prices(&self, prices: &[f64]) -> Option<BollingerOutput> {
        if prices.len() < self.period || self.period == 0 {
            return None;
        }
        let window = &prices[prices.len() - self.period..];

        let middle = mean(window)?;
        let std_dev = sample_std_dev(window)?;
        // Rounding residue on a constant window is not volatility
        let std_dev = if std_dev <= FLAT_TOLERANCE * middle.abs() {
            0.0
        } else {
            std_dev
        };

        let upper = middle + (std_dev * self.std_dev_multiplier);
        let lower = middle - (std_dev * self.std_dev_multiplier);
        let price = *window.last()?;

        // Band width as percentage of middle band
        let bandwidth = if middle != 0.0 {
            (upper - lower) / middle * 100.0
        } else {
            0.0
        };

        // %B: where is price relative to bands (0 = lower, 1 = upper)
        let percent_b = if upper != lower {
            (price - lower) / (upper - lower)
        } else {
            0.5
        };

        Some(BollingerOutput {
            upper,
            middle,
            lower,
            bandwidth,
            percent_b,
            price,
        })
    }
}

/// Classify price position against the bands.
fn band_signal(bands: &BollingerOutput) -> (Signal, &'static str) {
    if bands.upper == bands.lower {
        return (Signal::Neutral, "Bands collapsed - no volatility");
    }
    if bands.price >= bands.upper {
        (Signal::Overbought, "Price at upper band - possibly overbought")
    } else if bands.price <= bands.lower {
        (Signal::Oversold, "Price at lower band - possibly oversold")
    } else if bands.percent_b > NEAR_UPPER {
        (Signal::NearOverbought, "Price near upper band")
    } else if bands.percent_b < NEAR_LOWER {
        (Signal::NearOversold, "Price near lower band")
    } else {
        (Signal::Neutral, "Price inside the bands")
    }
}

impl Indicator for BollingerBands {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Bollinger
    }

    fn name(&self) -> String {
        format!("BB_{}_{}", self.period, self.std_dev_multiplier)
    }

    fn required_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &Series) -> IndicatorResult {
        require_positive("Bollinger", &[self.period])?;
        self.ensure_history(series)?;

        let prices = series.closes();
        let bands = self.calculate_from_prices(&prices).ok_or_else(|| {
            IndicatorError::UndefinedComputation(
                "sample standard deviation needs a window of at least 2".to_string(),
            )
        })?;
        let (signal, message) = band_signal(&bands);

        Ok(output(
            self,
            IndicatorValues::Bollinger(bands),
            signal,
            message,
            tail(&Sma::series(&prices, self.period), HISTORY_LEN),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::make_series;
    use super::*;

    #[test]
    fn test_bollinger_bands_ordering() {
        let prices = [
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ];
        let output = BollingerBands::standard().calculate_from_prices(&prices).unwrap();
        assert!(output.upper > output.middle);
        assert!(output.middle > output.lower);
        assert!(output.percent_b > 0.0 && output.percent_b < 1.0);
    }

    #[test]
    fn test_bollinger_uses_sample_std() {
        // Window [1, 2, 3]: mean 2, sample std 1
        let output = BollingerBands::new(3, 2.0)
            .calculate_from_prices(&[1.0, 2.0, 3.0])
            .unwrap();
        assert!((output.upper - 4.0).abs() < 1e-12);
        assert!((output.lower - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_zero_width_is_neutral() {
        let out = BollingerBands::standard()
            .calculate(&make_series(&[10.0; 25]))
            .unwrap();
        assert_eq!(out.signal, Signal::Neutral);
        match out.values {
            IndicatorValues::Bollinger(b) => {
                assert_eq!(b.percent_b, 0.5);
                assert_eq!(b.bandwidth, 0.0);
            }
            other => panic!("unexpected values {other:?}"),
        }
    }

    #[test]
    fn test_bollinger_constant_non_dyadic_prices_collapse() {
        for price in [0.1, 3.3, 0.7] {
            let out = BollingerBands::standard()
                .calculate(&make_series(&vec![price; 250]))
                .unwrap();
            assert_eq!(out.signal, Signal::Neutral);
            match out.values {
                IndicatorValues::Bollinger(b) => {
                    assert_eq!(b.percent_b, 0.5, "price {price}");
                    assert_eq!(b.bandwidth, 0.0);
                    assert_eq!(b.upper, b.lower);
                }
                other => panic!("unexpected values {other:?}"),
            }
        }
    }

    #[test]
    fn test_band_signal_positions() {
        let bands = |price: f64, percent_b: f64| BollingerOutput {
            upper: 110.0,
            middle: 100.0,
            lower: 90.0,
            bandwidth: 20.0,
            percent_b,
            price,
        };
        assert_eq!(band_signal(&bands(111.0, 1.05)).0, Signal::Overbought);
        assert_eq!(band_signal(&bands(89.0, -0.05)).0, Signal::Oversold);
        assert_eq!(band_signal(&bands(108.0, 0.9)).0, Signal::NearOverbought);
        assert_eq!(band_signal(&bands(92.0, 0.1)).0, Signal::NearOversold);
        assert_eq!(band_signal(&bands(100.0, 0.5)).0, Signal::Neutral);
    }

    #[test]
    fn test_bollinger_period_one_undefined() {
        let err = BollingerBands::new(1, 2.0)
            .calculate(&make_series(&[1.0, 2.0]))
            .unwrap_err();
        assert!(matches!(err, IndicatorError::UndefinedComputation(_)));
    }
}
