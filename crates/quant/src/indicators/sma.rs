//! Simple Moving Average (SMA) helper.
//!
//! SMA is not reported as an indicator of its own; Bollinger, Stochastic,
//! OBV, Volume and Trend build on it.

use crate::rolling::rolling_mean;

/// Simple Moving Average.
///
/// Computes the arithmetic mean of the last `period` values.
#[derive(Debug, Clone, Copy)]
pub struct Sma;

impl Sma {
    /// SMA of the last `period` values.
    ///
    /// Sums the window directly, so a constant input yields exactly that constant.
    pub fn calculate_from_prices(prices: &[f64], period: usize) -> Option<f64> {
        if prices.len() < period || period == 0 {
            return None;
        }
        let sum: f64 = prices.iter().rev().take(period).sum();
        Some(sum / period as f64)
    }

    /// SMA at every position with a full window, oldest first.
    pub fn series(prices: &[f64], period: usize) -> Vec<f64> {
        rolling_mean(prices, period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_calculation() {
        // SMA(3) of last 3 values: (12 + 13 + 14) / 3 = 13
        let result = Sma::calculate_from_prices(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        assert!((result.unwrap() - 13.0).abs() < 0.001);
    }

    #[test]
    fn test_sma_insufficient_data() {
        assert!(Sma::calculate_from_prices(&[10.0, 11.0], 5).is_none());
        assert!(Sma::calculate_from_prices(&[10.0, 11.0], 0).is_none());
    }

    #[test]
    fn test_sma_series_last_matches_point_value() {
        let prices: Vec<f64> = (0..30).map(|i| (i as f64 * 0.7).sin() * 10.0 + 50.0).collect();
        let series = Sma::series(&prices, 20);
        assert_eq!(series.len(), 11);
        let point = Sma::calculate_from_prices(&prices, 20).unwrap();
        assert!((series[10] - point).abs() < 1e-9);
    }
}
