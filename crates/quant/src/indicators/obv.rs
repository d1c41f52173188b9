//! On-Balance Volume (OBV) indicator.

use super::sma::Sma;
use super::{Indicator, output, require_positive};
use crate::stats::tail;
use types::{
    HISTORY_LEN, IndicatorError, IndicatorKind, IndicatorResult, IndicatorValues, Series, Signal,
};

/// Volume above this multiple of its mean counts as a volume spike.
const SPIKE_RATIO: f64 = 1.5;

/// On-Balance Volume with volume confirmation.
///
/// OBV is the running sum of volume signed by the close-to-close direction:
/// a strictly higher close adds the volume, anything else subtracts it. The
/// first observation contributes zero.
///
/// The signal only fires on a volume spike (current volume above 1.5× its
/// `window` mean): price above its `window` SMA confirms buying, below
/// confirms selling.
#[derive(Debug, Clone)]
pub struct Obv {
    window: usize,
}

impl Obv {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Cumulative OBV at every position, oldest first.
    pub fn series(closes: &[f64], volumes: &[f64]) -> Vec<f64> {
        let mut obv = 0.0;
        closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&close, &volume))| {
                if i > 0 {
                    if close > closes[i - 1] {
                        obv += volume;
                    } else {
                        obv -= volume;
                    }
                }
                obv
            })
            .collect()
    }
}

impl Indicator for Obv {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Obv
    }

    fn name(&self) -> String {
        "OBV".to_string()
    }

    fn required_periods(&self) -> usize {
        self.window
    }

    fn calculate(&self, series: &Series) -> IndicatorResult {
        require_positive("OBV", &[self.window])?;
        self.ensure_history(series)?;

        let closes = series.closes();
        let volumes = series.volumes();
        let obv_values = Self::series(&closes, &volumes);

        let insufficient = || IndicatorError::insufficient(self.window, series.len());
        let obv = *obv_values.last().ok_or_else(insufficient)?;
        let price = *closes.last().ok_or_else(insufficient)?;
        let volume = *volumes.last().ok_or_else(insufficient)?;
        let price_sma = Sma::calculate_from_prices(&closes, self.window).ok_or_else(insufficient)?;
        let volume_sma =
            Sma::calculate_from_prices(&volumes, self.window).ok_or_else(insufficient)?;

        let volume_ratio = if volume_sma == 0.0 {
            1.0
        } else {
            volume / volume_sma
        };

        let (signal, message) = if volume > volume_sma * SPIKE_RATIO {
            if price > price_sma {
                (Signal::Bullish, "High volume with rising price")
            } else {
                (Signal::Bearish, "High volume with falling price")
            }
        } else {
            (Signal::Neutral, "No volume confirmation")
        };

        Ok(output(
            self,
            IndicatorValues::Obv { obv, volume_ratio },
            signal,
            message,
            tail(&obv_values, HISTORY_LEN),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{make_series, make_series_with_volume};
    use super::*;

    #[test]
    fn test_obv_signed_cumulative() {
        let obv = Obv::series(&[10.0, 11.0, 11.0, 9.0, 12.0], &[5.0, 1.0, 2.0, 3.0, 4.0]);
        // 0, +1, -2 (flat subtracts), -3, +4
        assert_eq!(obv, vec![0.0, 1.0, -1.0, -4.0, 0.0]);
    }

    #[test]
    fn test_obv_neutral_without_spike() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let out = Obv::new(20).calculate(&make_series(&closes)).unwrap();
        assert_eq!(out.signal, Signal::Neutral);
        assert_eq!(out.history.len(), HISTORY_LEN);
    }

    #[test]
    fn test_obv_spike_confirms_direction() {
        let mut volumes = vec![100.0; 25];
        volumes[24] = 1000.0;

        let rising: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let out = Obv::new(20)
            .calculate(&make_series_with_volume(&rising, &volumes))
            .unwrap();
        assert_eq!(out.signal, Signal::Bullish);

        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        let out = Obv::new(20)
            .calculate(&make_series_with_volume(&falling, &volumes))
            .unwrap();
        assert_eq!(out.signal, Signal::Bearish);
    }

    #[test]
    fn test_obv_zero_volume_ratio_is_one() {
        let closes = [1.0; 20];
        let out = Obv::new(20)
            .calculate(&make_series_with_volume(&closes, &[0.0; 20]))
            .unwrap();
        assert!(matches!(out.values, IndicatorValues::Obv { volume_ratio, .. } if volume_ratio == 1.0));
    }
}
