//! Volume ratio and volume-trend analysis.

use super::sma::Sma;
use super::{Indicator, output, require_positive};
use crate::stats::tail;
use types::{
    HISTORY_LEN, IndicatorError, IndicatorKind, IndicatorResult, IndicatorValues, Series, Signal,
    VolumeLevel, VolumeOutput, VolumeTrend,
};

/// Volume relative to its averages.
///
/// Ratio is current volume over the mid-window mean; the trend compares the
/// ordering of the short, mid and long means. Informational only: the signal
/// is always `Neutral`.
#[derive(Debug, Clone)]
pub struct VolumeAnalysis {
    windows: [usize; 3],
}

impl VolumeAnalysis {
    /// `windows` are the short, mid and long averaging periods.
    pub fn new(windows: [usize; 3]) -> Self {
        Self { windows }
    }
}

/// Bucket a volume ratio.
pub fn volume_level(ratio: f64) -> VolumeLevel {
    if ratio > 2.0 {
        VolumeLevel::VeryHigh
    } else if ratio > 1.5 {
        VolumeLevel::High
    } else if ratio < 0.5 {
        VolumeLevel::Low
    } else {
        VolumeLevel::Normal
    }
}

/// Ordering of the short, mid and long averages.
pub fn volume_trend(short: f64, mid: f64, long: f64) -> VolumeTrend {
    if short > mid && mid > long {
        VolumeTrend::Increasing
    } else if short < mid && mid < long {
        VolumeTrend::Decreasing
    } else {
        VolumeTrend::Flat
    }
}

impl Indicator for VolumeAnalysis {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Volume
    }

    fn name(&self) -> String {
        let [s, m, l] = self.windows;
        format!("VOLUME_{}_{}_{}", s, m, l)
    }

    fn required_periods(&self) -> usize {
        self.windows.iter().copied().max().unwrap_or(0)
    }

    fn calculate(&self, series: &Series) -> IndicatorResult {
        require_positive("Volume", &self.windows)?;
        self.ensure_history(series)?;

        let volumes = series.volumes();
        let [short, mid, long] = self.windows.map(|w| Sma::calculate_from_prices(&volumes, w));
        let (Some(sma_short), Some(sma_mid), Some(sma_long), Some(&current)) =
            (short, mid, long, volumes.last())
        else {
            return Err(IndicatorError::insufficient(
                self.required_periods(),
                series.len(),
            ));
        };

        let ratio = if sma_mid == 0.0 {
            1.0
        } else {
            current / sma_mid
        };
        let level = volume_level(ratio);
        let trend = volume_trend(sma_short, sma_mid, sma_long);

        let message = format!(
            "Volume {:?} ({:.0}% of {}-period mean), trend {:?}",
            level,
            ratio * 100.0,
            self.windows[1],
            trend
        );

        Ok(output(
            self,
            IndicatorValues::Volume(VolumeOutput {
                current,
                sma_short,
                sma_mid,
                sma_long,
                ratio,
                level,
                trend,
            }),
            Signal::Neutral,
            message,
            tail(&volumes, HISTORY_LEN),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::make_series_with_volume;
    use super::*;

    #[test]
    fn test_volume_level_thresholds() {
        assert_eq!(volume_level(2.5), VolumeLevel::VeryHigh);
        assert_eq!(volume_level(2.0), VolumeLevel::High);
        assert_eq!(volume_level(1.6), VolumeLevel::High);
        assert_eq!(volume_level(1.0), VolumeLevel::Normal);
        assert_eq!(volume_level(0.4), VolumeLevel::Low);
    }

    #[test]
    fn test_volume_trend_ordering() {
        assert_eq!(volume_trend(3.0, 2.0, 1.0), VolumeTrend::Increasing);
        assert_eq!(volume_trend(1.0, 2.0, 3.0), VolumeTrend::Decreasing);
        assert_eq!(volume_trend(2.0, 2.0, 1.0), VolumeTrend::Flat);
    }

    #[test]
    fn test_volume_increasing_series() {
        let closes = vec![10.0; 60];
        let volumes: Vec<f64> = (1..=60).map(|i| i as f64 * 10.0).collect();
        let out = VolumeAnalysis::new([10, 20, 50])
            .calculate(&make_series_with_volume(&closes, &volumes))
            .unwrap();
        assert_eq!(out.signal, Signal::Neutral);
        match out.values {
            IndicatorValues::Volume(v) => {
                assert_eq!(v.trend, VolumeTrend::Increasing);
                assert_eq!(v.current, 600.0);
                assert!(v.ratio > 1.0);
            }
            other => panic!("unexpected values {other:?}"),
        }
    }

    #[test]
    fn test_volume_zero_mean_ratio_is_one() {
        let out = VolumeAnalysis::new([10, 20, 50])
            .calculate(&make_series_with_volume(&[1.0; 50], &[0.0; 50]))
            .unwrap();
        match out.values {
            IndicatorValues::Volume(v) => {
                assert_eq!(v.ratio, 1.0);
                assert_eq!(v.level, VolumeLevel::Normal);
            }
            other => panic!("unexpected values {other:?}"),
        }
    }

    #[test]
    fn test_volume_requires_longest_window() {
        let err = VolumeAnalysis::new([10, 20, 50])
            .calculate(&make_series_with_volume(&[1.0; 49], &[1.0; 49]))
            .unwrap_err();
        assert_eq!(err, IndicatorError::insufficient(50, 49));
    }
}
