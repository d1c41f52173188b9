//! Feature row extraction for the sequence model.

use quant::indicators::{Ema, Rsi};
use types::{FeatureVector, Series};

/// Raw `[close, rsi, ema]` rows, oldest first.
///
/// Rows before RSI is defined (the first `rsi_period` observations) are
/// dropped, so the output has `len - rsi_period` rows, or none when the
/// series is too short. EMA is seeded with the first close and is defined
/// from the start.
pub fn feature_rows(series: &Series, rsi_period: usize, ema_period: usize) -> Vec<FeatureVector> {
    let closes = series.closes();
    let rsi = Rsi::series(&closes, rsi_period);
    let ema = Ema::series(&closes, ema_period);

    if rsi.is_empty() || ema.len() != closes.len() {
        return Vec::new();
    }

    rsi.iter()
        .enumerate()
        .map(|(i, &r)| {
            let t = i + rsi_period;
            vec![closes[t], r, ema[t]]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{N_FEATURES, Observation};

    fn series(closes: &[f64]) -> Series {
        let obs = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Observation::new(i as i64, c, c, c, c, 1.0))
            .collect();
        Series::new("TEST", obs).unwrap()
    }

    #[test]
    fn test_rows_aligned_to_rsi() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let rows = feature_rows(&series(&closes), 14, 30);

        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.len() == N_FEATURES));
        assert_eq!(rows[0][0], 114.0);
        assert_eq!(rows[5][0], 119.0);
        // Rising closes: every change is a gain
        assert_eq!(rows[0][1], 100.0);
        assert!(rows[5][2] < 119.0);
    }

    #[test]
    fn test_short_series_has_no_rows() {
        assert!(feature_rows(&series(&[1.0, 2.0, 3.0]), 14, 30).is_empty());
        assert!(feature_rows(&series(&[1.0; 20]), 0, 30).is_empty());
    }
}
