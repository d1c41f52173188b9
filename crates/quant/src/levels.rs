//! Support and resistance detection from recent local extrema.
//!
//! A point is a resistance candidate when its high is the maximum of the
//! centered window around it, a support candidate when its low is the
//! minimum. Distinct candidate prices are ranked and the top few kept.

use tracing::warn;
use types::{LevelConfig, LevelSet, Observation, Series};

/// Finds support/resistance levels over the trailing `lookback` observations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupportResistanceDetector {
    config: LevelConfig,
}

impl SupportResistanceDetector {
    pub fn new(config: LevelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Detect levels over the last `lookback` observations of `series`.
    ///
    /// Never fails: a sub-window shorter than the extrema window yields an
    /// empty set carrying a diagnostic.
    pub fn detect(&self, series: &Series) -> LevelSet {
        let LevelConfig {
            lookback,
            extrema_window,
            max_levels,
        } = self.config;

        let obs = series.observations();
        let recent = &obs[obs.len().saturating_sub(lookback)..];

        if extrema_window == 0 || recent.len() < extrema_window {
            let diagnostic = format!(
                "need at least {} observations for extrema detection, have {}",
                extrema_window.max(1),
                recent.len()
            );
            warn!(symbol = series.symbol(), %diagnostic, "support/resistance skipped");
            return LevelSet::empty_with(diagnostic);
        }

        let (peaks, troughs) = local_extrema(recent, extrema_window);

        LevelSet {
            resistance: top_distinct(peaks, max_levels, |a, b| b.total_cmp(a)),
            support: top_distinct(troughs, max_levels, |a, b| a.total_cmp(b)),
            diagnostic: None,
        }
    }
}

/// Highs that are local peaks and lows that are local troughs.
///
/// The window around index `i` spans `i - w/2 ..= i - w/2 + w - 1`; indices
/// whose window does not fit inside `obs` are skipped.
fn local_extrema(obs: &[Observation], w: usize) -> (Vec<f64>, Vec<f64>) {
    let half = w / 2;
    let mut peaks = Vec::new();
    let mut troughs = Vec::new();

    for i in half..obs.len() {
        let start = i - half;
        let end = start + w;
        if end > obs.len() {
            break;
        }
        let window = &obs[start..end];

        let max_high = window.iter().map(|o| o.high).fold(f64::NEG_INFINITY, f64::max);
        let min_low = window.iter().map(|o| o.low).fold(f64::INFINITY, f64::min);

        if obs[i].high == max_high {
            peaks.push(obs[i].high);
        }
        if obs[i].low == min_low {
            troughs.push(obs[i].low);
        }
    }

    (peaks, troughs)
}

/// Sort, drop repeated prices and keep the first `n`.
fn top_distinct(
    mut values: Vec<f64>,
    n: usize,
    order: impl FnMut(&f64, &f64) -> std::cmp::Ordering,
) -> Vec<f64> {
    values.sort_by(order);
    values.dedup();
    values.truncate(n);
    values
}
