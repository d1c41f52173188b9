//! Validated, time-ascending observation store for one asset.
//!
//! The store owns the series behind an [`Arc`]. Readers take a snapshot and
//! compute against it without synchronization; `append` and `replace` swap
//! in a whole new series, so no consumer ever sees a partially mutated one.

use std::sync::Arc;

use tracing::{debug, warn};
use types::{Observation, RawObservation, Series, SeriesError, Symbol};

use crate::timestamp::parse_timestamp;

/// Holds the validated series for one asset.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    series: Arc<Series>,
}

impl SeriesStore {
    /// Wrap an already validated series.
    pub fn new(series: Series) -> Self {
        Self {
            series: Arc::new(series),
        }
    }

    /// Validate raw rows and build a store.
    ///
    /// Fails with `MalformedInput` when any row has an unparsable timestamp,
    /// a missing or non-finite close, or when two rows share a timestamp.
    /// Rows are sorted ascending.
    pub fn load(
        symbol: impl Into<Symbol>,
        rows: impl IntoIterator<Item = RawObservation>,
    ) -> Result<Self, SeriesError> {
        let observations = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| to_observation(i, row))
            .collect::<Result<Vec<_>, _>>()?;

        let series = Series::new(symbol, observations)?;

        let approximated = series.approximated_count();
        if approximated > 0 {
            warn!(
                symbol = series.symbol(),
                rows = approximated,
                "high/low missing, approximated from close"
            );
        }
        debug!(symbol = series.symbol(), len = series.len(), "series loaded");

        Ok(Self::new(series))
    }

    /// Cheap shared handle to the current series.
    pub fn snapshot(&self) -> Arc<Series> {
        Arc::clone(&self.series)
    }

    /// Borrow the current series.
    pub fn series(&self) -> &Series {
        &self.series
    }

    /// The last `n` observations.
    pub fn window(&self, n: usize) -> Result<&[Observation], SeriesError> {
        self.series.window(n)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Replace the whole series.
    ///
    /// Snapshots taken before the call keep seeing the old series.
    pub fn replace(&mut self, series: Series) {
        self.series = Arc::new(series);
    }

    /// Append one observation with a strictly later timestamp.
    pub fn append(&mut self, obs: Observation) -> Result<(), SeriesError> {
        let next = self.series.with_appended(obs)?;
        self.series = Arc::new(next);
        Ok(())
    }
}

fn to_observation(index: usize, row: RawObservation) -> Result<Observation, SeriesError> {
    let timestamp = parse_timestamp(&row.timestamp).map_err(|e| match e {
        SeriesError::MalformedInput(msg) => {
            SeriesError::MalformedInput(format!("row {}: {}", index, msg))
        }
        other => other,
    })?;

    let close = row.close.ok_or_else(|| {
        SeriesError::MalformedInput(format!("row {}: missing close", index))
    })?;

    Observation::from_parts(timestamp, row.open, row.high, row.low, close, row.volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ts: &str, close: f64) -> RawObservation {
        RawObservation::close_only(ts, close)
    }

    #[test]
    fn test_load_sorts_ascending() {
        let store = SeriesStore::load(
            "ETH",
            vec![raw("2024-01-03", 3.0), raw("2024-01-01", 1.0), raw("2024-01-02", 2.0)],
        )
        .unwrap();
        assert_eq!(store.series().closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(store.series().symbol(), "ETH");
    }

    #[test]
    fn test_load_missing_close() {
        let mut row = raw("2024-01-01", 1.0);
        row.close = None;
        let err = SeriesStore::load("ETH", vec![raw("2024-01-02", 2.0), row]).unwrap_err();
        match err {
            SeriesError::MalformedInput(msg) => assert!(msg.contains("missing close")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_bad_timestamp() {
        let err = SeriesStore::load("ETH", vec![raw("not a date", 1.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::MalformedInput(_)));
    }

    #[test]
    fn test_load_duplicate_timestamp() {
        let err = SeriesStore::load("ETH", vec![raw("2024-01-01", 1.0), raw("2024-01-01", 2.0)])
            .unwrap_err();
        assert!(matches!(err, SeriesError::MalformedInput(_)));
    }

    #[test]
    fn test_window() {
        let rows = (1..=5).map(|d| raw(&format!("2024-01-0{d}"), d as f64));
        let store = SeriesStore::load("ETH", rows).unwrap();

        let last_two = store.window(2).unwrap();
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[1].close, 5.0);

        assert_eq!(
            store.window(6).unwrap_err(),
            SeriesError::InsufficientData {
                required: 6,
                available: 5
            }
        );
    }

    #[test]
    fn test_snapshot_isolated_from_append() {
        let mut store = SeriesStore::load("ETH", vec![raw("2024-01-01", 1.0)]).unwrap();
        let before = store.snapshot();

        let last_ts = store.series().last().unwrap().timestamp;
        store
            .append(Observation::new(last_ts + 1, 2.0, 2.0, 2.0, 2.0, 10.0))
            .unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_append_rejects_stale_timestamp() {
        let mut store = SeriesStore::load("ETH", vec![raw("2024-01-02", 1.0)]).unwrap();
        let last_ts = store.series().last().unwrap().timestamp;
        let err = store
            .append(Observation::new(last_ts, 2.0, 2.0, 2.0, 2.0, 10.0))
            .unwrap_err();
        assert!(matches!(err, SeriesError::MalformedInput(_)));
        assert_eq!(store.len(), 1);
    }
}
