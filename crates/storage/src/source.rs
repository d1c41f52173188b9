//! Series sources: where raw observation rows come from.
//!
//! A source hands back loosely-typed [`RawObservation`] rows in whatever
//! order the underlying data has them. Validation and sorting happen in
//! [`crate::SeriesStore::load`].

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;
use types::{RawObservation, SeriesError};

/// One day in milliseconds, the spacing of synthesized timestamps.
pub const DAY_MS: i64 = 86_400_000;

/// Supplies an ordered sequence of raw observation rows.
pub trait SeriesSource {
    fn fetch(&self) -> Result<Vec<RawObservation>, SeriesError>;
}

// =============================================================================
// CSV
// =============================================================================

/// Column positions resolved from a CSV header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    timestamp: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: usize,
    volume: Option<usize>,
}

impl ColumnMap {
    /// Map columns by header name, case-insensitively.
    ///
    /// The time column may be named `timestamp`, `date`, `datetime` or `time`.
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, SeriesError> {
        let lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |names: &[&str]| lower.iter().position(|h| names.contains(&h.as_str()));

        let timestamp = find(&["timestamp", "date", "datetime", "time"]).ok_or_else(|| {
            SeriesError::MalformedInput("csv header has no timestamp/date column".to_string())
        })?;
        let close = find(&["close"]).ok_or_else(|| {
            SeriesError::MalformedInput("csv header has no close column".to_string())
        })?;

        Ok(Self {
            timestamp,
            open: find(&["open"]),
            high: find(&["high"]),
            low: find(&["low"]),
            close,
            volume: find(&["volume"]),
        })
    }
}

/// Reads OHLCV rows from CSV with a header row.
///
/// Only the time and close columns are mandatory. Empty cells are treated as
/// missing values.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeriesSource for CsvSource {
    fn fetch(&self) -> Result<Vec<RawObservation>, SeriesError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| {
                SeriesError::MalformedInput(format!("{}: {}", self.path.display(), e))
            })?;
        let rows = read_csv(reader)?;
        debug!(path = %self.path.display(), rows = rows.len(), "csv fetched");
        Ok(rows)
    }
}

/// Parse CSV from any reader. Used by [`CsvSource`] and handy for in-memory data.
pub fn read_csv_from<R: Read>(input: R) -> Result<Vec<RawObservation>, SeriesError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    read_csv(reader)
}

fn read_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawObservation>, SeriesError> {
    let headers = reader
        .headers()
        .map_err(|e| SeriesError::MalformedInput(format!("csv header: {}", e)))?
        .clone();
    let cols = ColumnMap::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| SeriesError::MalformedInput(format!("csv row {}: {}", i, e)))?;
        let cell = |idx: Option<usize>, name: &str| parse_cell(&record, idx, name, i);

        rows.push(RawObservation {
            timestamp: record.get(cols.timestamp).unwrap_or_default().to_string(),
            open: cell(cols.open, "open")?,
            high: cell(cols.high, "high")?,
            low: cell(cols.low, "low")?,
            close: cell(Some(cols.close), "close")?,
            volume: cell(cols.volume, "volume")?,
        });
    }
    Ok(rows)
}

fn parse_cell(
    record: &csv::StringRecord,
    idx: Option<usize>,
    name: &str,
    row: usize,
) -> Result<Option<f64>, SeriesError> {
    let Some(raw) = idx.and_then(|i| record.get(i)) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>().map(Some).map_err(|_| {
        SeriesError::MalformedInput(format!("csv row {}: {} '{}' is not a number", row, name, raw))
    })
}

// =============================================================================
// Close-price list
// =============================================================================

/// A bare list of closing prices, oldest first.
///
/// Timestamps are synthesized one day apart, ending at `end` (epoch millis).
/// By default `end` is today's midnight UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosePricesSource {
    closes: Vec<f64>,
    end: i64,
}

impl ClosePricesSource {
    pub fn new(closes: Vec<f64>) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            closes,
            end: now - now.rem_euclid(DAY_MS),
        }
    }

    /// Parse a JSON array of numbers such as `[101.2, 102.0, 99.8]`.
    pub fn from_json_str(json: &str) -> Result<Self, SeriesError> {
        let closes: Vec<f64> = serde_json::from_str(json)
            .map_err(|e| SeriesError::MalformedInput(format!("prices json: {}", e)))?;
        Ok(Self::new(closes))
    }

    /// Anchor the synthesized timestamps so the last one is `end`.
    pub fn ending_at(mut self, end: i64) -> Self {
        self.end = end;
        self
    }
}

impl SeriesSource for ClosePricesSource {
    fn fetch(&self) -> Result<Vec<RawObservation>, SeriesError> {
        let n = self.closes.len() as i64;
        self.closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let ms = self.end - (n - 1 - i as i64) * DAY_MS;
                let ts = DateTime::<Utc>::from_timestamp_millis(ms).ok_or_else(|| {
                    SeriesError::MalformedInput(format!("timestamp {} out of range", ms))
                })?;
                Ok(RawObservation::close_only(
                    ts.to_rfc3339_opts(SecondsFormat::Secs, true),
                    close,
                ))
            })
            .collect()
    }
}
