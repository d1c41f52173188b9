//! Timestamp parsing for raw rows.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use types::{SeriesError, Timestamp};

/// Epoch values at or above this magnitude are taken as milliseconds.
const MILLIS_THRESHOLD: f64 = 1e11;

/// Parse a raw timestamp into epoch milliseconds.
///
/// Accepts, in order: a numeric epoch (seconds or milliseconds, detected by
/// magnitude), RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, and a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, SeriesError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(SeriesError::MalformedInput("empty timestamp".to_string()));
    }

    if let Ok(n) = s.parse::<f64>() {
        if !n.is_finite() {
            return Err(SeriesError::MalformedInput(format!(
                "non-finite timestamp '{}'",
                raw
            )));
        }
        let millis = if n.abs() >= MILLIS_THRESHOLD {
            n
        } else {
            n * 1000.0
        };
        return Ok(millis.round() as Timestamp);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(dt) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(dt.and_utc().timestamp_millis());
    }

    Err(SeriesError::MalformedInput(format!(
        "unparsable timestamp '{}'",
        raw
    )))
}
