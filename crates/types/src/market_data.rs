//! Market data types.
//!
//! This module contains the observation types consumed by every engine:
//! the raw, loosely-typed rows handed over by a series source, the validated
//! [`Observation`], and the time-ascending [`Series`].

use crate::Symbol;
use crate::Timestamp;
use crate::error::SeriesError;
use serde::{Deserialize, Serialize};

/// Upper multiplier applied to close when `high` is missing.
pub const APPROX_HIGH_FACTOR: f64 = 1.02;

/// Lower multiplier applied to close when `low` is missing.
pub const APPROX_LOW_FACTOR: f64 = 0.98;

// =============================================================================
// Raw Observation
// =============================================================================

/// A row as delivered by a series source, before validation.
///
/// Only `timestamp` and `close` are mandatory; everything else may be absent
/// and is derived on conversion (see [`Observation::from_parts`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawObservation {
    /// Unparsed timestamp (epoch millis, RFC 3339, or a date string).
    pub timestamp: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl RawObservation {
    /// Create a raw row carrying only a timestamp and a close price.
    pub fn close_only(timestamp: impl Into<String>, close: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            close: Some(close),
            ..Default::default()
        }
    }
}

// =============================================================================
// OHLCV Observation
// =============================================================================

/// OHLCV observation for a single period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Period timestamp.
    pub timestamp: Timestamp,
    /// Opening price.
    pub open: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume during the period.
    pub volume: f64,
    /// True when `high`/`low` were derived from `close` rather than observed.
    pub approximated: bool,
}

impl Observation {
    /// Create a fully observed OHLCV row.
    pub fn new(timestamp: Timestamp, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            approximated: false,
        }
    }

    /// Build an observation from optional fields, filling the gaps.
    ///
    /// Missing `high`/`low` become `close * 1.02` / `close * 0.98` and the row
    /// is flagged `approximated`. Missing `open` becomes `close`, missing
    /// `volume` becomes zero. Fails if any value is non-finite.
    pub fn from_parts(
        timestamp: Timestamp,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: f64,
        volume: Option<f64>,
    ) -> Result<Self, SeriesError> {
        let approximated = high.is_none() || low.is_none();
        let obs = Self {
            timestamp,
            open: open.unwrap_or(close),
            high: high.unwrap_or(close * APPROX_HIGH_FACTOR),
            low: low.unwrap_or(close * APPROX_LOW_FACTOR),
            close,
            volume: volume.unwrap_or(0.0),
            approximated,
        };

        obs.ensure_finite()?;
        Ok(obs)
    }

    /// Fail with `MalformedInput` if any numeric field is NaN or infinite.
    pub fn ensure_finite(&self) -> Result<(), SeriesError> {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(SeriesError::MalformedInput(format!(
                "non-finite value in observation at {}",
                self.timestamp
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Series
// =============================================================================

/// Time-ascending observation sequence for one asset.
///
/// Invariant: timestamps are strictly increasing. The only way to build a
/// `Series` is through [`Series::new`], which sorts and rejects duplicates.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Series {
    symbol: Symbol,
    observations: Vec<Observation>,
}

impl Series {
    /// Validate and sort observations into a series.
    pub fn new(
        symbol: impl Into<Symbol>,
        mut observations: Vec<Observation>,
    ) -> Result<Self, SeriesError> {
        for obs in &observations {
            obs.ensure_finite()?;
        }
        observations.sort_by_key(|o| o.timestamp);

        if let Some(w) = observations
            .windows(2)
            .find(|w| w[0].timestamp == w[1].timestamp)
        {
            return Err(SeriesError::MalformedInput(format!(
                "duplicate timestamp {}",
                w[0].timestamp
            )));
        }

        Ok(Self {
            symbol: symbol.into(),
            observations,
        })
    }

    /// Asset symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// All observations, oldest first.
    #[inline]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Most recent observation.
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// The last `n` observations.
    pub fn window(&self, n: usize) -> Result<&[Observation], SeriesError> {
        let len = self.observations.len();
        if len < n {
            return Err(SeriesError::InsufficientData {
                required: n,
                available: len,
            });
        }
        Ok(&self.observations[len - n..])
    }

    /// Closing prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.close).collect()
    }

    /// High prices, oldest first.
    pub fn highs(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.high).collect()
    }

    /// Low prices, oldest first.
    pub fn lows(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.low).collect()
    }

    /// Volumes, oldest first.
    pub fn volumes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.volume).collect()
    }

    /// Number of rows whose high/low were approximated from close.
    pub fn approximated_count(&self) -> usize {
        self.observations.iter().filter(|o| o.approximated).count()
    }

    /// Return a new series with `obs` appended.
    ///
    /// The timestamp must be strictly later than the current last one.
    pub fn with_appended(&self, obs: Observation) -> Result<Self, SeriesError> {
        obs.ensure_finite()?;
        if let Some(last) = self.last()
            && obs.timestamp <= last.timestamp
        {
            return Err(SeriesError::MalformedInput(format!(
                "appended timestamp {} is not after {}",
                obs.timestamp, last.timestamp
            )));
        }
        let mut observations = self.observations.clone();
        observations.push(obs);
        Ok(Self {
            symbol: self.symbol.clone(),
            observations,
        })
    }
}
