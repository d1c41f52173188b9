//! Error types shared across crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or windowing a series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    /// A row could not be turned into an observation.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Fewer observations than the requested window.
    #[error("insufficient data: need {required} observations, have {available}")]
    InsufficientData { required: usize, available: usize },
}

/// Errors raised by a single indicator computation.
///
/// One indicator failing never aborts the others; the failure is reported
/// in place of that indicator's output.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorError {
    /// History shorter than the indicator's minimum window.
    #[error("insufficient data: need {required} observations, have {available}")]
    InsufficientData { required: usize, available: usize },

    /// A ratio or division had no defined value and no neutral policy applies.
    #[error("undefined computation: {0}")]
    UndefinedComputation(String),
}

impl IndicatorError {
    /// Shorthand used by every indicator's length guard.
    pub fn insufficient(required: usize, available: usize) -> Self {
        Self::InsufficientData {
            required,
            available,
        }
    }
}
