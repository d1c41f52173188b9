//! Feature scaling between raw values and the model's input range.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "data_min": [1200.5, 8.3, 1250.1],
//!   "data_max": [4800.0, 91.7, 4650.2],
//!   "feature_range": [0, 1]
//! }
//! ```
//!
//! `feature_range` is optional and defaults to `[0, 1]`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use types::FeatureVector;

use crate::error::ScalerError;

/// Maps feature rows into and out of the model's input space.
pub trait Scaler: Send + Sync {
    /// Number of columns each row must have.
    fn n_features(&self) -> usize;

    fn transform(&self, rows: &[FeatureVector]) -> Result<Vec<FeatureVector>, ScalerError>;

    fn inverse_transform(&self, rows: &[FeatureVector]) -> Result<Vec<FeatureVector>, ScalerError>;
}

fn default_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Per-feature min/max scaling onto `feature_range`.
///
/// A feature whose observed min equals its max is given unit scale, so it
/// maps to `lo + (x - min)` instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    data_min: Vec<f64>,
    data_max: Vec<f64>,
    #[serde(default = "default_range")]
    feature_range: (f64, f64),
}

impl MinMaxScaler {
    /// Build from explicit bounds, validating shapes and values.
    pub fn new(
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        feature_range: (f64, f64),
    ) -> Result<Self, ScalerError> {
        let scaler = Self {
            data_min,
            data_max,
            feature_range,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Fit per-feature bounds on `rows`, targeting `[0, 1]`.
    pub fn fit(rows: &[FeatureVector]) -> Result<Self, ScalerError> {
        let first = rows.first().ok_or(ScalerError::EmptyInput)?;
        let mut data_min = first.clone();
        let mut data_max = first.clone();

        for row in &rows[1..] {
            check_width(first.len(), row)?;
            for (j, &v) in row.iter().enumerate() {
                data_min[j] = data_min[j].min(v);
                data_max[j] = data_max[j].max(v);
            }
        }

        Self::new(data_min, data_max, default_range())
    }

    /// Load a scaler from a JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, ScalerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ScalerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Load a scaler from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ScalerError> {
        let scaler: Self = serde_json::from_str(json)
            .map_err(|e| ScalerError::Invalid(format!("JSON parse error: {}", e)))?;
        scaler.validate()?;
        Ok(scaler)
    }

    /// Target range with a new `(lo, hi)`.
    pub fn with_feature_range(mut self, lo: f64, hi: f64) -> Result<Self, ScalerError> {
        self.feature_range = (lo, hi);
        self.validate()?;
        Ok(self)
    }

    pub fn data_min(&self) -> &[f64] {
        &self.data_min
    }

    pub fn data_max(&self) -> &[f64] {
        &self.data_max
    }

    fn validate(&self) -> Result<(), ScalerError> {
        if self.data_min.is_empty() {
            return Err(ScalerError::Invalid("no features".to_string()));
        }
        if self.data_min.len() != self.data_max.len() {
            return Err(ScalerError::Invalid(format!(
                "data_min has {} features, data_max has {}",
                self.data_min.len(),
                self.data_max.len()
            )));
        }
        let (lo, hi) = self.feature_range;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(ScalerError::Invalid(format!(
                "feature_range ({}, {}) must be finite with min < max",
                lo, hi
            )));
        }
        for (j, (min, max)) in self.data_min.iter().zip(&self.data_max).enumerate() {
            if !(min.is_finite() && max.is_finite() && min <= max) {
                return Err(ScalerError::Invalid(format!(
                    "feature {}: bounds ({}, {}) must be finite with min <= max",
                    j, min, max
                )));
            }
        }
        Ok(())
    }

    /// Multiplier for feature `j`.
    fn scale(&self, j: usize) -> f64 {
        let (lo, hi) = self.feature_range;
        let range = self.data_max[j] - self.data_min[j];
        let range = if range == 0.0 { 1.0 } else { range };
        (hi - lo) / range
    }
}

fn check_width(expected: usize, row: &[f64]) -> Result<(), ScalerError> {
    if row.len() != expected {
        return Err(ScalerError::DimensionMismatch {
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}

impl Scaler for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.data_min.len()
    }

    fn transform(&self, rows: &[FeatureVector]) -> Result<Vec<FeatureVector>, ScalerError> {
        let lo = self.feature_range.0;
        rows.iter()
            .map(|row| {
                check_width(self.n_features(), row)?;
                Ok(row
                    .iter()
                    .enumerate()
                    .map(|(j, &x)| (x - self.data_min[j]) * self.scale(j) + lo)
                    .collect())
            })
            .collect()
    }

    fn inverse_transform(&self, rows: &[FeatureVector]) -> Result<Vec<FeatureVector>, ScalerError> {
        let lo = self.feature_range.0;
        rows.iter()
            .map(|row| {
                check_width(self.n_features(), row)?;
                Ok(row
                    .iter()
                    .enumerate()
                    .map(|(j, &x)| (x - lo) / self.scale(j) + self.data_min[j])
                    .collect())
            })
            .collect()
    }
}
