//! Sequence models mapping a scaled window to the next scaled primary value.
//!
//! # JSON Format (LinearSequenceModel)
//!
//! ```json
//! {
//!   "model_name": "linear_seq_v1",
//!   "sequence_length": 30,
//!   "n_features": 3,
//!   "weights": [...sequence_length * n_features weights, oldest row first...],
//!   "bias": 0.01
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use types::PRIMARY_FEATURE;

use crate::error::ModelError;
use crate::window::ForecastWindow;

/// A pretrained model over a full [`ForecastWindow`].
///
/// Implementations must be deterministic: the same window always yields the
/// same prediction.
pub trait SequenceModel: Send + Sync {
    /// Model name for logs and reports.
    fn name(&self) -> &str;

    /// Predict the next scaled primary value.
    fn predict(&self, window: &ForecastWindow) -> Result<f64, ModelError>;
}

// =============================================================================
// Linear model
// =============================================================================

#[derive(Debug, Deserialize)]
struct LinearSequenceModelJson {
    model_name: String,
    sequence_length: usize,
    n_features: usize,
    weights: Vec<f64>,
    #[serde(default)]
    bias: f64,
}

/// Linear model over the row-major flattened window: `w · x + b`.
#[derive(Debug, Clone)]
pub struct LinearSequenceModel {
    name: String,
    sequence_length: usize,
    n_features: usize,
    weights: Vec<f64>,
    bias: f64,
}

impl LinearSequenceModel {
    /// Load a linear model from a JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Load a linear model from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let parsed: LinearSequenceModelJson = serde_json::from_str(json)
            .map_err(|e| ModelError::Invalid(format!("JSON parse error: {}", e)))?;

        if parsed.sequence_length == 0 || parsed.n_features == 0 {
            return Err(ModelError::Invalid(format!(
                "sequence_length ({}) and n_features ({}) must be > 0",
                parsed.sequence_length, parsed.n_features
            )));
        }

        let expected = parsed.sequence_length * parsed.n_features;
        if parsed.weights.len() != expected {
            return Err(ModelError::Invalid(format!(
                "Expected {} weights ({} x {}), got {}",
                expected,
                parsed.sequence_length,
                parsed.n_features,
                parsed.weights.len()
            )));
        }

        if !parsed.bias.is_finite() || parsed.weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::Invalid("weights and bias must be finite".to_string()));
        }

        Ok(Self {
            name: format!("Linear_{}", parsed.model_name),
            sequence_length: parsed.sequence_length,
            n_features: parsed.n_features,
            weights: parsed.weights,
            bias: parsed.bias,
        })
    }

    /// Window length this model was trained on.
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

impl SequenceModel for LinearSequenceModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, window: &ForecastWindow) -> Result<f64, ModelError> {
        if window.is_empty() {
            return Err(ModelError::EmptyWindow);
        }
        let inputs = window.flatten();
        if inputs.len() != self.weights.len() || window.n_features() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.weights.len(),
                actual: inputs.len(),
            });
        }

        let y = self
            .weights
            .iter()
            .zip(&inputs)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;

        if y.is_finite() { Ok(y) } else { Err(ModelError::NonFinite) }
    }
}

// =============================================================================
// Persistence baseline
// =============================================================================

/// Naive baseline: the next value equals the latest primary value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersistenceModel;

impl SequenceModel for PersistenceModel {
    fn name(&self) -> &str {
        "Persistence"
    }

    fn predict(&self, window: &ForecastWindow) -> Result<f64, ModelError> {
        let last = window.last().ok_or(ModelError::EmptyWindow)?;
        let y = *last.get(PRIMARY_FEATURE).ok_or(ModelError::DimensionMismatch {
            expected: PRIMARY_FEATURE + 1,
            actual: 0,
        })?;
        if y.is_finite() { Ok(y) } else { Err(ModelError::NonFinite) }
    }
}
