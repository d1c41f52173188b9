//! Error types for the forecast pipeline.

use thiserror::Error;

/// Failures raised by a sequence model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Window shape does not match what the model was built for.
    #[error("model expects {expected} inputs, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("cannot predict from an empty window")]
    EmptyWindow,

    /// Model file parsed but failed validation.
    #[error("invalid model: {0}")]
    Invalid(String),

    #[error("failed to read model {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("model produced a non-finite prediction")]
    NonFinite,
}

/// Failures raised by a scaler.
#[derive(Debug, Error)]
pub enum ScalerError {
    /// Row width does not match the fitted feature count.
    #[error("scaler expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("cannot fit a scaler on zero rows")]
    EmptyInput,

    /// Scaler file parsed but failed validation.
    #[error("invalid scaler: {0}")]
    Invalid(String),

    #[error("failed to read scaler {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures of a forecast run. No partial forecast is ever returned.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Not enough feature rows to fill the window.
    #[error("insufficient data: need {required} feature rows, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("forecast horizon must be at least 1")]
    InvalidHorizon,

    #[error("sequence length must be at least 1")]
    InvalidSequenceLength,

    #[error("model failure: {0}")]
    Model(#[from] ModelError),

    #[error("scaler failure: {0}")]
    Scaler(#[from] ScalerError),
}
