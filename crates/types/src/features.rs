//! Feature vector types for the sequence model.

/// One normalized (or raw) model input row.
///
/// Slot 0 is always the primary target (close price); the remaining slots
/// are auxiliary indicators in [`FEATURE_NAMES`] order.
pub type FeatureVector = Vec<f64>;

/// Index of the primary (forecast) feature.
pub const PRIMARY_FEATURE: usize = 0;

/// Feature names in extraction order.
pub const FEATURE_NAMES: [&str; 3] = ["close", "rsi_14", "ema_30"];

/// Number of features per row.
pub const N_FEATURES: usize = FEATURE_NAMES.len();
