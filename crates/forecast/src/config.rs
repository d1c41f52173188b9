//! Forecast pipeline configuration.

use serde::{Deserialize, Serialize};

/// Parameters for a forecast run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Feature rows in the model window.
    pub sequence_length: usize,
    /// Default number of steps for [`crate::ForecastEngine::run_default`].
    pub horizon: usize,
    /// RSI feature period.
    pub rsi_period: usize,
    /// EMA feature period.
    pub ema_period: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            sequence_length: 30,
            horizon: 7,
            rsi_period: 14,
            ema_period: 30,
        }
    }
}
