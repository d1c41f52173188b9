//! Recursive multi-step forecasting.
//!
//! ```text
//! Series ──► feature_rows ──► last N rows ──► Scaler::transform ──► ForecastWindow
//!                                                                       │
//!                         ┌─────────────── horizon × ───────────────────┤
//!                         ▼                                             │
//!                SequenceModel::predict ──► last row, slot 0 replaced ──┘
//!                         │
//!                         ▼
//!      zero row + prediction ──► Scaler::inverse_transform ──► slot 0
//! ```
//!
//! Auxiliary features are frozen at their last observed values while
//! stepping; only the primary slot advances.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use types::{PRIMARY_FEATURE, Series};

use crate::config::ForecastConfig;
use crate::error::{ForecastError, ScalerError};
use crate::features::feature_rows;
use crate::model::SequenceModel;
use crate::scaler::Scaler;
use crate::window::ForecastWindow;

/// Result of a forecast run, in the units of the input closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// First step of `multi_step`.
    pub next_step: f64,
    /// One value per step, `horizon` entries.
    pub multi_step: Vec<f64>,
    /// Name of the model that produced the forecast.
    pub model: String,
    pub sequence_length: usize,
}

/// Drives a [`SequenceModel`] recursively over scaled feature windows.
#[derive(Clone)]
pub struct ForecastEngine {
    model: Arc<dyn SequenceModel>,
    scaler: Arc<dyn Scaler>,
    config: ForecastConfig,
}

impl ForecastEngine {
    pub fn new(
        model: Arc<dyn SequenceModel>,
        scaler: Arc<dyn Scaler>,
        config: ForecastConfig,
    ) -> Self {
        Self {
            model,
            scaler,
            config,
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Scaled window over the most recent `sequence_length` feature rows.
    pub fn initial_window(&self, series: &Series) -> Result<ForecastWindow, ForecastError> {
        let seq = self.config.sequence_length;
        if seq == 0 {
            return Err(ForecastError::InvalidSequenceLength);
        }

        let rows = feature_rows(series, self.config.rsi_period, self.config.ema_period);
        if rows.len() < seq {
            return Err(ForecastError::InsufficientData {
                required: seq,
                available: rows.len(),
            });
        }

        let scaled = self.scaler.transform(&rows[rows.len() - seq..])?;
        Ok(ForecastWindow::new(scaled))
    }

    /// Predict once and advance `window` by the predicted row.
    ///
    /// Returns the scaled prediction.
    pub fn step(&self, window: &mut ForecastWindow) -> Result<f64, ForecastError> {
        let y = self.model.predict(window)?;

        let mut row = window.last().cloned().unwrap_or_default();
        match row.get_mut(PRIMARY_FEATURE) {
            Some(slot) => *slot = y,
            None => row.push(y),
        }
        window.push(row);
        Ok(y)
    }

    /// One-step forecast in price units.
    pub fn predict_next(&self, series: &Series) -> Result<f64, ForecastError> {
        Ok(self.run(series, 1)?.next_step)
    }

    /// Forecast `horizon` steps ahead.
    ///
    /// Either every step succeeds or the whole run fails.
    pub fn run(&self, series: &Series, horizon: usize) -> Result<ForecastReport, ForecastError> {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon);
        }

        let mut window = self.initial_window(series)?;
        let mut scaled = Vec::with_capacity(horizon);
        for step in 0..horizon {
            let y = self.step(&mut window)?;
            debug!(symbol = series.symbol(), step, scaled = y, "forecast step");
            scaled.push(y);
        }

        let multi_step = self.unscale(&scaled)?;
        let next_step = *multi_step.first().ok_or(ScalerError::DimensionMismatch {
            expected: horizon,
            actual: 0,
        })?;
        debug!(
            symbol = series.symbol(),
            model = self.model.name(),
            horizon,
            "forecast complete"
        );

        Ok(ForecastReport {
            next_step,
            multi_step,
            model: self.model.name().to_string(),
            sequence_length: self.config.sequence_length,
        })
    }

    /// Forecast with the configured default horizon.
    pub fn run_default(&self, series: &Series) -> Result<ForecastReport, ForecastError> {
        self.run(series, self.config.horizon)
    }

    /// Map scaled primary predictions back to price units.
    fn unscale(&self, scaled: &[f64]) -> Result<Vec<f64>, ScalerError> {
        let width = self.scaler.n_features();
        if width <= PRIMARY_FEATURE {
            return Err(ScalerError::DimensionMismatch {
                expected: PRIMARY_FEATURE + 1,
                actual: width,
            });
        }

        let rows: Vec<Vec<f64>> = scaled
            .iter()
            .map(|&y| {
                let mut row = vec![0.0; width];
                row[PRIMARY_FEATURE] = y;
                row
            })
            .collect();

        let restored = self.scaler.inverse_transform(&rows)?;
        if restored.len() != rows.len() {
            return Err(ScalerError::DimensionMismatch {
                expected: rows.len(),
                actual: restored.len(),
            });
        }

        restored
            .iter()
            .map(|row| {
                row.get(PRIMARY_FEATURE)
                    .copied()
                    .ok_or(ScalerError::DimensionMismatch {
                        expected: width,
                        actual: row.len(),
                    })
            })
            .collect()
    }
}

impl std::fmt::Debug for ForecastEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastEngine")
            .field("model", &self.model.name())
            .field("n_features", &self.scaler.n_features())
            .field("config", &self.config)
            .finish()
    }
}
