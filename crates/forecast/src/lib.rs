//! Recursive price forecasting over a pretrained sequence model.
//!
//! Feature rows `[close, rsi, ema]` are extracted from a [`types::Series`],
//! scaled into a fixed-length [`ForecastWindow`] and fed to a
//! [`SequenceModel`] one step at a time. Predictions are mapped back to
//! price units through the same [`Scaler`].
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use forecast::{ForecastConfig, ForecastEngine, MinMaxScaler, PersistenceModel, feature_rows};
//! use types::{Observation, Series};
//!
//! let obs = (0..60)
//!     .map(|i| Observation::new(i, 1.0, 1.0, 1.0, 100.0 + i as f64, 10.0))
//!     .collect();
//! let series = Series::new("BTC", obs).unwrap();
//!
//! let config = ForecastConfig::default();
//! let rows = feature_rows(&series, config.rsi_period, config.ema_period);
//! let scaler = MinMaxScaler::fit(&rows).unwrap();
//! let engine = ForecastEngine::new(Arc::new(PersistenceModel), Arc::new(scaler), config);
//!
//! let report = engine.run(&series, 3).unwrap();
//! assert_eq!(report.multi_step.len(), 3);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod model;
pub mod scaler;
pub mod window;

pub use config::ForecastConfig;
pub use engine::{ForecastEngine, ForecastReport};
pub use error::{ForecastError, ModelError, ScalerError};
pub use features::feature_rows;
pub use model::{LinearSequenceModel, PersistenceModel, SequenceModel};
pub use scaler::{MinMaxScaler, Scaler};
pub use window::ForecastWindow;
