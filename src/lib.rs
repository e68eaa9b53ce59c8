//! # cubecast
//!
//! Turns sparse, flat-indexed statistical data cubes into tidy labeled
//! observation records, and produces short-horizon yearly forecasts by
//! training two competing models and keeping the more accurate one.
//!
//! The crate is a pure computation library: fetching payloads, persisting
//! records and rendering results belong to external collaborators. Two
//! subsystems are exposed:
//!
//! - [`cube`] + [`transform`]: decode a cube's mixed-radix flat indices and
//!   assemble filtered, deduplicated, cleaned observation records.
//! - [`features`] + [`models`] + [`selector`]: build a lag/rolling feature
//!   table from a yearly series, evaluate a gradient-boosted tree model and
//!   an exponential-smoothing model on held-out history, and select by RMSE.
//!
//! ```
//! use cubecast::core::YearSeries;
//! use cubecast::selector::{select_forecast_for_series, DEFAULT_HORIZON};
//!
//! let series = YearSeries::from_pairs((0..12).map(|i| (2010 + i, 100.0 + 3.0 * i as f64)));
//! let result = select_forecast_for_series(&series, DEFAULT_HORIZON);
//!
//! assert_eq!(result.historical().count(), 12);
//! assert_eq!(result.forecast().count(), DEFAULT_HORIZON);
//! ```

pub mod core;
pub mod cube;
pub mod error;
pub mod features;
pub mod models;
pub mod selector;
pub mod transform;
pub mod utils;

pub use error::{CubecastError, Result};

pub mod prelude {
    pub use crate::core::{ForecastPoint, Segment, SelectedForecast, YearSeries};
    pub use crate::cube::{Cube, RawDataset};
    pub use crate::error::{CubecastError, Result};
    pub use crate::models::{CandidateModel, ModelOutcome};
    pub use crate::selector::{select_forecast, select_forecast_for_series};
    pub use crate::transform::{transform_dataset, ObservationRecord, TransformOutcome};
}
