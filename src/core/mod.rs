//! Core data structures: yearly series and forecast results.

mod forecast;
mod series;

pub use forecast::{ForecastPoint, Segment, SelectedForecast, NO_FORECAST_MODEL};
pub use series::YearSeries;
