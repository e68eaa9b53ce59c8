//! Forecast model selection.
//!
//! Runs the two candidate forecasters on a derived yearly series, discards
//! any that report insufficient data, and keeps the one with the lower
//! held-out RMSE. Ties keep the earlier candidate in evaluation order
//! (tree-based first); callers must not depend on tie order.

use tracing::debug;

use crate::core::{ForecastPoint, Segment, SelectedForecast, YearSeries};
use crate::models::{
    CandidateForecast, CandidateModel, ExponentialSmoothing, GradientBoosting, ModelOutcome,
};
use crate::transform::ObservationRecord;

/// Default forecast horizon in years.
pub const DEFAULT_HORIZON: usize = 5;
/// Minimum series length for any forecast attempt.
pub const MIN_SERIES_POINTS: usize = 5;

/// Forecast one (entity, indicator) pair from committed observation
/// records.
///
/// Empty combinations are valid input and yield the insufficient-data
/// result, never an error.
pub fn select_forecast(
    records: &[ObservationRecord],
    entity: &str,
    indicator: &str,
    horizon: usize,
) -> SelectedForecast {
    let series = YearSeries::from_records(records, entity, indicator);
    select_forecast_for_series(&series, horizon)
}

/// Forecast a series the caller already holds.
pub fn select_forecast_for_series(series: &YearSeries, horizon: usize) -> SelectedForecast {
    if series.len() < MIN_SERIES_POINTS {
        return SelectedForecast::insufficient();
    }

    let test_size = holdout_size(series.len());
    let candidates: [&dyn CandidateModel; 2] = [&GradientBoosting, &ExponentialSmoothing];

    let mut best: Option<CandidateForecast> = None;
    for model in candidates {
        match model.run(series, horizon, test_size) {
            ModelOutcome::Fitted(candidate) => {
                debug!(model = candidate.name, rmse = candidate.rmse, "evaluated candidate");
                let better = best
                    .as_ref()
                    .map_or(true, |current| candidate.rmse < current.rmse);
                if better {
                    best = Some(candidate);
                }
            }
            ModelOutcome::Insufficient => {
                debug!(model = model.name(), "candidate excluded: insufficient data");
            }
        }
    }

    let Some(winner) = best else {
        return SelectedForecast::insufficient();
    };

    // The historical segment reproduces the input series exactly; the
    // tree-based candidate's own history omits the lag warm-up years.
    let mut points: Vec<ForecastPoint> = series
        .pairs()
        .map(|(year, value)| ForecastPoint {
            year,
            value,
            segment: Segment::Historical,
        })
        .collect();
    points.extend(winner.future.iter().map(|&(year, value)| ForecastPoint {
        year,
        value,
        segment: Segment::Forecast,
    }));
    points.sort_by_key(|point| point.year);

    debug!(model = winner.name, rmse = winner.rmse, "selected model");
    SelectedForecast {
        points,
        model: winner.name.to_string(),
    }
}

/// Holdout size scaling with series length: `min(5, max(2, len / 3))`.
fn holdout_size(len: usize) -> usize {
    (len / 3).clamp(2, 5)
}
