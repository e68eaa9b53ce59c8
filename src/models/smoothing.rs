//! Exponential smoothing with additive trend (Holt's linear method).
//!
//! Level and trend recursions:
//! - `l_t = α × y_t + (1-α) × (l_{t-1} + b_{t-1})`
//! - `b_t = β × (l_t - l_{t-1}) + (1-β) × b_{t-1}`
//! - forecast: `ŷ_{t+h} = l_t + h × b_t`
//!
//! The smoothing weights are chosen per fit by minimizing in-sample SSE.
//! Evaluation fits on all-but-last `test_size` points; the final forecast
//! refits on the full series, so the reported RMSE approximates rather than
//! measures the refit model's accuracy.

use crate::core::YearSeries;
use crate::models::{CandidateForecast, CandidateModel, ModelOutcome};
use crate::utils::metrics::rmse;
use crate::utils::optimization::nelder_mead;

const WEIGHT_BOUNDS: (f64, f64) = (1e-4, 0.9999);
const INITIAL_WEIGHTS: [f64; 2] = [0.3, 0.1];

/// The smoothing candidate forecaster.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialSmoothing;

impl CandidateModel for ExponentialSmoothing {
    fn run(&self, series: &YearSeries, horizon: usize, test_size: usize) -> ModelOutcome {
        let values = series.values();
        if values.len() <= test_size + 2 {
            return ModelOutcome::Insufficient;
        }

        // Evaluate on the held-out tail.
        let train = &values[..values.len() - test_size];
        let holdout = &values[values.len() - test_size..];
        let (level, trend) = fit_state(train);
        let predicted: Vec<f64> = (1..=test_size)
            .map(|h| level + h as f64 * trend)
            .collect();
        let Ok(score) = rmse(holdout, &predicted) else {
            return ModelOutcome::Insufficient;
        };

        // Refit on the full series for the horizon forecast.
        let (level, trend) = fit_state(values);
        let Some(last_year) = series.last_year() else {
            return ModelOutcome::Insufficient;
        };
        let future: Vec<(i32, f64)> = (1..=horizon)
            .map(|h| (last_year + h as i32, level + h as f64 * trend))
            .collect();

        ModelOutcome::Fitted(CandidateForecast {
            history: series.pairs().collect(),
            future,
            rmse: score,
            name: self.name(),
        })
    }

    fn name(&self) -> &'static str {
        "ExponentialSmoothing"
    }
}

/// Optimize the smoothing weights on `values` and return the final
/// (level, trend) state.
fn fit_state(values: &[f64]) -> (f64, f64) {
    let best = nelder_mead(
        |params| sse(values, params[0], params[1]),
        &INITIAL_WEIGHTS,
        &[WEIGHT_BOUNDS, WEIGHT_BOUNDS],
        1000,
        1e-8,
    );
    smooth(values, best[0], best[1])
}

/// Run the recursions over the series, returning the final state.
///
/// Initial level is the first observation; initial trend is the first
/// difference. Requires at least two values, which every caller guarantees
/// through the insufficient-data gate.
fn smooth(values: &[f64], alpha: f64, beta: f64) -> (f64, f64) {
    let mut level = values[0];
    let mut trend = values[1] - values[0];

    for &y in &values[1..] {
        let previous_level = level;
        level = alpha * y + (1.0 - alpha) * (previous_level + trend);
        trend = beta * (level - previous_level) + (1.0 - beta) * trend;
    }
    (level, trend)
}

/// One-step-ahead in-sample squared error for a weight pair.
fn sse(values: &[f64], alpha: f64, beta: f64) -> f64 {
    if values.len() < 2 {
        return f64::MAX;
    }
    let mut level = values[0];
    let mut trend = values[1] - values[0];
    let mut total = 0.0;

    for &y in &values[1..] {
        let forecast = level + trend;
        let error = y - forecast;
        total += error * error;

        let previous_level = level;
        level = alpha * y + (1.0 - alpha) * (previous_level + trend);
        trend = beta * (level - previous_level) + (1.0 - beta) * trend;
    }
    total
}
