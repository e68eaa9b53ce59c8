//! Candidate forecasting models.
//!
//! Both models share one contract: given a yearly series, a horizon and a
//! holdout size, either produce an evaluated forecast or report that the
//! series is too short. Data scarcity is an ordinary outcome here, never an
//! error.

mod boosted;
mod smoothing;

pub use boosted::GradientBoosting;
pub use smoothing::ExponentialSmoothing;

use crate::core::YearSeries;

/// An evaluated candidate: its view of history, the horizon forecast, the
/// held-out RMSE used for selection, and the model name.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateForecast {
    /// `(year, value)` pairs the model trained against.
    pub history: Vec<(i32, f64)>,
    /// `(year, value)` pairs for the forecast horizon.
    pub future: Vec<(i32, f64)>,
    /// Root mean squared error on the held-out tail of history.
    pub rmse: f64,
    pub name: &'static str,
}

/// Outcome of running one candidate model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutcome {
    /// The model trained, evaluated and forecast successfully.
    Fitted(CandidateForecast),
    /// The series is too short for this model's requirements.
    Insufficient,
}

/// Common interface for the competing forecasters.
///
/// Object-safe so the selector can iterate `&dyn CandidateModel` in a fixed
/// evaluation order.
pub trait CandidateModel {
    /// Train on the series, evaluate on the last `test_size` points, and
    /// forecast `horizon` years past the end of history.
    fn run(&self, series: &YearSeries, horizon: usize, test_size: usize) -> ModelOutcome;

    /// Display name reported for a winning candidate.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_series(n: usize) -> YearSeries {
        YearSeries::from_pairs((0..n).map(|i| (2000 + i as i32, 10.0 + 2.0 * i as f64)))
    }

    #[test]
    fn models_are_object_safe() {
        let models: [&dyn CandidateModel; 2] = [&GradientBoosting, &ExponentialSmoothing];
        let names: Vec<_> = models.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["GradientBoosting", "ExponentialSmoothing"]);
    }

    #[test]
    fn both_models_fit_a_long_series() {
        let series = linear_series(15);
        for model in [&GradientBoosting as &dyn CandidateModel, &ExponentialSmoothing] {
            match model.run(&series, 5, 3) {
                ModelOutcome::Fitted(candidate) => {
                    assert_eq!(candidate.future.len(), 5);
                    assert!(candidate.rmse.is_finite());
                }
                ModelOutcome::Insufficient => {
                    panic!("{} reported insufficient data", model.name())
                }
            }
        }
    }

    #[test]
    fn both_models_decline_a_tiny_series() {
        let series = linear_series(4);
        for model in [&GradientBoosting as &dyn CandidateModel, &ExponentialSmoothing] {
            assert_eq!(model.run(&series, 5, 5), ModelOutcome::Insufficient);
        }
    }
}
