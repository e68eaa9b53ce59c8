//! Gradient-boosted regression trees over lag features.
//!
//! Trains on the supervised table from [`crate::features`], holds out the
//! last `test_size` rows chronologically for RMSE evaluation, then forecasts
//! recursively: each step's prediction is appended to the working history
//! and feeds the next step's lag and rolling features. That recursion
//! compounds its own errors by design, so multi-step accuracy degrades
//! faster than the held-out single-split RMSE suggests.

mod tree;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use self::tree::RegressionTree;

use crate::core::YearSeries;
use crate::features::{build_supervised, SupervisedRow, LAG_DEPTH, ROLL_WINDOW};
use crate::models::{CandidateForecast, CandidateModel, ModelOutcome};
use crate::utils::metrics::rmse;
use crate::utils::stats::{mean, population_std};

/// Boosting rounds.
const N_TREES: usize = 300;
/// Depth limit per tree.
const MAX_DEPTH: usize = 3;
/// Shrinkage applied to every tree's contribution.
const LEARNING_RATE: f64 = 0.05;
/// Fraction of training rows sampled per round.
const SUBSAMPLE: f64 = 0.8;
/// Seed for the row subsampler; fixed so selection is reproducible.
const SEED: u64 = 42;

/// The tree-based candidate forecaster.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientBoosting;

impl CandidateModel for GradientBoosting {
    fn run(&self, series: &YearSeries, horizon: usize, test_size: usize) -> ModelOutcome {
        let table = build_supervised(series);
        if table.is_empty() || table.len() <= test_size + 1 {
            return ModelOutcome::Insufficient;
        }

        let rows: Vec<Vec<f64>> = table.iter().map(SupervisedRow::features).collect();
        let targets: Vec<f64> = table.iter().map(|row| row.value).collect();

        // Chronological split: the most recent rows are the holdout.
        let split = table.len() - test_size;
        let model = BoostedEnsemble::fit(&rows[..split], &targets[..split]);

        let predicted: Vec<f64> = rows[split..].iter().map(|row| model.predict(row)).collect();
        let Ok(score) = rmse(&targets[split..], &predicted) else {
            return ModelOutcome::Insufficient;
        };

        let history: Vec<(i32, f64)> = table.iter().map(|row| (row.year, row.value)).collect();
        let future = recursive_forecast(&model, &history, horizon);

        ModelOutcome::Fitted(CandidateForecast {
            history,
            future,
            rmse: score,
            name: self.name(),
        })
    }

    fn name(&self) -> &'static str {
        "GradientBoosting"
    }
}

/// Forecast `horizon` years past the end of history, feeding each
/// prediction back as known history for the following step.
fn recursive_forecast(
    model: &BoostedEnsemble,
    history: &[(i32, f64)],
    horizon: usize,
) -> Vec<(i32, f64)> {
    let Some(&(last_year, _)) = history.last() else {
        return Vec::new();
    };
    let mut values: Vec<f64> = history.iter().map(|&(_, value)| value).collect();
    let mut future = Vec::with_capacity(horizon);

    for step in 1..=horizon {
        let year = last_year + step as i32;

        let mut features = Vec::with_capacity(3 + LAG_DEPTH);
        features.push(year as f64);
        for lag in 1..=LAG_DEPTH {
            // Pad with the oldest value when history is shorter than the
            // lag depth; unreachable in practice since fitting requires
            // more rows than lags.
            let value = if values.len() >= lag {
                values[values.len() - lag]
            } else {
                values[0]
            };
            features.push(value);
        }
        let window = &values[values.len().saturating_sub(ROLL_WINDOW)..];
        features.push(mean(window));
        features.push(if window.len() > 1 {
            population_std(window)
        } else {
            0.0
        });

        let predicted = model.predict(&features);
        values.push(predicted);
        future.push((year, predicted));
    }
    future
}

/// A fitted boosting ensemble: a constant base prediction plus shrunken
/// tree corrections.
#[derive(Debug, Clone)]
struct BoostedEnsemble {
    base: f64,
    trees: Vec<RegressionTree>,
}

impl BoostedEnsemble {
    fn fit(rows: &[Vec<f64>], targets: &[f64]) -> Self {
        let n = targets.len();
        let base = mean(targets);
        let mut rng = StdRng::seed_from_u64(SEED);

        let mut current: Vec<f64> = vec![base; n];
        let mut trees = Vec::with_capacity(N_TREES);
        let sample_size = ((n as f64 * SUBSAMPLE).round() as usize).clamp(1, n);

        for _ in 0..N_TREES {
            let residuals: Vec<f64> = targets
                .iter()
                .zip(&current)
                .map(|(y, f)| y - f)
                .collect();

            let mut indices: Vec<usize> = (0..n).collect();
            indices.shuffle(&mut rng);
            indices.truncate(sample_size);

            let tree = RegressionTree::fit(rows, &residuals, &indices, MAX_DEPTH, 1);
            for (prediction, row) in current.iter_mut().zip(rows) {
                *prediction += LEARNING_RATE * tree.predict(row);
            }
            trees.push(tree);
        }

        Self { base, trees }
    }

    fn predict(&self, row: &[f64]) -> f64 {
        self.base
            + LEARNING_RATE
                * self
                    .trees
                    .iter()
                    .map(|tree| tree.predict(row))
                    .sum::<f64>()
    }
}
