//! Accuracy metrics for forecast evaluation.

use crate::error::{CubecastError, Result};

/// Mean squared error between actual and predicted values.
pub fn mse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(CubecastError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(CubecastError::LengthMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    Ok(sum / actual.len() as f64)
}

/// Root mean squared error, the model-selection criterion.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    mse(actual, predicted).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rmse_of_perfect_prediction_is_zero() {
        let actual = [1.0, 2.0, 3.0];
        assert_relative_eq!(rmse(&actual, &actual).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rmse_of_constant_offset() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [2.0, 3.0, 4.0];
        assert_relative_eq!(rmse(&actual, &predicted).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let result = rmse(&[1.0, 2.0], &[1.0]);
        assert_eq!(
            result,
            Err(CubecastError::LengthMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(rmse(&[], &[]), Err(CubecastError::EmptyData));
    }
}
