//! Basic statistical helpers.

/// Arithmetic mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 denominator).
///
/// Returns NaN for slices shorter than two elements.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Population standard deviation (n denominator).
///
/// Returns 0.0 for a single element and NaN for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    (sum_sq / values.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_of_simple_values() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5, epsilon = 1e-12);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        // var([2, 4, 4, 4, 5, 5, 7, 9]) with n-1 = 32/7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(
            sample_std(&values),
            (32.0f64 / 7.0).sqrt(),
            epsilon = 1e-12
        );
        assert!(sample_std(&[1.0]).is_nan());
    }

    #[test]
    fn population_std_uses_n() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_std(&values), 2.0, epsilon = 1e-12);
        assert_relative_eq!(population_std(&[3.0]), 0.0, epsilon = 1e-12);
    }
}
