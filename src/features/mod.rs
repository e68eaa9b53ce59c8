//! Supervised feature table for the tree-based forecaster.
//!
//! Converts a yearly series into lag and rolling-statistic rows. Lags are
//! taken by row offset within the sorted series, not by literal year
//! arithmetic, so gap years simply shift the window.

use crate::core::YearSeries;
use crate::utils::stats::{mean, sample_std};

/// Number of lagged values per row.
pub const LAG_DEPTH: usize = 3;
/// Trailing window for the rolling statistics.
pub const ROLL_WINDOW: usize = 3;

/// One fully populated supervised row.
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisedRow {
    pub year: i32,
    /// Target: the raw series value at this row.
    pub value: f64,
    /// `lags[0]` is lag-1 (previous row), `lags[2]` is lag-3.
    pub lags: [f64; LAG_DEPTH],
    /// Mean of the trailing window ending at this row.
    pub roll_mean: f64,
    /// Sample standard deviation of the trailing window.
    pub roll_std: f64,
}

impl SupervisedRow {
    /// Model input vector: `[year, lag1, lag2, lag3, roll_mean, roll_std]`.
    pub fn features(&self) -> Vec<f64> {
        let mut features = Vec::with_capacity(3 + LAG_DEPTH);
        features.push(self.year as f64);
        features.extend_from_slice(&self.lags);
        features.push(self.roll_mean);
        features.push(self.roll_std);
        features
    }
}

/// Build the supervised table for a series.
///
/// Rows without a full lag depth or trailing window are dropped, so the
/// first `max(LAG_DEPTH, ROLL_WINDOW - 1)` rows of the series never appear.
/// Series shorter than `LAG_DEPTH + 1` points produce an empty table, which
/// the tree-based forecaster treats as insufficient data.
pub fn build_supervised(series: &YearSeries) -> Vec<SupervisedRow> {
    let years = series.years();
    let values = series.values();
    let start = LAG_DEPTH.max(ROLL_WINDOW - 1);
    if values.len() <= start {
        return Vec::new();
    }

    let mut rows = Vec::with_capacity(values.len() - start);
    for i in start..values.len() {
        let mut lags = [0.0; LAG_DEPTH];
        for (offset, lag) in lags.iter_mut().enumerate() {
            *lag = values[i - 1 - offset];
        }
        let window = &values[i + 1 - ROLL_WINDOW..=i];
        rows.push(SupervisedRow {
            year: years[i],
            value: values[i],
            lags,
            roll_mean: mean(window),
            roll_std: sample_std(window),
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series_of(values: &[f64]) -> YearSeries {
        YearSeries::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (2000 + i as i32, v)),
        )
    }

    #[test]
    fn ten_point_series_yields_seven_rows() {
        let values: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let rows = build_supervised(&series_of(&values));
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].year, 2003);
    }

    #[test]
    fn lags_reference_prior_rows_by_offset() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        let rows = build_supervised(&series_of(&values));

        // Row for value 40: lag1=30, lag2=20, lag3=10.
        assert_eq!(rows[0].value, 40.0);
        assert_eq!(rows[0].lags, [30.0, 20.0, 10.0]);
        // Next row shifts by one.
        assert_eq!(rows[1].lags, [40.0, 30.0, 20.0]);
    }

    #[test]
    fn rolling_stats_cover_the_trailing_window() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        let rows = build_supervised(&series_of(&values));

        // Window for value 40 is [20, 30, 40].
        assert_relative_eq!(rows[0].roll_mean, 30.0, epsilon = 1e-12);
        assert_relative_eq!(rows[0].roll_std, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn short_series_produce_an_empty_table() {
        let values = [1.0, 2.0, 3.0];
        assert!(build_supervised(&series_of(&values)).is_empty());
    }

    #[test]
    fn feature_vector_layout_is_stable() {
        let values = [10.0, 20.0, 30.0, 40.0];
        let rows = build_supervised(&series_of(&values));
        let features = rows[0].features();

        assert_eq!(features.len(), 6);
        assert_relative_eq!(features[0], 2003.0, epsilon = 1e-12);
        assert_relative_eq!(features[1], 30.0, epsilon = 1e-12); // lag1
        assert_relative_eq!(features[4], 30.0, epsilon = 1e-12); // roll_mean
    }
}
