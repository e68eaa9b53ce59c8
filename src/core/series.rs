//! Univariate yearly time series.

use std::collections::BTreeMap;

use crate::transform::ObservationRecord;

/// An ascending yearly series with one value per year.
///
/// Duplicate same-year observations are reduced by averaging at
/// construction time. Owned exclusively by the forecasting call that
/// derives it; never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearSeries {
    years: Vec<i32>,
    values: Vec<f64>,
}

impl YearSeries {
    /// Build a series from raw `(year, value)` pairs, averaging duplicate
    /// years and sorting ascending.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (i32, f64)>) -> Self {
        let mut grouped: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
        for (year, value) in pairs {
            let entry = grouped.entry(year).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }

        let mut years = Vec::with_capacity(grouped.len());
        let mut values = Vec::with_capacity(grouped.len());
        for (year, (sum, count)) in grouped {
            years.push(year);
            values.push(sum / count as f64);
        }
        Self { years, values }
    }

    /// Extract the series for one (entity, indicator) pair from committed
    /// observation records.
    pub fn from_records(records: &[ObservationRecord], entity: &str, indicator: &str) -> Self {
        Self::from_pairs(records.iter().filter_map(|record| {
            (record.country_code == entity && record.indicator_code == indicator)
                .then_some((record.year, record.value))
        }))
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn last_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// Iterate `(year, value)` pairs in ascending year order.
    pub fn pairs(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years.iter().copied().zip(self.values.iter().copied())
    }
}
