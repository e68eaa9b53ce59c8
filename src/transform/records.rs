//! Observation records and the cube-to-records pipeline.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cube::{decode_flat_index, Cube, RawDataset};
use crate::error::{CubecastError, Result};
use crate::transform::indicator::{DetectIndicator, LabelIntersection};

/// Dimension id conventionally holding the reporting entity.
const GEO_DIM: &str = "geo";
/// Dimension id conventionally holding the measurement unit.
const UNIT_DIM: &str = "unit";
/// Dimension id conventionally holding the time period.
const TIME_DIM: &str = "time";

/// One tidy, labeled observation.
///
/// Immutable once built; the full set is the output of one transform call
/// and is shaped for bulk insertion into a tabular store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationRecord {
    pub dataset_code: String,
    pub country_code: String,
    pub country_name: String,
    pub indicator_code: String,
    pub indicator_label: String,
    pub unit_code: Option<String>,
    pub unit_label: Option<String>,
    /// Whole-year time period.
    pub year: i32,
    pub value: f64,
    pub load_timestamp: DateTime<Utc>,
}

/// Counts of entries absorbed by the soft-failure tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Sparse entries whose raw value was a non-numeric sentinel.
    pub non_numeric_skipped: usize,
    /// Entries whose indicator fell outside the allow-list.
    pub filtered_out: usize,
    /// Exact-duplicate rows removed.
    pub duplicates_removed: usize,
    /// Rows dropped for a missing required field.
    pub incomplete_dropped: usize,
}

/// Result of one transform call.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    pub records: Vec<ObservationRecord>,
    pub stats: TransformStats,
}

impl TransformOutcome {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            stats: TransformStats::default(),
        }
    }
}

/// Partially assembled row; cleaning decides whether it becomes a record.
struct PendingRecord {
    country_code: Option<String>,
    country_name: Option<String>,
    indicator_code: String,
    indicator_label: Option<String>,
    unit_code: Option<String>,
    unit_label: Option<String>,
    period: Option<String>,
    value: f64,
}

impl PendingRecord {
    fn dedup_key(&self) -> (String, String, String, String, String, String, String, u64) {
        let opt = |field: &Option<String>| field.clone().unwrap_or_default();
        (
            opt(&self.country_code),
            opt(&self.country_name),
            self.indicator_code.clone(),
            opt(&self.indicator_label),
            opt(&self.unit_code),
            opt(&self.unit_label),
            opt(&self.period),
            self.value.to_bits(),
        )
    }
}

/// Transform an upstream payload into tidy observation records using the
/// default label-intersection indicator detector.
pub fn transform_dataset(
    dataset_code: &str,
    raw: &RawDataset,
    targets: &[String],
) -> Result<TransformOutcome> {
    transform_dataset_with(dataset_code, raw, targets, &LabelIntersection)
}

/// Transform an upstream payload with a caller-supplied indicator detector.
///
/// Soft failures (no indicator dimension, unparseable cell values, rows
/// with missing required fields) are counted and skipped; hard failures
/// (structurally invalid cube, out-of-range flat index, non-year time
/// period) abort the dataset with a typed error.
pub fn transform_dataset_with(
    dataset_code: &str,
    raw: &RawDataset,
    targets: &[String],
    detector: &dyn DetectIndicator,
) -> Result<TransformOutcome> {
    let cube = Cube::from_raw(dataset_code, raw)?;
    let load_timestamp = Utc::now();

    let Some(indicator_dim) = detector.detect(cube.dims(), targets) else {
        warn!(
            dataset = %dataset_code,
            "no indicator dimension matched the target allow-list; skipping dataset"
        );
        return Ok(TransformOutcome::empty());
    };

    let geo = cube.dimension(GEO_DIM);
    let unit = cube.dimension(UNIT_DIM);
    let time = cube.dimension(TIME_DIM);

    let mut stats = TransformStats::default();
    let mut pending = Vec::new();

    for (key, cell) in cube.values() {
        let Some(value) = parse_cell(cell) else {
            stats.non_numeric_skipped += 1;
            continue;
        };

        let index: u64 =
            key.parse()
                .map_err(|_| CubecastError::InvalidFlatIndexKey {
                    dataset: dataset_code.to_string(),
                    key: key.clone(),
                })?;
        let coords = decode_flat_index(index, cube.sizes())?;

        let code_at = |dim_position: usize| cube.dims()[dim_position].code(coords[dim_position]);

        let indicator_code = code_at(indicator_dim).to_string();
        if !targets.contains(&indicator_code) {
            stats.filtered_out += 1;
            continue;
        }
        let indicator_label = cube.dims()[indicator_dim]
            .label(&indicator_code)
            .map(str::to_string);

        let (country_code, country_name) = match geo {
            Some((position, dim)) => {
                let code = code_at(position);
                (
                    Some(code.to_string()),
                    Some(dim.label_or_code(code).to_string()),
                )
            }
            None => (None, None),
        };
        let (unit_code, unit_label) = match unit {
            Some((position, dim)) => {
                let code = code_at(position);
                (
                    Some(code.to_string()),
                    dim.label(code).map(str::to_string),
                )
            }
            None => (None, None),
        };
        let period = time.map(|(position, _)| code_at(position).to_string());

        pending.push(PendingRecord {
            country_code,
            country_name,
            indicator_code,
            indicator_label,
            unit_code,
            unit_label,
            period,
            value,
        });
    }

    // Remove exact duplicates, then drop rows missing a required field.
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(pending.len());
    for row in pending {
        if !seen.insert(row.dedup_key()) {
            stats.duplicates_removed += 1;
            continue;
        }

        let (Some(country_code), Some(country_name), Some(indicator_label), Some(period)) = (
            row.country_code,
            row.country_name,
            row.indicator_label,
            row.period,
        ) else {
            stats.incomplete_dropped += 1;
            continue;
        };

        let year = parse_year(dataset_code, &period)?;

        records.push(ObservationRecord {
            dataset_code: dataset_code.to_string(),
            country_code,
            country_name,
            indicator_code: row.indicator_code,
            indicator_label,
            unit_code: row.unit_code,
            unit_label: row.unit_label,
            year,
            value: row.value,
            load_timestamp,
        });
    }

    debug!(
        dataset = %dataset_code,
        records = records.len(),
        non_numeric = stats.non_numeric_skipped,
        filtered = stats.filtered_out,
        duplicates = stats.duplicates_removed,
        incomplete = stats.incomplete_dropped,
        "transformed dataset"
    );

    Ok(TransformOutcome { records, stats })
}

/// Parse a raw cell into a finite number.
///
/// Numeric strings count as numbers; anything else (":", "na", nested
/// structures, non-finite values) is a sentinel to skip.
fn parse_cell(cell: &Value) -> Option<f64> {
    let value = match cell {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Parse a whole-year period; anything but a 4-digit year is a contract
/// violation for the dataset.
fn parse_year(dataset_code: &str, period: &str) -> Result<i32> {
    let trimmed = period.trim();
    let valid = trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit());
    if !valid {
        return Err(CubecastError::InvalidTimePeriod {
            dataset: dataset_code.to_string(),
            period: period.to_string(),
        });
    }
    trimmed
        .parse()
        .map_err(|_| CubecastError::InvalidTimePeriod {
            dataset: dataset_code.to_string(),
            period: period.to_string(),
        })
}
