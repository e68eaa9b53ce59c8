//! Error types for the cubecast library.
//!
//! Only contract violations surface as errors. Sparse or missing data is
//! handled in-band: the transformer counts and skips bad entries, and the
//! forecasting layer reports insufficient data as an ordinary outcome.

use thiserror::Error;

/// Result type alias for cubecast operations.
pub type Result<T> = std::result::Result<T, CubecastError>;

/// Errors that can occur while decoding cubes or evaluating forecasts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CubecastError {
    /// A dimension listed in `id` has no entry in the dimension map.
    #[error("dataset {dataset}: dimension `{dimension}` missing from dimension map")]
    MissingDimension { dataset: String, dimension: String },

    /// The `id` and `size` lists disagree in length.
    #[error("dataset {dataset}: {ids} dimension ids but {sizes} sizes")]
    SizeMismatch {
        dataset: String,
        ids: usize,
        sizes: usize,
    },

    /// A dimension's declared size disagrees with its category count.
    #[error(
        "dataset {dataset}: dimension `{dimension}` declares size {declared} \
         but has {categories} categories"
    )]
    CategoryCountMismatch {
        dataset: String,
        dimension: String,
        declared: usize,
        categories: usize,
    },

    /// Category positions are not a contiguous permutation of `[0, size)`.
    #[error("dimension `{dimension}`: {detail}")]
    InvalidCategoryIndex { dimension: String, detail: String },

    /// A sparse-value key could not be parsed as a non-negative integer.
    #[error("dataset {dataset}: invalid flat index key `{key}`")]
    InvalidFlatIndexKey { dataset: String, key: String },

    /// A flat index addresses a cell outside the cube.
    #[error("flat index {index} out of range for cube capacity {capacity}")]
    FlatIndexOutOfRange { index: u64, capacity: u64 },

    /// A coordinate has the wrong number of positions for the cube.
    #[error("coordinate has {got} positions, cube has {expected} dimensions")]
    CoordinateMismatch { expected: usize, got: usize },

    /// A coordinate position exceeds its dimension size.
    #[error("position {position} out of range for dimension {dimension} (size {size})")]
    PositionOutOfRange {
        dimension: usize,
        position: usize,
        size: usize,
    },

    /// A time period does not express a whole year.
    #[error("dataset {dataset}: time period `{period}` is not a 4-digit year")]
    InvalidTimePeriod { dataset: String, period: String },

    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Paired slices disagree in length.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}
