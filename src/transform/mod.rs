//! Cube-to-records transformation.
//!
//! Turns a validated sparse cube into tidy, labeled observation records:
//! detect the indicator dimension, decode every populated cell, filter to
//! the caller's indicator allow-list, deduplicate and drop incomplete rows,
//! and parse whole-year time periods.

mod indicator;
mod records;

pub use indicator::{DetectIndicator, LabelIntersection};
pub use records::{
    transform_dataset, transform_dataset_with, ObservationRecord, TransformOutcome, TransformStats,
};
