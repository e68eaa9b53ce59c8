//! Utility functions shared by the forecasting models.

pub mod metrics;
pub mod optimization;
pub mod stats;

pub use metrics::{mse, rmse};
pub use optimization::nelder_mead;
pub use stats::{mean, population_std, sample_std};
