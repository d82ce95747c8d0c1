//! Statistics primitives
//!
//! Shared math for every analyzer: Pearson correlation, least-squares slope,
//! confidence from sample size, strength and direction buckets, float
//! sanitization and rounding, and descriptive summaries.
//!
//! All functions are total: degenerate input (empty, mismatched lengths,
//! zero variance) yields 0.0 or an empty result, never NaN or a panic.

mod correlation;
mod numeric;
mod summary;
mod trend;

pub use correlation::{
    align_by_key, confidence_from_sample_size, correlation_sign, pearson_correlation,
    CorrelationStrength,
};
pub use numeric::{mean, relative_change, round_to, sanitize};
pub use summary::{describe, find_outliers, percentile, StatisticalSummary};
pub use trend::{interpret_direction, trend_slope, TrendDirection};
