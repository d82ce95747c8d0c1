//! Full analysis runs
//!
//! [`HealthAnalytics`] filters a user's entries to a range, runs every
//! analyzer over them and collects the results into an [`AnalyticsReport`].

mod pipeline;
mod types;

pub use pipeline::HealthAnalytics;
pub use types::{AnalyticsReport, PatternReport, SummaryReport, TrendReport};
