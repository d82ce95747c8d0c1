//! Trend, pattern and correlation analysis
//!
//! Each analyzer owns an immutable copy of its config section and is safe to
//! share across threads. Insufficient data never produces an error:
//!
//! - **Trends**: weekly trend lines per metric, overall direction, moving
//!   averages and plain-language significant changes
//! - **Patterns**: eating, bowel, symptom and lifestyle summaries
//! - **Correlations**: meal attributes against bowel and symptom outcomes
//! - **Medications**: before/after effect around each start date
//! - **Triggers**: meal attributes and habits followed by adverse events
//!
//! # Example
//!
//! ```rust,ignore
//! use health_analytics::analysis::{CorrelationAnalyzer, TrendAnalyzer};
//!
//! let trends = TrendAnalyzer::default().bowel_trends(&events, &range);
//! let correlations = CorrelationAnalyzer::default().meal_bowel_correlations(&meals, &events);
//! ```

mod correlation;
mod direction;
mod medication;
mod patterns;
mod triggers;
mod trends;
mod types;

pub use correlation::CorrelationAnalyzer;
pub use medication::medication_effectiveness;
pub use patterns::{bowel_regularity, PatternAnalyzer};
pub use trends::{
    MetricSeries, TrendAnalyzer, AVERAGE_CALORIES, BOWEL_FREQUENCY, BRISTOL_TYPE, MEAL_FREQUENCY,
    PAIN, SATISFACTION, STRAIN, SYMPTOM_FREQUENCY, SYMPTOM_SEVERITY,
};
pub use triggers::TriggerAnalyzer;
pub use types::*;
