//! # Health Analytics
//!
//! Digestive health analytics over personal logs of bowel movements, meals,
//! symptoms and medications.
//!
//! ## Features
//!
//! - **Trends**: weekly trend lines with direction and significance
//! - **Correlations**: meal attributes against bowel and symptom outcomes
//! - **Medications**: before/after effectiveness around each start date
//! - **Triggers**: foods and eating habits followed by adverse events
//! - **Insights**: ranked, actionable recommendations
//! - **Scores**: a weighted 0-100 health score
//!
//! ## Modules
//!
//! - [`entries`]: Logged events and the JSON export format
//! - [`aggregate`]: Time ranges, bucketing and daily roll-ups
//! - [`stats`]: Numeric helpers shared by the analyzers
//! - [`analysis`]: Trend, pattern, correlation and trigger analysis
//! - [`insights`]: Insight and recommendation generation
//! - [`scores`]: Domain summaries and the health score
//! - [`report`]: One-call analysis producing an [`AnalyticsReport`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use health_analytics::{HealthAnalytics, HealthData, TimeRange};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let json = std::fs::read_to_string("export.json")?;
//!     let data = HealthData::from_json(&json)?;
//!
//!     let range = TimeRange::last_days(30).ok_or("range out of bounds")?;
//!     let analytics = HealthAnalytics::default();
//!     let report = analytics.analyze(&data, range);
//!
//!     println!("Health score: {}", report.summary.health_score.overall);
//!     for headline in report.headlines() {
//!         println!("- {}", headline);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod entries;
pub mod insights;
pub mod logging;
pub mod report;
pub mod scores;
pub mod stats;

// Re-export top-level types for convenience
pub use aggregate::{DailyAggregation, Interval, TimeRange};

pub use analysis::{
    Correlation, CorrelationAnalyzer, MedicationEffect, PatternAnalyzer, TrendAnalyzer,
    TrendLine, TriggerAnalyzer, TriggerEffect,
};

pub use config::{AnalysisConfig, Config, ConfigError, LoggingConfig};

pub use entries::{
    BowelEvent, EntryError, EntryResult, HealthData, MealEvent, MedicationRecord, SymptomEvent,
};

pub use insights::{InsightEngine, InsightKind, InsightRecommendation, Priority};

pub use report::{AnalyticsReport, HealthAnalytics};

pub use scores::{HealthScore, HealthScoreCalculator};

pub use stats::TrendDirection;
