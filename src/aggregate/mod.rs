//! Temporal Aggregator
//!
//! Groups timestamped entries by calendar day or ISO week and reduces each
//! group to counts and averages. Every analyzer builds on these records.
//!
//! ## Guarantees
//!
//! - Entries outside the inclusive `[start, end]` range are dropped
//! - Output is in ascending period order (groups live in a `BTreeMap`)
//! - Empty input produces an empty result

mod entities;
mod interval;
mod range;
mod values;

pub use entities::{
    aggregate_bowel, aggregate_daily, aggregate_meals, aggregate_symptoms, by_date,
    BowelAggregate, DailyAggregation, MealAggregate, SymptomAggregate,
};
pub use interval::{Bucket, Interval};
pub use range::TimeRange;
pub use values::{aggregate_values, group_by, Reduction, TimedValue, TrendPoint};
