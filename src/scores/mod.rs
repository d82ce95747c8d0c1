//! Domain summaries and the weighted health score
//!
//! Bowel health weighs 40%, symptoms 30%, meals 20% and medication
//! adherence 10%. Every component is clamped to [0, 100] and rounded to one
//! decimal.

mod calculator;
mod summaries;

pub use calculator::{HealthScore, HealthScoreCalculator};
pub use summaries::{
    interval_regularity, summarize_bowel, summarize_meals, summarize_medications,
    summarize_symptoms, BowelSummary, MealSummary, MedicationSummary, SymptomSummary,
};
