//! Insight Engine
//!
//! Converts raw entries and analysis results into prioritized, human-readable
//! findings with evidence and action steps.
//!
//! - **Health insights**: Bristol distribution, meal timing, symptom
//!   clustering, strong correlations, confident trends, medication adherence
//! - **Recommendations**: a short list of fixed rules, with onboarding
//!   prompts for any domain that has no entries yet
//!
//! Output is always ordered `HIGH`, `MEDIUM`, `LOW` with a stable sort.

mod engine;
mod recommendations;
mod types;

pub use engine::{top_insights, InsightEngine};
pub use types::{sort_by_priority, InsightKind, InsightRecommendation, Priority};
