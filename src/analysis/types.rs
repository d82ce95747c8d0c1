//! Derived analysis results
//!
//! Every type here is built fresh per call and never mutated afterwards.

use crate::aggregate::TrendPoint;
use crate::stats::TrendDirection;
use serde::Serialize;
use std::collections::BTreeMap;

/// How much weight a fitted trend deserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Significance {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Significance::Low => write!(f, "Low"),
            Significance::Moderate => write!(f, "Moderate"),
            Significance::High => write!(f, "High"),
        }
    }
}

/// A slope fitted over weekly points of one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLine {
    pub name: String,
    /// Ascending by date
    pub points: Vec<TrendPoint>,
    /// Raw slope direction; metric polarity is not applied
    pub direction: TrendDirection,
    pub slope: f64,
    pub confidence: f64,
    pub significance: Significance,
}

/// Pearson correlation between a daily factor and a daily outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Correlation {
    pub factor: String,
    pub outcome: String,
    /// In [-1, 1]
    pub strength: f64,
    /// In [0, 1]
    pub confidence: f64,
    pub description: String,
    pub sample_size: usize,
}

/// Before/after comparison around a medication's start date
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationEffect {
    pub medication_name: String,
    /// Percent drop in mean severity; `"overall"` plus one entry per symptom name
    pub symptom_improvement: BTreeMap<String, f64>,
    /// Change in mean `satisfaction - pain - strain`
    pub bowel_improvement: f64,
    /// 0-100, 50 means no measurable effect
    pub effectiveness_score: f64,
}

/// A meal attribute or timing habit followed by adverse events
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEffect {
    pub trigger: String,
    /// In [0, 1]
    pub symptom_increase: f64,
    /// In [-1, 1]
    pub bowel_impact: f64,
    /// Distinct days on which the trigger occurred
    pub frequency: usize,
    pub severity: f64,
}

/// Meals eaten in one hour of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealTiming {
    pub hour: u32,
    pub frequency: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EatingPattern {
    /// Ascending by hour
    pub meal_timings: Vec<MealTiming>,
    /// Dietary flags by count, ties alphabetical
    pub common_ingredients: Vec<String>,
    /// Common flags the user also names as symptom triggers
    pub problem_ingredients: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BowelPattern {
    /// Movements per active day
    pub frequency: f64,
    /// Mean Bristol type
    pub consistency: f64,
    /// Share of movements shortly after a meal
    pub meal_correlation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomPattern {
    /// Count per symptom name
    pub common_symptoms: BTreeMap<String, usize>,
    /// Count per symptom category
    pub frequency: BTreeMap<String, usize>,
    /// Mean severity per symptom name
    pub severity: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietaryHabit {
    pub description: String,
    pub frequency: usize,
    /// Share of these meals followed by a symptom
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomTrigger {
    pub trigger: String,
    pub mentions: usize,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestylePattern {
    pub dietary_habits: Vec<DietaryHabit>,
    pub bowel_regularity: f64,
    pub symptom_triggers: Vec<SymptomTrigger>,
}
