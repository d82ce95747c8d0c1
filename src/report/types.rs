//! The combined result of one analysis run

use crate::aggregate::{DailyAggregation, TimeRange};
use crate::analysis::{
    BowelPattern, Correlation, EatingPattern, LifestylePattern, MedicationEffect, SymptomPattern,
    TrendLine, TriggerEffect,
};
use crate::insights::InsightRecommendation;
use crate::scores::{BowelSummary, HealthScore, MealSummary, MedicationSummary, SymptomSummary};
use crate::stats::{StatisticalSummary, TrendDirection};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Weekly trend lines per domain plus the combined verdicts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub bowel: Vec<TrendLine>,
    pub symptoms: Vec<TrendLine>,
    pub meals: Vec<TrendLine>,
    /// Polarity-adjusted verdict over every trend line
    pub overall: TrendDirection,
    /// First-half/second-half verdict on the smoothed daily health score
    pub health_direction: TrendDirection,
    pub significant_changes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub eating: EatingPattern,
    pub bowel: BowelPattern,
    pub symptoms: SymptomPattern,
    pub lifestyle: LifestylePattern,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub bowel: BowelSummary,
    pub meals: MealSummary,
    pub symptoms: SymptomSummary,
    pub medications: MedicationSummary,
    pub health_score: HealthScore,
    /// Distribution of symptom severities
    pub symptom_severity: StatisticalSummary,
    /// Distribution of recorded meal calories, unrecorded meals excluded
    pub meal_calories: StatisticalSummary,
    /// Meal calorie values outside 1.5 x IQR, in entry order
    pub calorie_outliers: Vec<f64>,
}

/// Everything derived from one user's entries over one range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub generated_at: DateTime<Utc>,
    pub daily: Vec<DailyAggregation>,
    pub trends: TrendReport,
    pub patterns: PatternReport,
    pub correlations: Vec<Correlation>,
    pub medication_effects: Vec<MedicationEffect>,
    pub triggers: Vec<TriggerEffect>,
    pub summary: SummaryReport,
    pub insights: Vec<InsightRecommendation>,
    pub recommendations: Vec<InsightRecommendation>,
}

impl AnalyticsReport {
    /// Insight titles and recommendation descriptions, insights first
    pub fn headlines(&self) -> Vec<String> {
        self.insights
            .iter()
            .map(|i| i.title.clone())
            .chain(self.recommendations.iter().map(|r| r.description.clone()))
            .collect()
    }
}
