//! One-call analysis over a user's health data

use super::types::{AnalyticsReport, PatternReport, SummaryReport, TrendReport};
use crate::aggregate::{aggregate_daily, TimeRange};
use crate::analysis::{
    medication_effectiveness, CorrelationAnalyzer, PatternAnalyzer, TrendAnalyzer,
    TriggerAnalyzer,
};
use crate::config::{AnalysisConfig, ConfigError};
use crate::entries::HealthData;
use crate::insights::{top_insights, InsightEngine};
use crate::scores::{
    summarize_bowel, summarize_meals, summarize_medications, summarize_symptoms,
    HealthScoreCalculator,
};
use crate::stats::{describe, find_outliers};
use chrono::Utc;

/// Runs every analyzer with one shared configuration
///
/// Holds only immutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct HealthAnalytics {
    config: AnalysisConfig,
    trends: TrendAnalyzer,
    patterns: PatternAnalyzer,
    correlations: CorrelationAnalyzer,
    triggers: TriggerAnalyzer,
    insights: InsightEngine,
    scores: HealthScoreCalculator,
}

impl Default for HealthAnalytics {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl HealthAnalytics {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            trends: TrendAnalyzer::new(config.trend.clone()),
            patterns: PatternAnalyzer::new(config.pattern.clone(), config.trigger.clone()),
            correlations: CorrelationAnalyzer::new(config.correlation.clone()),
            triggers: TriggerAnalyzer::new(config.trigger.clone()),
            insights: InsightEngine::new(config.insight.clone()),
            scores: HealthScoreCalculator::new(),
            config,
        }
    }

    /// Validate `config` before building the analyzers
    pub fn try_new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn insight_engine(&self) -> &InsightEngine {
        &self.insights
    }

    /// Analyze the entries that fall inside `range`
    ///
    /// Medication records are matched against the filtered events but are
    /// not themselves filtered.
    pub fn analyze(&self, data: &HealthData, range: TimeRange) -> AnalyticsReport {
        let scoped = data.within(&range);
        let bowel = &scoped.bowel_movements;
        let meals = &scoped.meals;
        let symptoms = &scoped.symptoms;
        let medications = &scoped.medications;

        tracing::debug!(
            bowel = bowel.len(),
            meals = meals.len(),
            symptoms = symptoms.len(),
            medications = medications.len(),
            "analyzing health data"
        );

        let days = if range.is_unbounded() {
            scoped.span().map_or(1, |span| span.day_count())
        } else {
            range.day_count()
        };

        let bowel_trends = self.trends.bowel_trends(bowel, &range);
        let symptom_trends = self.trends.symptom_trends(symptoms, &range);
        let meal_trends = self.trends.meal_trends(meals, &range);
        let trends = TrendReport {
            overall: self
                .trends
                .overall_trend(&bowel_trends, &symptom_trends, &meal_trends),
            health_direction: self.trends.determine_trend_direction(bowel, meals, symptoms),
            significant_changes: self.trends.significant_trends(bowel, meals, symptoms),
            bowel: bowel_trends,
            symptoms: symptom_trends,
            meals: meal_trends,
        };

        let patterns = PatternReport {
            eating: self.patterns.analyze_eating_patterns(meals, symptoms),
            bowel: self.patterns.analyze_bowel_patterns(bowel, meals),
            symptoms: self.patterns.analyze_symptom_patterns(symptoms),
            lifestyle: self.patterns.analyze_lifestyle_patterns(meals, bowel, symptoms),
        };

        let mut correlations = self.correlations.meal_bowel_correlations(meals, bowel);
        correlations.extend(self.correlations.meal_symptom_correlations(meals, symptoms));

        let medication_effects = medication_effectiveness(medications, symptoms, bowel);
        let triggers = self.triggers.trigger_analysis(meals, symptoms, bowel);

        let bowel_summary = summarize_bowel(bowel, days);
        let meal_summary = summarize_meals(meals, days);
        let symptom_summary = summarize_symptoms(symptoms, days);
        let medication_summary = summarize_medications(medications, Utc::now());
        let health_score = self.scores.overall(
            &bowel_summary,
            &meal_summary,
            &symptom_summary,
            &medication_summary,
        );

        let severities: Vec<f64> = symptoms.iter().map(|s| s.severity as f64).collect();
        let calories: Vec<f64> = meals
            .iter()
            .map(|m| m.calories)
            .filter(|c| *c > 0.0)
            .collect();

        let all_trends: Vec<_> = trends
            .bowel
            .iter()
            .chain(&trends.symptoms)
            .chain(&trends.meals)
            .cloned()
            .collect();
        let insights = top_insights(
            self.insights.generate_health_insights(
                bowel,
                meals,
                symptoms,
                medications,
                &correlations,
                &all_trends,
            ),
            self.config.insight.max_insights,
        );
        let recommendations = self.insights.generate_recommendations(bowel, meals, symptoms);

        let daily = aggregate_daily(
            bowel,
            meals,
            symptoms,
            medications,
            &range,
            self.config.correlation.spicy_meal_level,
        );

        tracing::info!(
            days,
            correlations = correlations.len(),
            triggers = triggers.len(),
            insights = insights.len(),
            health_score = health_score.overall,
            "analysis complete"
        );

        AnalyticsReport {
            range,
            generated_at: Utc::now(),
            daily,
            trends,
            patterns,
            correlations,
            medication_effects,
            triggers,
            summary: SummaryReport {
                bowel: bowel_summary,
                meals: meal_summary,
                symptoms: symptom_summary,
                medications: medication_summary,
                health_score,
                symptom_severity: describe(&severities),
                meal_calories: describe(&calories),
                calorie_outliers: find_outliers(&calories),
            },
            insights,
            recommendations,
        }
    }
}
