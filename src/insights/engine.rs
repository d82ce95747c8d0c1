//! Insight generation from raw entries and derived analysis

use super::types::{sort_by_priority, InsightKind, InsightRecommendation, Priority};
use crate::analysis::{Correlation, TrendLine, PAIN, SATISFACTION, SYMPTOM_SEVERITY};
use crate::config::InsightConfig;
use crate::entries::{BowelEvent, MealEvent, MedicationRecord, SymptomEvent};
use crate::stats::TrendDirection;
use chrono::{NaiveDate, Timelike};
use std::collections::BTreeMap;

/// Turns entries, correlations and trends into prioritized insights
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: InsightConfig,
}

impl InsightEngine {
    pub fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Pattern, correlation, trend and medication insights, `High` first
    ///
    /// Families are independent; insights within a priority keep the order
    /// they were produced in.
    pub fn generate_health_insights(
        &self,
        bowel: &[BowelEvent],
        meals: &[MealEvent],
        symptoms: &[SymptomEvent],
        medications: &[MedicationRecord],
        correlations: &[Correlation],
        trends: &[TrendLine],
    ) -> Vec<InsightRecommendation> {
        let mut insights: Vec<InsightRecommendation> = [
            self.bristol_consistency(bowel),
            self.meal_timing(meals),
            self.symptom_clustering(symptoms),
        ]
        .into_iter()
        .flatten()
        .collect();

        insights.extend(
            correlations
                .iter()
                .filter(|c| {
                    c.confidence > self.config.correlation_confidence
                        && c.strength.abs() > self.config.correlation_strength
                })
                .map(|c| self.correlation_insight(c)),
        );

        insights.extend(
            trends
                .iter()
                .filter(|t| {
                    t.direction != TrendDirection::Stable
                        && t.confidence > self.config.trend_confidence
                })
                .map(|t| self.trend_insight(t)),
        );

        insights.extend(self.medication_adherence(medications));

        sort_by_priority(&mut insights);
        tracing::debug!(count = insights.len(), "generated health insights");
        insights
    }

    fn bristol_consistency(&self, bowel: &[BowelEvent]) -> Option<InsightRecommendation> {
        if bowel.len() < self.config.min_bowel_events {
            return None;
        }

        let total = bowel.len();
        let hard = bowel.iter().filter(|e| e.bristol_type <= 2).count();
        let loose = bowel.iter().filter(|e| e.bristol_type >= 6).count();

        if hard as f64 / total as f64 >= self.config.constipation_ratio {
            Some(
                InsightRecommendation::generated(
                    InsightKind::Lifestyle,
                    Priority::High,
                    "Constipation Pattern Detected",
                )
                .category("Bowel Health")
                .description(format!(
                    "Over {:.0}% of your bowel movements indicate hard stools",
                    self.config.constipation_ratio * 100.0
                ))
                .confidence(0.8)
                .evidence([format!(
                    "{hard} out of {total} movements were Bristol types 1-2, indicating constipation"
                )])
                .actions([
                    "Increase fiber intake with fruits, vegetables, and whole grains",
                    "Drink more water throughout the day",
                    "Consider adding physical activity to your routine",
                    "Consult with a healthcare provider if pattern persists",
                ]),
            )
        } else if loose as f64 / total as f64 >= self.config.loose_stool_ratio {
            Some(
                InsightRecommendation::generated(
                    InsightKind::Lifestyle,
                    Priority::Medium,
                    "Loose Stool Pattern Detected",
                )
                .category("Bowel Health")
                .description(format!(
                    "Over {:.0}% of your bowel movements indicate loose stools",
                    self.config.loose_stool_ratio * 100.0
                ))
                .confidence(0.7)
                .evidence([format!(
                    "{loose} out of {total} movements were Bristol types 6-7, indicating loose stools"
                )])
                .actions([
                    "Keep a food diary to identify potential triggers",
                    "Consider reducing dairy, gluten, or spicy foods temporarily",
                    "Stay hydrated to replace lost fluids",
                    "Consult with a healthcare provider if pattern continues",
                ]),
            )
        } else {
            None
        }
    }

    fn meal_timing(&self, meals: &[MealEvent]) -> Option<InsightRecommendation> {
        if meals.len() < self.config.min_meals {
            return None;
        }

        let mut hours: BTreeMap<u32, usize> = BTreeMap::new();
        for meal in meals {
            *hours.entry(meal.meal_time.hour()).or_default() += 1;
        }

        let regular = hours
            .values()
            .filter(|&&count| count >= self.config.regular_hour_count)
            .count();
        let irregular = hours.values().filter(|&&count| count == 1).count();
        if irregular <= regular {
            return None;
        }

        Some(
            InsightRecommendation::generated(
                InsightKind::Pattern,
                Priority::Medium,
                "Irregular Meal Timing Pattern",
            )
            .description(format!(
                "Your meal times appear inconsistent across {} meals. Regular meal timing can improve digestive health.",
                meals.len()
            ))
            .evidence([
                format!("Meals recorded at {irregular} different irregular times"),
                format!("Only {regular} regular meal times identified"),
                "Irregular eating can affect digestion and gut health".to_string(),
            ])
            .actions([
                "Try to eat meals at consistent times each day",
                "Aim for 3 main meals with 4-6 hour intervals",
                "Set meal reminders if needed",
                "Plan meals in advance to maintain routine",
            ]),
        )
    }

    fn symptom_clustering(&self, symptoms: &[SymptomEvent]) -> Option<InsightRecommendation> {
        if symptoms.len() < self.config.min_symptoms {
            return None;
        }

        let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for symptom in symptoms {
            *days.entry(symptom.recorded_at.date_naive()).or_default() += 1;
        }

        let busy_days = days
            .values()
            .filter(|&&count| count >= self.config.cluster_day_size)
            .count();
        let peak = days.values().copied().max().unwrap_or(0);
        if busy_days < self.config.cluster_days && peak < self.config.cluster_peak {
            return None;
        }

        Some(
            InsightRecommendation::generated(
                InsightKind::Pattern,
                Priority::Medium,
                "Symptom Clustering Detected",
            )
            .description(format!(
                "Multiple symptoms occurring together on {busy_days} days, with up to {peak} symptoms in a single day."
            ))
            .evidence([
                format!("{busy_days} days with {}+ symptoms", self.config.cluster_day_size),
                format!("Maximum {peak} symptoms in one day"),
                "Symptom clustering may indicate trigger events".to_string(),
            ])
            .actions([
                "Look for common triggers on high-symptom days",
                "Track what you ate 6-24 hours before symptom clusters",
                "Note stress levels, sleep quality, and activity on these days",
                "Consider discussing pattern with healthcare provider",
            ]),
        )
    }

    fn correlation_insight(&self, correlation: &Correlation) -> InsightRecommendation {
        let priority = if correlation.confidence > self.config.high_priority_confidence {
            Priority::High
        } else {
            Priority::Medium
        };

        InsightRecommendation::generated(
            InsightKind::Correlation,
            priority,
            format!(
                "Strong Correlation: {} and {}",
                correlation.factor, correlation.outcome
            ),
        )
        .description(correlation.description.clone())
        .confidence(correlation.confidence)
        .evidence([
            format!("Correlation strength: {:.3}", correlation.strength),
            format!("Confidence level: {:.1}%", correlation.confidence * 100.0),
            format!("Based on {} data points", correlation.sample_size),
        ])
        .actions(correlation_actions(correlation))
    }

    fn trend_insight(&self, trend: &TrendLine) -> InsightRecommendation {
        let priority = if trend.confidence > self.config.high_priority_confidence {
            Priority::High
        } else {
            Priority::Medium
        };

        InsightRecommendation::generated(
            InsightKind::Trend,
            priority,
            format!("{} Trend: {}", trend.name, trend.direction),
        )
        .description(format!(
            "Your {} shows a {} trend over time with {} confidence.",
            trend.name, trend.direction, trend.significance
        ))
        .confidence(trend.confidence)
        .evidence([
            format!("Trend direction: {}", trend.direction),
            format!("Confidence: {:.1}%", trend.confidence * 100.0),
            format!("Based on {} data points", trend.points.len()),
        ])
        .actions(trend_actions(trend))
    }

    fn medication_adherence(&self, medications: &[MedicationRecord]) -> Option<InsightRecommendation> {
        let total = medications.len();
        let inactive = medications.iter().filter(|m| !m.is_active).count();
        if total == 0 || inactive == 0 {
            return None;
        }

        let adherence = (total - inactive) as f64 / total as f64 * 100.0;
        if adherence >= self.config.adherence_percent {
            return None;
        }

        Some(
            InsightRecommendation::generated(
                InsightKind::Medication,
                Priority::High,
                "Low Medication Adherence Detected",
            )
            .description(format!(
                "Only {adherence:.1}% of your medications are currently active. Medication adherence is important for treatment effectiveness."
            ))
            .evidence([
                format!("{inactive} of {total} medications are inactive"),
                "Low adherence may affect treatment outcomes".to_string(),
                "Regular medication use is often necessary for optimal results".to_string(),
            ])
            .actions([
                "Review inactive medications with healthcare provider",
                "Set medication reminders if forgetfulness is an issue",
                "Discuss any side effects or concerns about medications",
                "Consider pill organizers or medication tracking apps",
            ]),
        )
    }
}

/// Keep the first `limit` insights after a stable priority sort
pub fn top_insights(
    mut insights: Vec<InsightRecommendation>,
    limit: usize,
) -> Vec<InsightRecommendation> {
    sort_by_priority(&mut insights);
    insights.truncate(limit);
    insights
}

fn correlation_actions(correlation: &Correlation) -> Vec<String> {
    let pair = (correlation.factor.as_str(), correlation.outcome.as_str());
    let steps: &[&str] = match pair {
        ("Spicy Food Level", "Bowel Movement Pain") if correlation.strength > 0.3 => &[
            "Consider reducing spicy food intake",
            "Try milder seasonings like herbs instead of hot spices",
            "Monitor pain levels when avoiding spicy foods",
            "Gradually reintroduce spicy foods to test tolerance",
        ],
        ("Fiber-Rich Meals", "Bristol Stool Type") if correlation.strength > 0.3 => &[
            "Continue including fiber-rich foods in your diet",
            "Aim for 25-35g of fiber daily from various sources",
            "Increase water intake with higher fiber consumption",
            "Track which fiber sources work best for you",
        ],
        ("Dairy Consumption", "Symptom Severity") if correlation.strength > 0.3 => &[
            "Consider reducing dairy intake temporarily",
            "Try lactose-free alternatives",
            "Monitor symptoms during dairy elimination",
            "Discuss potential lactose intolerance with healthcare provider",
        ],
        (factor, outcome) => {
            return vec![
                format!("Monitor {factor} intake and its effects"),
                format!("Track changes in {outcome} when modifying {factor}"),
                "Keep detailed records to confirm this pattern".to_string(),
                "Discuss findings with healthcare provider if concerning".to_string(),
            ]
        }
    };
    steps.iter().map(|s| s.to_string()).collect()
}

fn trend_actions(trend: &TrendLine) -> Vec<String> {
    let mut actions = Vec::new();
    match (trend.name.as_str(), trend.direction) {
        (PAIN, TrendDirection::Improving) => {
            actions.push("Continue current pain management strategies".to_string())
        }
        (PAIN, _) => actions.push("Consider reviewing pain triggers and management".to_string()),
        (SATISFACTION, TrendDirection::Declining) => actions
            .push("Evaluate factors affecting bowel movement satisfaction".to_string()),
        (SATISFACTION, _) => {}
        // A falling severity slope is good news
        (SYMPTOM_SEVERITY, TrendDirection::Declining) => {
            actions.push("Continue current symptom management approach".to_string())
        }
        (SYMPTOM_SEVERITY, _) => {
            actions.push("Review and adjust symptom management strategies".to_string())
        }
        (name, _) => actions.push(format!("Monitor {name} trend and related factors")),
    }
    actions.push("Track progress over the next few weeks".to_string());
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::TrendPoint;
    use crate::analysis::Significance;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, day, hour, 0, 0).unwrap()
    }

    fn trend(name: &str, direction: TrendDirection, confidence: f64) -> TrendLine {
        TrendLine {
            name: name.to_string(),
            points: vec![
                TrendPoint { date: at(1, 0).date_naive(), value: 3.0 },
                TrendPoint { date: at(8, 0).date_naive(), value: 5.0 },
            ],
            direction,
            slope: 2.0,
            confidence,
            significance: Significance::High,
        }
    }

    #[test]
    fn test_constipation_pattern() {
        let engine = InsightEngine::default();
        let mut bowel: Vec<BowelEvent> = (1..=6).map(|d| BowelEvent::new(1, at(d, 8))).collect();
        bowel.extend((7..=10).map(|d| BowelEvent::new(2, at(d, 8))));

        let insights = engine.generate_health_insights(&bowel, &[], &[], &[], &[], &[]);
        assert_eq!(insights.len(), 1);

        let insight = &insights[0];
        assert_eq!(insight.priority, Priority::High);
        assert_eq!(insight.kind, InsightKind::Lifestyle);
        assert!(insight.evidence[0].contains("10 out of 10"));
        assert!(insight.id.starts_with("lifestyle-"));
    }

    #[test]
    fn test_loose_stool_pattern() {
        let engine = InsightEngine::default();
        let mut bowel: Vec<BowelEvent> = (1..=4).map(|d| BowelEvent::new(7, at(d, 8))).collect();
        bowel.extend((5..=10).map(|d| BowelEvent::new(4, at(d, 8))));

        let insights = engine.generate_health_insights(&bowel, &[], &[], &[], &[], &[]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].priority, Priority::Medium);
        assert_eq!(
            insights[0].evidence[0],
            "4 out of 10 movements were Bristol types 6-7, indicating loose stools"
        );
    }

    #[test]
    fn test_too_few_movements_no_pattern() {
        let engine = InsightEngine::default();
        let bowel: Vec<BowelEvent> = (1..=6).map(|d| BowelEvent::new(1, at(d, 8))).collect();
        assert!(engine
            .generate_health_insights(&bowel, &[], &[], &[], &[], &[])
            .is_empty());
    }

    #[test]
    fn test_irregular_meal_timing() {
        let engine = InsightEngine::default();
        let meals: Vec<MealEvent> = (1..=7)
            .map(|d| MealEvent::new("Meal", at(d, 6 + 2 * d)))
            .collect();

        let insights = engine.generate_health_insights(&[], &meals, &[], &[], &[], &[]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Irregular Meal Timing Pattern");
    }

    #[test]
    fn test_symptom_clustering_peak_day() {
        let engine = InsightEngine::default();
        let symptoms: Vec<SymptomEvent> = (8..=12)
            .map(|h| SymptomEvent::new("Cramping", 5, at(3, h)))
            .collect();

        let insights = engine.generate_health_insights(&[], &[], &symptoms, &[], &[], &[]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].evidence[1], "Maximum 5 symptoms in one day");
    }

    #[test]
    fn test_correlation_and_trend_filters() {
        let engine = InsightEngine::default();
        let correlations = vec![
            Correlation {
                factor: "Spicy Food Level".to_string(),
                outcome: "Bowel Movement Pain".to_string(),
                strength: 0.8,
                confidence: 0.85,
                description: "d".to_string(),
                sample_size: 60,
            },
            Correlation {
                factor: "Daily Calorie Intake".to_string(),
                outcome: "Bowel Movement Satisfaction".to_string(),
                strength: 0.4,
                confidence: 0.95,
                description: "d".to_string(),
                sample_size: 120,
            },
        ];
        let trends = vec![
            trend(PAIN, TrendDirection::Declining, 0.75),
            trend(SATISFACTION, TrendDirection::Stable, 0.95),
        ];

        let insights = engine.generate_health_insights(&[], &[], &[], &[], &correlations, &trends);
        assert_eq!(insights.len(), 2);

        assert_eq!(insights[0].kind, InsightKind::Correlation);
        assert_eq!(insights[0].priority, Priority::High);
        assert_eq!(insights[0].action_steps[0], "Consider reducing spicy food intake");

        assert_eq!(insights[1].kind, InsightKind::Trend);
        assert_eq!(insights[1].priority, Priority::Medium);
        assert_eq!(insights[1].title, "Pain Trend: declining");
        assert_eq!(
            insights[1].action_steps,
            vec![
                "Consider reviewing pain triggers and management",
                "Track progress over the next few weeks"
            ]
        );
    }

    #[test]
    fn test_low_medication_adherence() {
        let engine = InsightEngine::default();
        let medications = vec![
            MedicationRecord::new("Omeprazole"),
            MedicationRecord::new("Loperamide").active(false),
        ];

        let insights = engine.generate_health_insights(&[], &[], &[], &medications, &[], &[]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].priority, Priority::High);
        assert!(insights[0].description.starts_with("Only 50.0%"));
    }

    #[test]
    fn test_top_insights_limit() {
        let items = vec![
            InsightRecommendation::with_id("low", InsightKind::Diet, Priority::Low, "l"),
            InsightRecommendation::with_id("high", InsightKind::Diet, Priority::High, "h"),
            InsightRecommendation::with_id("mid", InsightKind::Diet, Priority::Medium, "m"),
        ];
        let top = top_insights(items, 2);
        let ids: Vec<&str> = top.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid"]);
    }
}
