//! Rule-based recommendations with onboarding prompts for empty domains

use super::engine::InsightEngine;
use super::types::{sort_by_priority, InsightKind, InsightRecommendation, Priority};
use crate::entries::{BowelEvent, MealEvent, SymptomEvent};
use crate::stats::{align_by_key, mean, pearson_correlation};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Entries a domain needs before its averages are judged
const MIN_ENTRIES: usize = 3;
const HIGH_PAIN: f64 = 6.0;
const LOW_SATISFACTION: f64 = 5.0;
const LOW_FIBER_RATIO: f64 = 0.3;
const HIGH_MEAL_CALORIES: f64 = 800.0;
const HIGH_SEVERITY: f64 = 6.0;
const SPICE_PAIN_MIN_R: f64 = 0.5;

fn daily_means(values: impl Iterator<Item = (NaiveDate, f64)>) -> BTreeMap<NaiveDate, f64> {
    let mut days: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for (day, value) in values {
        days.entry(day).or_default().push(value);
    }
    days.into_iter().map(|(day, v)| (day, mean(&v))).collect()
}

impl InsightEngine {
    /// Up to `max_recommendations` recommendations, `High` first
    pub fn generate_recommendations(
        &self,
        bowel: &[BowelEvent],
        meals: &[MealEvent],
        symptoms: &[SymptomEvent],
    ) -> Vec<InsightRecommendation> {
        let mut recommendations = bowel_health(bowel);
        recommendations.extend(diet(meals));
        recommendations.extend(symptom_load(symptoms));
        recommendations.extend(spice_pain(bowel, meals));

        sort_by_priority(&mut recommendations);
        recommendations.truncate(self.config().max_recommendations);
        recommendations
    }

    /// Descriptions of [`generate_recommendations`](Self::generate_recommendations)
    pub fn recommendation_messages(
        &self,
        bowel: &[BowelEvent],
        meals: &[MealEvent],
        symptoms: &[SymptomEvent],
    ) -> Vec<String> {
        self.generate_recommendations(bowel, meals, symptoms)
            .into_iter()
            .map(|r| r.description)
            .collect()
    }
}

fn bowel_health(bowel: &[BowelEvent]) -> Vec<InsightRecommendation> {
    if bowel.is_empty() {
        return vec![InsightRecommendation::with_id(
            "bowel_tracking_start",
            InsightKind::Tracking,
            Priority::High,
            "Track Bowel Movements",
        )
        .description("Start tracking your bowel movements to get personalized recommendations")
        .actions(["Open tracking form", "Add first entry"])];
    }

    let mut recommendations = Vec::new();
    if bowel.len() < MIN_ENTRIES {
        return recommendations;
    }

    let pain = mean(&bowel.iter().map(|e| f64::from(e.pain)).collect::<Vec<_>>());
    let satisfaction = mean(&bowel.iter().map(|e| f64::from(e.satisfaction)).collect::<Vec<_>>());

    if pain > HIGH_PAIN {
        recommendations.push(
            InsightRecommendation::with_id(
                "bowel_pain_high",
                InsightKind::Lifestyle,
                Priority::Medium,
                "High Bowel Movement Pain",
            )
            .description(format!(
                "Average pain level {pain:.1} detected in recent bowel movements"
            ))
            .evidence([format!("Average pain: {pain:.1}")])
            .actions([
                "Review diet for potential triggers",
                "Discuss pain management with a professional",
            ]),
        );
    }

    if satisfaction < LOW_SATISFACTION {
        recommendations.push(
            InsightRecommendation::with_id(
                "bowel_satisfaction_low",
                InsightKind::Lifestyle,
                Priority::Medium,
                "Low Bowel Movement Satisfaction",
            )
            .description(format!(
                "Average satisfaction {satisfaction:.1} suggests discomfort"
            ))
            .evidence([format!("Average satisfaction: {satisfaction:.1}")])
            .actions([
                "Increase fiber and hydration",
                "Track meals leading to low satisfaction",
            ]),
        );
    }

    recommendations
}

fn diet(meals: &[MealEvent]) -> Vec<InsightRecommendation> {
    if meals.is_empty() {
        return vec![InsightRecommendation::with_id(
            "meal_tracking_start",
            InsightKind::Tracking,
            Priority::High,
            "Track Meals",
        )
        .description("Start tracking your meals to get personalized dietary recommendations")
        .actions(["Open meal form", "Add first meal"])];
    }

    let mut recommendations = Vec::new();
    if meals.len() < MIN_ENTRIES {
        return recommendations;
    }

    let fiber_ratio = meals.iter().filter(|m| m.fiber_rich).count() as f64 / meals.len() as f64;
    let calories = mean(&meals.iter().map(|m| m.calories).collect::<Vec<_>>());

    if fiber_ratio < LOW_FIBER_RATIO {
        recommendations.push(
            InsightRecommendation::with_id(
                "low_fiber_intake",
                InsightKind::Diet,
                Priority::Medium,
                "Increase Fiber Intake",
            )
            .description("Your recent meals appear low in fiber which can impact digestion")
            .evidence([format!(
                "Only {:.0}% of meals were fiber rich",
                fiber_ratio * 100.0
            )])
            .actions(["Add more whole grains, fruits and vegetables"]),
        );
    }

    if calories > HIGH_MEAL_CALORIES {
        recommendations.push(
            InsightRecommendation::with_id(
                "high_calorie_meals",
                InsightKind::Diet,
                Priority::Low,
                "High Average Meal Calories",
            )
            .description(format!(
                "Average calories per meal is {calories:.0} which may be high"
            ))
            .evidence([format!("Average calories: {calories:.0}")])
            .actions([
                "Consider reducing portion sizes",
                "Balance meals with vegetables",
            ]),
        );
    }

    recommendations
}

fn symptom_load(symptoms: &[SymptomEvent]) -> Vec<InsightRecommendation> {
    if symptoms.is_empty() {
        return vec![InsightRecommendation::with_id(
            "symptom_tracking_start",
            InsightKind::Tracking,
            Priority::High,
            "Track Symptoms",
        )
        .description("Start tracking your symptoms to get personalized recommendations")
        .actions(["Open symptom form", "Add first symptom"])];
    }

    let severity = mean(&symptoms.iter().map(|s| f64::from(s.severity)).collect::<Vec<_>>());
    if severity <= HIGH_SEVERITY {
        return Vec::new();
    }

    let mut types: BTreeMap<&'static str, usize> = BTreeMap::new();
    for symptom in symptoms {
        if let Some(kind) = symptom.symptom_type {
            *types.entry(kind.as_str()).or_default() += 1;
        }
    }
    // max_by_key keeps the last maximum, so walk in reverse for the alphabetical first
    let common = types
        .iter()
        .rev()
        .max_by_key(|(_, count)| **count)
        .map(|(name, _)| *name)
        .unwrap_or("unspecified");

    vec![InsightRecommendation::with_id(
        "symptom_severity_high",
        InsightKind::Symptom,
        Priority::Medium,
        "High Symptom Severity",
    )
    .description(format!("Average symptom severity is {severity:.1}"))
    .evidence([format!("Common symptom: {common}")])
    .actions([
        "Review potential triggers",
        "Consult a healthcare professional",
    ])]
}

/// Daily mean spicy level against daily mean pain on shared days
fn spice_pain(bowel: &[BowelEvent], meals: &[MealEvent]) -> Vec<InsightRecommendation> {
    if bowel.len() < MIN_ENTRIES || meals.len() < MIN_ENTRIES {
        return Vec::new();
    }

    let spice = daily_means(meals.iter().filter_map(|m| {
        m.spicy_level
            .map(|level| (m.meal_time.date_naive(), f64::from(level)))
    }));
    let pain = daily_means(
        bowel
            .iter()
            .map(|e| (e.recorded_at.date_naive(), f64::from(e.pain))),
    );

    let (x, y) = align_by_key(&spice, &pain);
    if x.len() < MIN_ENTRIES {
        return Vec::new();
    }

    let r = pearson_correlation(&x, &y);
    if r <= SPICE_PAIN_MIN_R {
        return Vec::new();
    }

    vec![InsightRecommendation::with_id(
        "spice_pain_correlation",
        InsightKind::Correlation,
        Priority::Medium,
        "Spicy Food Linked to Pain",
    )
    .description("Higher spicy food levels correlate with increased bowel movement pain")
    .evidence([format!("Correlation coefficient {r:.2}")])
    .actions([
        "Reduce spicy food intake",
        "Monitor pain levels when avoiding spicy meals",
    ])]
}
