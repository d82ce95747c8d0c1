//! Weighted 0-100 health score

use super::summaries::{BowelSummary, MealSummary, MedicationSummary, SymptomSummary};
use crate::stats::{round_to, sanitize};
use serde::Serialize;

const BOWEL_WEIGHT: f64 = 0.4;
const SYMPTOM_WEIGHT: f64 = 0.3;
const MEAL_WEIGHT: f64 = 0.2;
const MEDICATION_WEIGHT: f64 = 0.1;

/// Overall score with its components, each in [0, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScore {
    pub overall: f64,
    pub bowel: f64,
    pub symptom: f64,
    pub meal: f64,
    pub medication: f64,
}

fn bounded(score: f64) -> f64 {
    round_to(sanitize(score).clamp(0.0, 100.0), 1)
}

/// Combines domain summaries into a [`HealthScore`]
///
/// Domains without data score neutral (bowel, meals) or perfect
/// (symptoms, medications).
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthScoreCalculator;

impl HealthScoreCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn overall(
        &self,
        bowel: &BowelSummary,
        meals: &MealSummary,
        symptoms: &SymptomSummary,
        medications: &MedicationSummary,
    ) -> HealthScore {
        let bowel = self.bowel_score(bowel);
        let symptom = self.symptom_score(symptoms);
        let meal = self.meal_score(meals);
        let medication = self.medication_score(medications);

        let weighted = bowel * BOWEL_WEIGHT
            + symptom * SYMPTOM_WEIGHT
            + meal * MEAL_WEIGHT
            + medication * MEDICATION_WEIGHT;

        HealthScore {
            overall: round_to(sanitize(weighted), 1),
            bowel,
            symptom,
            meal,
            medication,
        }
    }

    /// Penalizes Bristol distance from 3.5, pain, strain and odd frequency
    pub fn bowel_score(&self, summary: &BowelSummary) -> f64 {
        let Some(bristol) = summary.most_common_bristol else {
            return 50.0;
        };
        if summary.total_count == 0 {
            return 50.0;
        }

        let mut score = 100.0;
        score -= (f64::from(bristol) - 3.5).abs() * 10.0;
        score -= (summary.average_pain - 1.0) * 5.0;
        score -= (summary.average_strain - 1.0) * 5.0;
        score += (summary.average_satisfaction - 5.0) * 2.0;

        if summary.average_per_day < 0.5 {
            score -= 20.0;
        } else if summary.average_per_day > 4.0 {
            score -= 15.0;
        }

        bounded(score)
    }

    pub fn symptom_score(&self, summary: &SymptomSummary) -> f64 {
        if summary.total_symptoms == 0 {
            return 100.0;
        }

        let mut score = 100.0;
        score -= summary.total_symptoms as f64 * 2.0;
        score -= summary.average_severity * 5.0;
        if summary.total_symptoms > 10 {
            score -= 20.0;
        }

        bounded(score)
    }

    pub fn meal_score(&self, summary: &MealSummary) -> f64 {
        if summary.total_meals == 0 {
            return 50.0;
        }

        let mut score = 100.0;
        if summary.average_calories > 2500.0 {
            score -= 15.0;
        } else if summary.average_calories > 2000.0 {
            score -= 5.0;
        }
        if summary.average_calories < 1200.0 {
            score -= 20.0;
        }

        if (2.5..=4.5).contains(&summary.average_per_day) {
            score += 10.0;
        } else if summary.average_per_day < 2.0 {
            score -= 15.0;
        } else if summary.average_per_day > 6.0 {
            score -= 10.0;
        }

        bounded(score)
    }

    pub fn medication_score(&self, summary: &MedicationSummary) -> f64 {
        if summary.total_medications == 0 {
            return 100.0;
        }

        let mut score = 100.0;
        if summary.adherence_score < 0.8 {
            score -= 30.0;
        } else if summary.adherence_score < 0.9 {
            score -= 15.0;
        }

        bounded(score)
    }
}
