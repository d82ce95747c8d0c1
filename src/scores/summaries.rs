//! Per-domain summaries feeding the health score

use crate::entries::{BowelEvent, MealEvent, MedicationRecord, SymptomEvent};
use crate::stats::round_to;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub use crate::analysis::bowel_regularity as interval_regularity;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BowelSummary {
    pub total_count: usize,
    pub average_per_day: f64,
    /// Ties go to the lower type
    pub most_common_bristol: Option<u8>,
    pub average_pain: f64,
    pub average_strain: f64,
    pub average_satisfaction: f64,
    /// 0-100 band score for movements per day
    pub regularity_score: f64,
    /// 0-1, share of healthy types discounted by type changes
    pub consistency_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    pub total_meals: usize,
    pub average_per_day: f64,
    pub average_calories: f64,
    pub total_calories: f64,
    pub fiber_rich_percent: f64,
    pub health_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomSummary {
    pub total_symptoms: usize,
    pub average_per_day: f64,
    pub average_severity: f64,
    pub most_common_category: Option<String>,
    pub most_common_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationSummary {
    pub total_medications: usize,
    pub active_medications: usize,
    pub most_common_category: Option<String>,
    /// Share of records flagged active
    pub adherence_score: f64,
    /// 0-100, rises with the number of medications
    pub complexity_score: f64,
}

/// Most frequent key; `BTreeMap` order makes ties alphabetical
fn most_common<K: Ord + Clone>(counts: &BTreeMap<K, usize>) -> Option<K> {
    counts
        .iter()
        .rev()
        .max_by_key(|(_, count)| **count)
        .map(|(key, _)| key.clone())
}

fn per_day(count: usize, days: i64) -> f64 {
    count as f64 / days.max(1) as f64
}

fn regularity_band(count: usize, days: i64) -> f64 {
    if count < 2 || days <= 0 {
        return 50.0;
    }
    let average = per_day(count, days);
    if (1.0..=3.0).contains(&average) {
        90.0
    } else if average > 0.5 && average < 1.0 {
        70.0
    } else if average < 0.5 {
        40.0
    } else {
        50.0
    }
}

fn consistency(events: &[BowelEvent]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }

    let mut ordered: Vec<&BowelEvent> = events.iter().collect();
    ordered.sort_by_key(|e| e.recorded_at);

    let healthy = ordered
        .iter()
        .filter(|e| (3..=5).contains(&e.bristol_type))
        .count();
    let changes = ordered
        .windows(2)
        .filter(|w| w[0].bristol_type != w[1].bristol_type)
        .count();

    let health_ratio = healthy as f64 / ordered.len() as f64;
    let change_ratio = if ordered.len() > 1 {
        changes as f64 / (ordered.len() - 1) as f64
    } else {
        0.0
    };

    round_to((health_ratio * (1.0 - change_ratio)).clamp(0.0, 1.0), 2)
}

/// Summarize bowel movements over a period of `days`
pub fn summarize_bowel(events: &[BowelEvent], days: i64) -> BowelSummary {
    if events.is_empty() {
        return BowelSummary::default();
    }

    let count = events.len() as f64;
    let mut bristol: BTreeMap<u8, usize> = BTreeMap::new();
    let (mut pain, mut strain, mut satisfaction) = (0.0, 0.0, 0.0);
    for event in events {
        *bristol.entry(event.bristol_type).or_default() += 1;
        pain += f64::from(event.pain);
        strain += f64::from(event.strain);
        satisfaction += f64::from(event.satisfaction);
    }

    BowelSummary {
        total_count: events.len(),
        average_per_day: round_to(per_day(events.len(), days), 1),
        most_common_bristol: most_common(&bristol),
        average_pain: round_to(pain / count, 1),
        average_strain: round_to(strain / count, 1),
        average_satisfaction: round_to(satisfaction / count, 1),
        regularity_score: regularity_band(events.len(), days),
        consistency_score: consistency(events),
    }
}

/// Summarize meals over a period of `days`
pub fn summarize_meals(meals: &[MealEvent], days: i64) -> MealSummary {
    if meals.is_empty() {
        return MealSummary::default();
    }

    let count = meals.len() as f64;
    let total_calories: f64 = meals.iter().map(|m| m.calories).sum();
    let fiber_ratio = meals.iter().filter(|m| m.fiber_rich).count() as f64 / count;

    MealSummary {
        total_meals: meals.len(),
        average_per_day: round_to(per_day(meals.len(), days), 1),
        average_calories: total_calories / count,
        total_calories,
        fiber_rich_percent: fiber_ratio * 100.0,
        health_score: (fiber_ratio * 100.0).clamp(0.0, 100.0),
    }
}

/// Summarize symptoms over a period of `days`
pub fn summarize_symptoms(symptoms: &[SymptomEvent], days: i64) -> SymptomSummary {
    if symptoms.is_empty() {
        return SymptomSummary::default();
    }

    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    let mut types: BTreeMap<String, usize> = BTreeMap::new();
    let mut severity = 0.0;
    for symptom in symptoms {
        severity += f64::from(symptom.severity);
        if let Some(category) = symptom.category {
            *categories.entry(category.to_string()).or_default() += 1;
        }
        if let Some(kind) = symptom.symptom_type {
            *types.entry(kind.to_string()).or_default() += 1;
        }
    }

    SymptomSummary {
        total_symptoms: symptoms.len(),
        average_per_day: round_to(per_day(symptoms.len(), days), 1),
        average_severity: round_to(severity / symptoms.len() as f64, 1),
        most_common_category: most_common(&categories),
        most_common_type: most_common(&types),
    }
}

/// Regimen complexity from the number of medications
fn complexity(count: usize) -> f64 {
    match count {
        0 => 0.0,
        1..=2 => 25.0,
        3..=5 => 50.0,
        6..=10 => 75.0,
        _ => 100.0,
    }
}

/// Summarize medications as of `now`
///
/// A medication is active when it has no end date or ends after `now`.
pub fn summarize_medications(medications: &[MedicationRecord], now: DateTime<Utc>) -> MedicationSummary {
    if medications.is_empty() {
        return MedicationSummary::default();
    }

    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    for medication in medications {
        if let Some(category) = medication.category {
            *categories.entry(category.to_string()).or_default() += 1;
        }
    }

    let flagged = medications.iter().filter(|m| m.is_active).count();

    MedicationSummary {
        total_medications: medications.len(),
        active_medications: medications.iter().filter(|m| m.is_current(now)).count(),
        most_common_category: most_common(&categories),
        adherence_score: flagged as f64 / medications.len() as f64,
        complexity_score: complexity(medications.len()),
    }
}
