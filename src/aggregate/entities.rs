//! Per-entity group records

use super::interval::{Bucket, Interval};
use super::range::TimeRange;
use super::values::group_by;
use crate::entries::{BowelEvent, MealEvent, MedicationRecord, SymptomEvent};
use crate::stats::mean;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Bowel movements in one bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BowelAggregate {
    pub bucket: Bucket,
    pub period_start: NaiveDate,
    pub count: usize,
    pub avg_bristol: f64,
    pub avg_pain: f64,
    pub avg_strain: f64,
    pub avg_satisfaction: f64,
}

/// Meals in one bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealAggregate {
    pub bucket: Bucket,
    pub period_start: NaiveDate,
    pub count: usize,
    pub total_calories: f64,
    pub avg_calories: f64,
    pub fiber_rich_count: usize,
    /// Meals with a recorded spicy level above the threshold
    pub spicy_count: usize,
    pub dairy_count: usize,
    pub gluten_count: usize,
    /// Highest recorded spicy level, `None` when no meal recorded one
    pub max_spicy_level: Option<u8>,
    /// Mean over meals that recorded a spicy level
    pub avg_spicy_level: Option<f64>,
}

/// Symptoms in one bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAggregate {
    pub bucket: Bucket,
    pub period_start: NaiveDate,
    pub count: usize,
    pub avg_severity: f64,
    pub max_severity: u8,
}

fn avg_of<T>(items: &[&T], field: impl Fn(&T) -> f64) -> f64 {
    let values: Vec<f64> = items.iter().map(|item| field(*item)).collect();
    mean(&values)
}

/// Group bowel movements and average their scales
pub fn aggregate_bowel(
    events: &[BowelEvent],
    interval: Interval,
    range: &TimeRange,
) -> Vec<BowelAggregate> {
    group_by(events, interval, range)
        .into_iter()
        .map(|(bucket, group)| BowelAggregate {
            bucket,
            period_start: bucket.start_date(),
            count: group.len(),
            avg_bristol: avg_of(&group, |e| e.bristol_type as f64),
            avg_pain: avg_of(&group, |e| e.pain as f64),
            avg_strain: avg_of(&group, |e| e.strain as f64),
            avg_satisfaction: avg_of(&group, |e| e.satisfaction as f64),
        })
        .collect()
}

/// Group meals and count their dietary flags
///
/// `spicy_threshold` is the level a meal must exceed to count as spicy.
pub fn aggregate_meals(
    meals: &[MealEvent],
    interval: Interval,
    range: &TimeRange,
    spicy_threshold: u8,
) -> Vec<MealAggregate> {
    group_by(meals, interval, range)
        .into_iter()
        .map(|(bucket, group)| {
            let total_calories: f64 = group.iter().map(|m| m.calories).sum();
            let spicy_levels: Vec<f64> = group
                .iter()
                .filter_map(|m| m.spicy_level)
                .map(f64::from)
                .collect();

            MealAggregate {
                bucket,
                period_start: bucket.start_date(),
                count: group.len(),
                total_calories,
                avg_calories: total_calories / group.len() as f64,
                fiber_rich_count: group.iter().filter(|m| m.fiber_rich).count(),
                spicy_count: group
                    .iter()
                    .filter(|m| m.spicy_level.map_or(false, |s| s > spicy_threshold))
                    .count(),
                dairy_count: group.iter().filter(|m| m.dairy).count(),
                gluten_count: group.iter().filter(|m| m.gluten).count(),
                max_spicy_level: group.iter().filter_map(|m| m.spicy_level).max(),
                avg_spicy_level: if spicy_levels.is_empty() {
                    None
                } else {
                    Some(mean(&spicy_levels))
                },
            }
        })
        .collect()
}

/// Group symptoms and summarize severity
pub fn aggregate_symptoms(
    symptoms: &[SymptomEvent],
    interval: Interval,
    range: &TimeRange,
) -> Vec<SymptomAggregate> {
    group_by(symptoms, interval, range)
        .into_iter()
        .map(|(bucket, group)| SymptomAggregate {
            bucket,
            period_start: bucket.start_date(),
            count: group.len(),
            avg_severity: avg_of(&group, |s| s.severity as f64),
            max_severity: group.iter().map(|s| s.severity).max().unwrap_or(0),
        })
        .collect()
}

/// Key aggregates by their first day for joins across entity types
pub fn by_date<A, F>(aggregates: Vec<A>, date: F) -> BTreeMap<NaiveDate, A>
where
    F: Fn(&A) -> NaiveDate,
{
    aggregates.into_iter().map(|a| (date(&a), a)).collect()
}

/// Everything logged on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregation {
    pub date: NaiveDate,
    pub bowel_count: usize,
    pub avg_bristol: Option<f64>,
    pub avg_pain: Option<f64>,
    pub avg_satisfaction: Option<f64>,
    pub meal_count: usize,
    pub total_calories: f64,
    pub fiber_rich_meals: usize,
    pub spicy_meals: usize,
    pub symptom_count: usize,
    pub avg_severity: Option<f64>,
    pub max_severity: Option<u8>,
    /// Medications whose course started on this day
    pub medications_started: Vec<String>,
}

/// Longest bounded range that [`aggregate_daily`] fills day by day
pub const MAX_FILLED_DAYS: i64 = 3660;

/// One record per day of a bounded range, empty days included
///
/// Unbounded ranges, and ranges longer than [`MAX_FILLED_DAYS`], cover only
/// days that have at least one entry.
pub fn aggregate_daily(
    bowel: &[BowelEvent],
    meals: &[MealEvent],
    symptoms: &[SymptomEvent],
    medications: &[MedicationRecord],
    range: &TimeRange,
    spicy_threshold: u8,
) -> Vec<DailyAggregation> {
    let bowel_days = by_date(aggregate_bowel(bowel, Interval::Day, range), |a| a.period_start);
    let meal_days = by_date(
        aggregate_meals(meals, Interval::Day, range, spicy_threshold),
        |a| a.period_start,
    );
    let symptom_days = by_date(aggregate_symptoms(symptoms, Interval::Day, range), |a| {
        a.period_start
    });

    let mut started: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for medication in medications {
        if let Some(start) = medication.start_date {
            if range.contains(start) {
                started
                    .entry(start.date_naive())
                    .or_default()
                    .push(medication.name.clone());
            }
        }
    }

    let mut days = if range.day_count() <= MAX_FILLED_DAYS {
        range.days()
    } else {
        tracing::debug!(
            days = range.day_count(),
            "range too long to fill, listing active days only"
        );
        Vec::new()
    };
    if days.is_empty() {
        let mut seen: Vec<NaiveDate> = bowel_days
            .keys()
            .chain(meal_days.keys())
            .chain(symptom_days.keys())
            .chain(started.keys())
            .copied()
            .collect();
        seen.sort();
        seen.dedup();
        days = seen;
    }

    days.into_iter()
        .map(|date| {
            let bowel = bowel_days.get(&date);
            let meals = meal_days.get(&date);
            let symptoms = symptom_days.get(&date);

            DailyAggregation {
                date,
                bowel_count: bowel.map_or(0, |b| b.count),
                avg_bristol: bowel.map(|b| b.avg_bristol),
                avg_pain: bowel.map(|b| b.avg_pain),
                avg_satisfaction: bowel.map(|b| b.avg_satisfaction),
                meal_count: meals.map_or(0, |m| m.count),
                total_calories: meals.map_or(0.0, |m| m.total_calories),
                fiber_rich_meals: meals.map_or(0, |m| m.fiber_rich_count),
                spicy_meals: meals.map_or(0, |m| m.spicy_count),
                symptom_count: symptoms.map_or(0, |s| s.count),
                avg_severity: symptoms.map(|s| s.avg_severity),
                max_severity: symptoms.map(|s| s.max_severity),
                medications_started: started.get(&date).cloned().unwrap_or_default(),
            }
        })
        .collect()
}
