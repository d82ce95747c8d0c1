//! Meal attributes and eating habits followed by adverse events

use super::types::TriggerEffect;
use crate::config::TriggerConfig;
use crate::entries::{BowelEvent, MealEvent, SymptomEvent};
use crate::stats::mean;
use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use std::collections::{BTreeMap, BTreeSet};

const LATE_EATING: &str = "late_eating";
const LARGE_MEALS: &str = "large_meals";

/// Significance cut points for one family of triggers
#[derive(Debug, Clone, Copy)]
struct Cutoff {
    symptom: f64,
    bowel: f64,
}

/// Groups meals under trigger labels and measures what follows them
#[derive(Debug, Clone, Default)]
pub struct TriggerAnalyzer {
    config: TriggerConfig,
}

impl TriggerAnalyzer {
    pub fn new(config: TriggerConfig) -> Self {
        Self { config }
    }

    /// Food labels a meal carries
    ///
    /// The meal category is only used when nothing more specific applies.
    pub fn meal_labels(&self, meal: &MealEvent) -> Vec<String> {
        let mut labels = Vec::new();
        if meal.dairy {
            labels.push("dairy".to_string());
        }
        if meal.gluten {
            labels.push("gluten".to_string());
        }
        if meal.spice() > self.config.spicy_level {
            labels.push("spicy_food".to_string());
        }
        if meal.calories > self.config.high_calorie {
            labels.push("high_calorie".to_string());
        }
        if let Some(cuisine) = meal.cuisine.as_deref().filter(|c| !c.is_empty()) {
            labels.push(format!("cuisine_{cuisine}"));
        }
        if labels.is_empty() {
            if let Some(category) = meal.category {
                labels.push(format!("meal_category_{category}"));
            }
        }
        labels
    }

    /// Food and timing triggers that clear their cut points
    ///
    /// Sorted by severity descending, then label.
    pub fn trigger_analysis(
        &self,
        meals: &[MealEvent],
        symptoms: &[SymptomEvent],
        events: &[BowelEvent],
    ) -> Vec<TriggerEffect> {
        let food = Cutoff {
            symptom: self.config.food_symptom_min,
            bowel: self.config.food_bowel_min,
        };
        let timing = Cutoff {
            symptom: self.config.timing_symptom_min,
            bowel: self.config.timing_bowel_min,
        };

        let mut by_label: BTreeMap<String, Vec<&MealEvent>> = BTreeMap::new();
        for meal in meals {
            for label in self.meal_labels(meal) {
                by_label.entry(label).or_default().push(meal);
            }
        }

        let mut triggers: Vec<TriggerEffect> = by_label
            .into_iter()
            .filter_map(|(label, group)| self.measure(label, &group, symptoms, events, food))
            .collect();

        let late: Vec<&MealEvent> = meals
            .iter()
            .filter(|m| m.meal_time.hour() >= self.config.late_eating_hour)
            .collect();
        triggers.extend(self.measure(LATE_EATING.to_string(), &late, symptoms, events, timing));

        let sized: Vec<f64> = meals
            .iter()
            .map(|m| m.calories)
            .filter(|c| *c > 0.0)
            .collect();
        if !sized.is_empty() {
            let threshold = mean(&sized) * self.config.large_meal_factor;
            let large: Vec<&MealEvent> =
                meals.iter().filter(|m| m.calories > threshold).collect();
            triggers.extend(self.measure(LARGE_MEALS.to_string(), &large, symptoms, events, timing));
        }

        triggers.sort_by(|a, b| {
            b.severity
                .total_cmp(&a.severity)
                .then_with(|| a.trigger.cmp(&b.trigger))
        });

        tracing::debug!(count = triggers.len(), "trigger analysis complete");
        triggers
    }

    /// Impact of the events that follow `group`, or `None` below the cutoff
    fn measure(
        &self,
        label: String,
        group: &[&MealEvent],
        symptoms: &[SymptomEvent],
        events: &[BowelEvent],
        cutoff: Cutoff,
    ) -> Option<TriggerEffect> {
        let days: BTreeSet<NaiveDate> = group.iter().map(|m| m.meal_time.date_naive()).collect();
        if days.is_empty() {
            return None;
        }

        let window = Duration::hours(self.config.window_hours);
        let follows = |at: DateTime<Utc>| {
            group
                .iter()
                .any(|m| at > m.meal_time && at <= m.meal_time + window)
        };

        let severity_total: f64 = symptoms
            .iter()
            .filter(|s| follows(s.recorded_at))
            .map(|s| f64::from(s.severity))
            .sum();
        let discomfort: Vec<f64> = events
            .iter()
            .filter(|e| follows(e.recorded_at))
            .map(|e| f64::from(e.pain) + f64::from(e.strain))
            .collect();

        let symptom_increase = (severity_total / days.len() as f64 / 10.0).min(1.0);
        let bowel_impact = if discomfort.is_empty() {
            0.0
        } else {
            (mean(&discomfort) / 10.0).clamp(-1.0, 1.0)
        };

        if symptom_increase <= cutoff.symptom && bowel_impact.abs() <= cutoff.bowel {
            return None;
        }

        Some(TriggerEffect {
            trigger: label,
            symptom_increase,
            bowel_impact,
            frequency: days.len(),
            severity: symptom_increase * 0.6 + bowel_impact.abs() * 0.4,
        })
    }
}
