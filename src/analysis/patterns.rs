//! Descriptive pattern summaries
//!
//! No minimum sample sizes: empty input gives empty or zero results.

use super::types::*;
use crate::config::{PatternConfig, TriggerConfig};
use crate::entries::{BowelEvent, MealEvent, SymptomEvent};
use crate::stats::{mean, round_to};
use chrono::{DateTime, Duration, Timelike, Utc};
use std::collections::{BTreeMap, BTreeSet};

const UNCATEGORIZED: &str = "UNCATEGORIZED";

/// Sort `(name, count)` pairs by count descending, then name
pub(crate) fn rank_by_count(counts: BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().filter(|(_, c)| *c > 0).collect();
    // BTreeMap order already breaks ties alphabetically; the sort is stable
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Dietary flags carried by a meal, by name
fn meal_flags(meal: &MealEvent) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if meal.dairy {
        flags.push("dairy");
    }
    if meal.gluten {
        flags.push("gluten");
    }
    if meal.spice() > 0 {
        flags.push("spicy");
    }
    if meal.fiber_rich {
        flags.push("fiber");
    }
    flags
}

/// Regularity of gaps between movements, 1.0 for a steady daily rhythm
///
/// `1 - mean((gap_hours - 24)^2) / 24^2`, clamped to [0, 1]. Fewer than
/// two movements score 0.
pub fn bowel_regularity(events: &[BowelEvent]) -> f64 {
    if events.len() < 2 {
        return 0.0;
    }

    let mut times: Vec<DateTime<Utc>> = events.iter().map(|e| e.recorded_at).collect();
    times.sort();

    let deviations: Vec<f64> = times
        .windows(2)
        .map(|w| {
            let hours = (w[1] - w[0]).num_seconds() as f64 / 3600.0;
            (hours - 24.0).powi(2)
        })
        .collect();

    let score = 1.0 - mean(&deviations) / (24.0 * 24.0);
    round_to(score.clamp(0.0, 1.0), 2)
}

/// Computes eating, bowel, symptom and lifestyle patterns
#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    pattern: PatternConfig,
    trigger: TriggerConfig,
}

impl PatternAnalyzer {
    pub fn new(pattern: PatternConfig, trigger: TriggerConfig) -> Self {
        Self { pattern, trigger }
    }

    /// Meal-hour histogram, common dietary flags and suspected problem flags
    pub fn analyze_eating_patterns(
        &self,
        meals: &[MealEvent],
        symptoms: &[SymptomEvent],
    ) -> EatingPattern {
        let mut hours: BTreeMap<u32, usize> = BTreeMap::new();
        let mut flags: BTreeMap<String, usize> = BTreeMap::new();

        for meal in meals {
            *hours.entry(meal.meal_time.hour()).or_default() += 1;
            for flag in meal_flags(meal) {
                *flags.entry(flag.to_string()).or_default() += 1;
            }
        }

        let common_ingredients: Vec<String> =
            rank_by_count(flags).into_iter().map(|(name, _)| name).collect();

        let mentions: Vec<String> = symptoms
            .iter()
            .flat_map(|s| s.triggers.iter())
            .map(|t| t.trim().to_lowercase())
            .collect();

        let problem_ingredients = common_ingredients
            .iter()
            .filter(|flag| {
                mentions.iter().filter(|m| m.contains(flag.as_str())).count()
                    >= self.pattern.min_problem_mentions
            })
            .cloned()
            .collect();

        EatingPattern {
            meal_timings: hours
                .into_iter()
                .map(|(hour, frequency)| MealTiming { hour, frequency })
                .collect(),
            common_ingredients,
            problem_ingredients,
        }
    }

    /// Frequency per active day, mean Bristol type, and share of movements
    /// within the meal window after any meal
    pub fn analyze_bowel_patterns(&self, events: &[BowelEvent], meals: &[MealEvent]) -> BowelPattern {
        if events.is_empty() {
            return BowelPattern::default();
        }

        let days: BTreeSet<_> = events.iter().map(|e| e.recorded_at.date_naive()).collect();
        let bristol: Vec<f64> = events.iter().map(|e| e.bristol_type as f64).collect();

        let window = Duration::hours(self.pattern.meal_bowel_window_hours);
        let after_meal = events
            .iter()
            .filter(|e| {
                meals.iter().any(|m| {
                    let gap = e.recorded_at - m.meal_time;
                    gap >= Duration::zero() && gap <= window
                })
            })
            .count();

        BowelPattern {
            frequency: round_to(events.len() as f64 / days.len() as f64, 2),
            consistency: round_to(mean(&bristol), 2),
            meal_correlation: round_to(after_meal as f64 / events.len() as f64, 2),
        }
    }

    /// Counts by name and category, mean severity by name
    pub fn analyze_symptom_patterns(&self, symptoms: &[SymptomEvent]) -> SymptomPattern {
        let mut pattern = SymptomPattern::default();
        let mut severities: BTreeMap<String, Vec<f64>> = BTreeMap::new();

        for symptom in symptoms {
            *pattern.common_symptoms.entry(symptom.name.clone()).or_default() += 1;

            let category = symptom
                .category
                .map(|c| c.to_string())
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            *pattern.frequency.entry(category).or_default() += 1;

            severities
                .entry(symptom.name.clone())
                .or_default()
                .push(symptom.severity as f64);
        }

        pattern.severity = severities
            .into_iter()
            .map(|(name, values)| (name, round_to(mean(&values), 2)))
            .collect();
        pattern
    }

    /// Dietary habits with their symptom impact, bowel regularity, and the
    /// triggers users name most often
    pub fn analyze_lifestyle_patterns(
        &self,
        meals: &[MealEvent],
        events: &[BowelEvent],
        symptoms: &[SymptomEvent],
    ) -> LifestylePattern {
        let window = Duration::hours(self.trigger.window_hours);
        let followed_by_symptom = |meal: &MealEvent| {
            symptoms.iter().any(|s| {
                let gap = s.recorded_at - meal.meal_time;
                gap > Duration::zero() && gap <= window
            })
        };

        let habits: [(&str, Box<dyn Fn(&MealEvent) -> bool + '_>); 5] = [
            ("Fiber-rich meals", Box::new(|m: &MealEvent| m.fiber_rich)),
            ("Dairy meals", Box::new(|m: &MealEvent| m.dairy)),
            ("Gluten meals", Box::new(|m: &MealEvent| m.gluten)),
            (
                "Spicy meals",
                Box::new(|m: &MealEvent| m.spice() > self.trigger.spicy_level),
            ),
            (
                "Late eating",
                Box::new(|m: &MealEvent| m.meal_time.hour() >= self.trigger.late_eating_hour),
            ),
        ];

        let dietary_habits = habits
            .iter()
            .filter_map(|(description, matches)| {
                let flagged: Vec<&MealEvent> = meals.iter().filter(|m| matches(*m)).collect();
                if flagged.is_empty() {
                    return None;
                }
                let hits = flagged.iter().filter(|&&m| followed_by_symptom(m)).count();
                Some(DietaryHabit {
                    description: description.to_string(),
                    frequency: flagged.len(),
                    impact: round_to(hits as f64 / flagged.len() as f64, 2),
                })
            })
            .collect();

        let mut mentions: BTreeMap<String, usize> = BTreeMap::new();
        for symptom in symptoms {
            for trigger in &symptom.triggers {
                let key = trigger.trim().to_lowercase();
                if !key.is_empty() {
                    *mentions.entry(key).or_default() += 1;
                }
            }
        }

        let symptom_triggers = rank_by_count(mentions)
            .into_iter()
            .map(|(trigger, count)| SymptomTrigger {
                trigger,
                mentions: count,
                confidence: round_to(count as f64 / symptoms.len() as f64, 2),
            })
            .collect();

        LifestylePattern {
            dietary_habits,
            bowel_regularity: bowel_regularity(events),
            symptom_triggers,
        }
    }
}
