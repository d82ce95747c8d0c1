//! Day-level correlations between meals and outcomes

use super::types::Correlation;
use crate::aggregate::{aggregate_bowel, aggregate_meals, aggregate_symptoms, by_date, Interval, TimeRange};
use crate::config::CorrelationConfig;
use crate::entries::{BowelEvent, MealEvent, SymptomEvent};
use crate::stats::{
    align_by_key, confidence_from_sample_size, correlation_sign, pearson_correlation, round_to,
    CorrelationStrength,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

type DailySeries = BTreeMap<NaiveDate, f64>;

/// Pearson correlations over calendar days
#[derive(Debug, Clone, Default)]
pub struct CorrelationAnalyzer {
    config: CorrelationConfig,
}

impl CorrelationAnalyzer {
    pub fn new(config: CorrelationConfig) -> Self {
        Self { config }
    }

    /// Correlate one factor series with one outcome series on their shared days
    ///
    /// Returns `None` with fewer than `min_days` shared days.
    pub fn correlate(
        &self,
        factor: &str,
        outcome: &str,
        factor_values: &DailySeries,
        outcome_values: &DailySeries,
    ) -> Option<Correlation> {
        let (x, y) = align_by_key(factor_values, outcome_values);
        if x.len() < self.config.min_days {
            tracing::debug!(
                factor,
                outcome,
                days = x.len(),
                "not enough shared days to correlate"
            );
            return None;
        }

        let r = pearson_correlation(&x, &y);
        let strength = CorrelationStrength::classify(r, &self.config);

        Some(Correlation {
            factor: factor.to_string(),
            outcome: outcome.to_string(),
            strength: round_to(r, 3).clamp(-1.0, 1.0),
            confidence: confidence_from_sample_size(x.len()).clamp(0.0, 1.0),
            description: format!(
                "There is a {} {} correlation between {} and {} (r={:.3}).",
                strength,
                correlation_sign(r),
                factor,
                outcome,
                r
            ),
            sample_size: x.len(),
        })
    }

    /// Meal attributes against bowel outcomes on days that have both
    pub fn meal_bowel_correlations(
        &self,
        meals: &[MealEvent],
        events: &[BowelEvent],
    ) -> Vec<Correlation> {
        let range = TimeRange::unbounded();
        let meal_days = by_date(
            aggregate_meals(meals, Interval::Day, &range, self.config.spicy_meal_level),
            |a| a.period_start,
        );
        let bowel_days = by_date(aggregate_bowel(events, Interval::Day, &range), |a| {
            a.period_start
        });

        let fiber: DailySeries = meal_days
            .iter()
            .map(|(day, m)| (*day, m.fiber_rich_count as f64))
            .collect();
        let calories: DailySeries = meal_days
            .iter()
            .map(|(day, m)| (*day, m.total_calories))
            .collect();
        let spice: DailySeries = meal_days
            .iter()
            .map(|(day, m)| (*day, f64::from(m.max_spicy_level.unwrap_or(0))))
            .collect();

        let bristol: DailySeries = bowel_days.iter().map(|(d, b)| (*d, b.avg_bristol)).collect();
        let satisfaction: DailySeries = bowel_days
            .iter()
            .map(|(d, b)| (*d, b.avg_satisfaction))
            .collect();
        let pain: DailySeries = bowel_days.iter().map(|(d, b)| (*d, b.avg_pain)).collect();

        [
            self.correlate("Fiber-Rich Meals", "Bristol Stool Type", &fiber, &bristol),
            self.correlate(
                "Daily Calorie Intake",
                "Bowel Movement Satisfaction",
                &calories,
                &satisfaction,
            ),
            self.correlate("Spicy Food Level", "Bowel Movement Pain", &spice, &pain),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Dietary flags against symptom severity on every day with meals
    ///
    /// A meal day without symptoms counts as severity 0.
    pub fn meal_symptom_correlations(
        &self,
        meals: &[MealEvent],
        symptoms: &[SymptomEvent],
    ) -> Vec<Correlation> {
        let range = TimeRange::unbounded();
        let meal_days = by_date(
            aggregate_meals(meals, Interval::Day, &range, self.config.spicy_meal_level),
            |a| a.period_start,
        );
        let symptom_days = by_date(aggregate_symptoms(symptoms, Interval::Day, &range), |a| {
            a.period_start
        });

        let severity: DailySeries = meal_days
            .keys()
            .map(|day| (*day, symptom_days.get(day).map_or(0.0, |s| s.avg_severity)))
            .collect();
        let count_of = |field: fn(&crate::aggregate::MealAggregate) -> usize| -> DailySeries {
            meal_days
                .iter()
                .map(|(day, m)| (*day, field(m) as f64))
                .collect()
        };

        [
            self.correlate(
                "Spicy Food Consumption",
                "Symptom Severity",
                &count_of(|m| m.spicy_count),
                &severity,
            ),
            self.correlate(
                "Dairy Consumption",
                "Symptom Severity",
                &count_of(|m| m.dairy_count),
                &severity,
            ),
            self.correlate(
                "Gluten Consumption",
                "Symptom Severity",
                &count_of(|m| m.gluten_count),
                &severity,
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_too_few_days_yields_nothing() {
        let analyzer = CorrelationAnalyzer::default();
        let meals = vec![
            MealEvent::new("Oats", at(1, 8)).fiber_rich(),
            MealEvent::new("Toast", at(2, 8)),
        ];
        let events = vec![BowelEvent::new(4, at(1, 10)), BowelEvent::new(2, at(2, 10))];

        assert!(analyzer.meal_bowel_correlations(&meals, &events).is_empty());
    }

    #[test]
    fn test_fiber_bristol_positive() {
        let analyzer = CorrelationAnalyzer::default();
        let mut meals = Vec::new();
        let mut events = Vec::new();
        for (day, fiber_meals, bristol) in [(1, 0, 2), (2, 1, 3), (3, 2, 4), (4, 3, 5)] {
            meals.push(MealEvent::new("Plain", at(day, 7)));
            for _ in 0..fiber_meals {
                meals.push(MealEvent::new("Beans", at(day, 12)).fiber_rich());
            }
            events.push(BowelEvent::new(bristol, at(day, 18)));
        }

        let correlations = analyzer.meal_bowel_correlations(&meals, &events);
        let fiber = correlations
            .iter()
            .find(|c| c.factor == "Fiber-Rich Meals")
            .unwrap();

        assert_eq!(fiber.outcome, "Bristol Stool Type");
        assert_eq!(fiber.strength, 1.0);
        assert_eq!(fiber.sample_size, 4);
        assert_eq!(
            fiber.description,
            "There is a strong positive correlation between Fiber-Rich Meals and Bristol Stool Type (r=1.000)."
        );
    }

    #[test]
    fn test_bowel_correlations_use_shared_days_only() {
        let analyzer = CorrelationAnalyzer::default();
        let meals: Vec<MealEvent> = (1..=5)
            .map(|d| MealEvent::new("Soup", at(d, 12)).calories(300.0 * d as f64))
            .collect();
        let events = vec![
            BowelEvent::new(4, at(1, 9)).satisfaction(3),
            BowelEvent::new(4, at(2, 9)).satisfaction(5),
            BowelEvent::new(4, at(9, 9)).satisfaction(9),
        ];

        // Only days 1 and 2 overlap
        assert!(analyzer.meal_bowel_correlations(&meals, &events).is_empty());
    }

    #[test]
    fn test_symptom_free_meal_days_count_as_zero() {
        let analyzer = CorrelationAnalyzer::default();
        let meals = vec![
            MealEvent::new("Milkshake", at(1, 12)).dairy(),
            MealEvent::new("Salad", at(2, 12)),
            MealEvent::new("Cheese", at(3, 12)).dairy(),
            MealEvent::new("Rice", at(4, 12)),
        ];
        let symptoms = vec![
            SymptomEvent::new("Bloating", 7, at(1, 15)),
            SymptomEvent::new("Bloating", 6, at(3, 15)),
        ];

        let correlations = analyzer.meal_symptom_correlations(&meals, &symptoms);
        let dairy = correlations
            .iter()
            .find(|c| c.factor == "Dairy Consumption")
            .unwrap();

        assert_eq!(dairy.sample_size, 4);
        assert!(dairy.strength > 0.9);
        assert!((0.0..=1.0).contains(&dairy.confidence));

        // No spicy or gluten meals: constant factor gives r = 0
        let gluten = correlations
            .iter()
            .find(|c| c.factor == "Gluten Consumption")
            .unwrap();
        assert_eq!(gluten.strength, 0.0);
        assert!(gluten.description.starts_with("There is a weak positive"));
    }
}
