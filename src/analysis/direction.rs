//! Health-score direction and first-half/second-half trend statements

use super::trends::TrendAnalyzer;
use crate::entries::{BowelEvent, MealEvent, SymptomEvent};
use crate::stats::{mean, relative_change, TrendDirection};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Default)]
struct DayScore {
    total: f64,
    factors: usize,
}

/// Split ascending days into first and second halves at the midpoint
fn halves<V>(days: &BTreeMap<NaiveDate, V>) -> (Vec<&V>, Vec<&V>) {
    let midpoint = days.len() / 2;
    let values: Vec<&V> = days.values().collect();
    let (first, second) = values.split_at(midpoint);
    (first.to_vec(), second.to_vec())
}

impl TrendAnalyzer {
    /// Daily unified health scores on a 0-100 scale, ascending by day
    ///
    /// Each bowel movement contributes `1 - |bristol - 4| / 6`, each meal up
    /// to 1.0 for being fiber-rich and under 800 kcal, each symptom
    /// `-(1 - severity / 10)`. A day's score is the mean contribution
    /// rescaled from [-1, 1].
    pub fn daily_health_scores(
        &self,
        bowel: &[BowelEvent],
        meals: &[MealEvent],
        symptoms: &[SymptomEvent],
    ) -> Vec<f64> {
        let mut days: BTreeMap<NaiveDate, DayScore> = BTreeMap::new();

        for event in bowel {
            let day = days.entry(event.recorded_at.date_naive()).or_default();
            day.total += 1.0 - (event.bristol_type as f64 - 4.0).abs() / 6.0;
            day.factors += 1;
        }

        for meal in meals {
            let mut nutrition = 0.0;
            if meal.fiber_rich {
                nutrition += 0.5;
            }
            if meal.calories > 0.0 && meal.calories < 800.0 {
                nutrition += 0.5;
            }
            let day = days.entry(meal.meal_time.date_naive()).or_default();
            day.total += nutrition;
            day.factors += 1;
        }

        for symptom in symptoms {
            let day = days.entry(symptom.recorded_at.date_naive()).or_default();
            day.total -= 1.0 - symptom.severity as f64 / 10.0;
            day.factors += 1;
        }

        days.values()
            .filter(|d| d.factors > 0)
            .map(|d| (d.total / d.factors as f64 + 1.0) * 50.0)
            .collect()
    }

    /// Moving average over the configured window
    ///
    /// Series shorter than the window are returned unchanged.
    pub fn moving_average(&self, scores: &[f64]) -> Vec<f64> {
        let window = self.config().moving_average_window.max(1);
        if scores.len() < window {
            return scores.to_vec();
        }
        scores.windows(window).map(mean).collect()
    }

    /// Compare the smoothed health score's first half with its second half
    ///
    /// Stable when no bowel movements exist or fewer than two smoothed values remain.
    pub fn determine_trend_direction(
        &self,
        bowel: &[BowelEvent],
        meals: &[MealEvent],
        symptoms: &[SymptomEvent],
    ) -> TrendDirection {
        if bowel.is_empty() {
            return TrendDirection::Stable;
        }

        let smoothed = self.moving_average(&self.daily_health_scores(bowel, meals, symptoms));
        if smoothed.len() < 2 {
            return TrendDirection::Stable;
        }

        let (first, second) = smoothed.split_at(smoothed.len() / 2);
        let first = mean(first);
        let second = mean(second);
        let ratio = self.config().direction_change_ratio;

        if second > first * (1.0 + ratio) {
            TrendDirection::Improving
        } else if second < first * (1.0 - ratio) {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    }

    /// Short statements about notable changes between the two halves of the log
    ///
    /// Bowel statements come first, then meals, then symptoms; capped at
    /// `max_significant_trends`.
    pub fn significant_trends(
        &self,
        bowel: &[BowelEvent],
        meals: &[MealEvent],
        symptoms: &[SymptomEvent],
    ) -> Vec<String> {
        let mut trends = self.bowel_statements(bowel);
        trends.extend(self.meal_statements(meals));
        trends.extend(self.symptom_statements(symptoms));
        trends.truncate(self.config().max_significant_trends);
        trends
    }

    fn bowel_statements(&self, bowel: &[BowelEvent]) -> Vec<String> {
        let config = self.config();
        let mut statements = Vec::new();
        if bowel.len() < config.significant_min_samples {
            return statements;
        }

        // (movements, bristol sum) per day
        let mut days: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();
        for event in bowel {
            let day = days.entry(event.recorded_at.date_naive()).or_default();
            day.0 += 1;
            day.1 += event.bristol_type as f64;
        }
        if days.len() < 2 {
            return statements;
        }

        let (first, second) = halves(&days);
        let frequency = |half: &[&(usize, f64)]| mean(&half.iter().map(|d| d.0 as f64).collect::<Vec<_>>());
        let bristol =
            |half: &[&(usize, f64)]| mean(&half.iter().map(|d| d.1 / d.0 as f64).collect::<Vec<_>>());

        let first_freq = frequency(&first);
        let second_freq = frequency(&second);
        if let Some(change) = relative_change(first_freq, second_freq) {
            if change.abs() >= config.bowel_frequency_change {
                statements.push(if change > 0.0 {
                    "Increased bowel movement frequency".to_string()
                } else {
                    "Decreased bowel movement frequency".to_string()
                });
            }
        }

        let change = bristol(&second) - bristol(&first);
        if change.abs() >= config.bristol_change {
            statements.push(if change > 0.0 {
                "Stool consistency becoming looser".to_string()
            } else {
                "Stool consistency becoming firmer".to_string()
            });
        }

        statements
    }

    fn meal_statements(&self, meals: &[MealEvent]) -> Vec<String> {
        let config = self.config();
        let mut statements = Vec::new();
        if meals.len() < config.significant_min_samples {
            return statements;
        }

        // (meals, fiber-rich meals, calories) per day
        let mut days: BTreeMap<NaiveDate, (usize, usize, f64)> = BTreeMap::new();
        for meal in meals {
            let day = days.entry(meal.meal_time.date_naive()).or_default();
            day.0 += 1;
            if meal.fiber_rich {
                day.1 += 1;
            }
            if meal.calories > 0.0 {
                day.2 += meal.calories;
            }
        }

        let (first, second) = halves(&days);
        let fiber_ratio = |half: &[&(usize, usize, f64)]| {
            mean(&half.iter().map(|d| d.1 as f64 / d.0 as f64).collect::<Vec<_>>())
        };
        let calories_per_meal = |half: &[&(usize, usize, f64)]| {
            mean(&half.iter().map(|d| d.2 / d.0 as f64).collect::<Vec<_>>())
        };

        if let Some(change) = positive_change(fiber_ratio(&first), fiber_ratio(&second)) {
            if change >= config.fiber_change {
                statements.push("Increasing fiber intake".to_string());
            } else if change <= -config.fiber_change {
                statements.push("Decreasing fiber intake".to_string());
            }
        }

        if let Some(change) = positive_change(calories_per_meal(&first), calories_per_meal(&second))
        {
            if change >= config.calorie_change {
                statements.push("Increasing caloric intake".to_string());
            } else if change <= -config.calorie_change {
                statements.push("Decreasing caloric intake".to_string());
            }
        }

        statements
    }

    fn symptom_statements(&self, symptoms: &[SymptomEvent]) -> Vec<String> {
        let config = self.config();
        let mut statements = Vec::new();
        if symptoms.len() < config.significant_min_samples {
            return statements;
        }

        // (symptoms, severity sum) per day
        let mut days: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();
        for symptom in symptoms {
            let day = days.entry(symptom.recorded_at.date_naive()).or_default();
            day.0 += 1;
            day.1 += symptom.severity as f64;
        }
        if days.len() < config.significant_min_samples {
            return statements;
        }

        let (first, second) = halves(&days);
        let severity =
            |half: &[&(usize, f64)]| mean(&half.iter().map(|d| d.1 / d.0 as f64).collect::<Vec<_>>());

        if let Some(change) = positive_change(severity(&first), severity(&second)) {
            if change >= config.severity_change {
                statements.push("Increasing symptom severity".to_string());
            } else if change <= -config.severity_change {
                statements.push("Decreasing symptom severity".to_string());
            }
        }

        statements
    }
}

/// Relative change, only when both halves are positive
fn positive_change(first: f64, second: f64) -> Option<f64> {
    if first > 0.0 && second > 0.0 {
        relative_change(first, second)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn test_direction_stable_without_bowel_data() {
        let analyzer = TrendAnalyzer::default();
        let meals = vec![MealEvent::new("Soup", day(0)).calories(300.0)];
        assert_eq!(
            analyzer.determine_trend_direction(&[], &meals, &[]),
            TrendDirection::Stable
        );
        // one day of data cannot show a direction
        let bowel = vec![BowelEvent::new(4, day(0))];
        assert_eq!(
            analyzer.determine_trend_direction(&bowel, &[], &[]),
            TrendDirection::Stable
        );
    }

    #[test]
    fn test_daily_health_scores() {
        let analyzer = TrendAnalyzer::default();
        let bowel = vec![BowelEvent::new(4, day(0)), BowelEvent::new(1, day(1))];
        let meals = vec![MealEvent::new("Oats", day(0)).fiber_rich().calories(400.0)];
        let symptoms = vec![SymptomEvent::new("Cramps", 10, day(1))];

        let scores = analyzer.daily_health_scores(&bowel, &meals, &symptoms);
        // day 0: (1.0 + 1.0) / 2 -> 100; day 1: (0.5 - 0.0) / 2 -> 62.5
        assert_eq!(scores, vec![100.0, 62.5]);
    }

    #[test]
    fn test_direction_improving() {
        let analyzer = TrendAnalyzer::default();
        // two weeks of hard stools followed by two weeks of normal ones
        let bowel: Vec<BowelEvent> = (0..28)
            .map(|n| BowelEvent::new(if n < 14 { 1 } else { 4 }, day(n)))
            .collect();
        assert_eq!(
            analyzer.determine_trend_direction(&bowel, &[], &[]),
            TrendDirection::Improving
        );

        let reversed: Vec<BowelEvent> = (0..28)
            .map(|n| BowelEvent::new(if n < 14 { 4 } else { 1 }, day(n)))
            .collect();
        assert_eq!(
            analyzer.determine_trend_direction(&reversed, &[], &[]),
            TrendDirection::Declining
        );
    }

    #[test]
    fn test_moving_average_short_series() {
        let analyzer = TrendAnalyzer::default();
        assert_eq!(analyzer.moving_average(&[1.0, 2.0]), vec![1.0, 2.0]);
        let long: Vec<f64> = (0..8).map(|n| n as f64).collect();
        assert_eq!(analyzer.moving_average(&long), vec![3.0, 4.0]);
    }

    #[test]
    fn test_significant_bowel_trends() {
        let analyzer = TrendAnalyzer::default();
        let mut bowel = Vec::new();
        // days 0-2: one firm movement per day; days 3-5: two loose ones
        for n in 0..3 {
            bowel.push(BowelEvent::new(2, day(n)));
        }
        for n in 3..6 {
            bowel.push(BowelEvent::new(6, day(n)));
            bowel.push(BowelEvent::new(6, day(n) + Duration::hours(6)));
        }

        let trends = analyzer.significant_trends(&bowel, &[], &[]);
        assert_eq!(
            trends,
            vec![
                "Increased bowel movement frequency".to_string(),
                "Stool consistency becoming looser".to_string(),
            ]
        );
    }

    #[test]
    fn test_significant_meal_and_symptom_trends() {
        let analyzer = TrendAnalyzer::default();
        let meals: Vec<MealEvent> = (0..6)
            .map(|n| {
                let meal = MealEvent::new("Meal", day(n)).calories(if n < 3 { 500.0 } else { 900.0 });
                if n < 3 || n == 5 {
                    meal.fiber_rich()
                } else {
                    meal
                }
            })
            .collect();
        let symptoms: Vec<SymptomEvent> = (0..6)
            .map(|n| SymptomEvent::new("Bloating", if n < 3 { 8 } else { 4 }, day(n)))
            .collect();

        let trends = analyzer.significant_trends(&[], &meals, &symptoms);
        assert_eq!(
            trends,
            vec![
                "Decreasing fiber intake".to_string(),
                "Increasing caloric intake".to_string(),
                "Decreasing symptom severity".to_string(),
            ]
        );
    }

    #[test]
    fn test_significant_trends_need_samples() {
        let analyzer = TrendAnalyzer::default();
        let bowel: Vec<BowelEvent> = (0..4).map(|n| BowelEvent::new(1 + n as u8 * 2, day(n))).collect();
        assert!(analyzer.significant_trends(&bowel, &[], &[]).is_empty());
    }

    #[test]
    fn test_positive_change_requires_both_halves() {
        assert_eq!(positive_change(0.0, 3.0), None);
        assert_eq!(positive_change(2.0, 0.0), None);
        assert_eq!(positive_change(4.0, 5.0), Some(0.25));
    }
}
