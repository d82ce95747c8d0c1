//! Trend Analyzer
//!
//! Fits least-squares slopes over weekly aggregates of a single metric.
//!
//! ## Pipeline
//!
//! 1. Bucket raw samples by ISO week with the metric's reduction
//! 2. Fit a slope over (week index, value)
//! 3. Direction from the raw slope sign versus the metric's threshold
//! 4. Confidence from the number of weekly points
//! 5. Significance: negative or non-finite slope is Low, otherwise
//!    High at the configured confidence, else Moderate
//!
//! The analyzer reports raw slope direction only. Metric polarity (lower
//! pain is better) is applied by [`TrendAnalyzer::overall_trend`].

use super::types::{Significance, TrendLine};
use crate::aggregate::{aggregate_values, Interval, Reduction, TimeRange, TimedValue};
use crate::config::TrendConfig;
use crate::entries::{BowelEvent, MealEvent, SymptomEvent};
use crate::stats::{
    confidence_from_sample_size, interpret_direction, round_to, trend_slope, TrendDirection,
};

pub const BRISTOL_TYPE: &str = "Bristol Type";
pub const PAIN: &str = "Pain";
pub const STRAIN: &str = "Strain";
pub const SATISFACTION: &str = "Satisfaction";
pub const BOWEL_FREQUENCY: &str = "Frequency";
pub const SYMPTOM_SEVERITY: &str = "Symptom Severity";
pub const SYMPTOM_FREQUENCY: &str = "Symptom Frequency";
pub const AVERAGE_CALORIES: &str = "Average Calories";
pub const MEAL_FREQUENCY: &str = "Meal Frequency";

/// A named metric extracted from entries, with how to reduce each week
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub name: String,
    pub samples: Vec<TimedValue>,
    pub reduction: Reduction,
}

impl MetricSeries {
    pub fn new(name: impl Into<String>, samples: Vec<TimedValue>, reduction: Reduction) -> Self {
        Self {
            name: name.into(),
            samples,
            reduction,
        }
    }

    fn from_bowel(name: &str, events: &[BowelEvent], value: impl Fn(&BowelEvent) -> f64) -> Self {
        let samples = events
            .iter()
            .map(|e| TimedValue::new(e.recorded_at, value(e)))
            .collect();
        Self::new(name, samples, Reduction::Mean)
    }

    pub fn bristol(events: &[BowelEvent]) -> Self {
        Self::from_bowel(BRISTOL_TYPE, events, |e| e.bristol_type as f64)
    }

    pub fn pain(events: &[BowelEvent]) -> Self {
        Self::from_bowel(PAIN, events, |e| e.pain as f64)
    }

    pub fn strain(events: &[BowelEvent]) -> Self {
        Self::from_bowel(STRAIN, events, |e| e.strain as f64)
    }

    pub fn satisfaction(events: &[BowelEvent]) -> Self {
        Self::from_bowel(SATISFACTION, events, |e| e.satisfaction as f64)
    }

    /// Movements per week
    pub fn bowel_frequency(events: &[BowelEvent]) -> Self {
        let mut series = Self::from_bowel(BOWEL_FREQUENCY, events, |_| 1.0);
        series.reduction = Reduction::Count;
        series
    }

    pub fn symptom_severity(symptoms: &[SymptomEvent]) -> Self {
        let samples = symptoms
            .iter()
            .map(|s| TimedValue::new(s.recorded_at, s.severity as f64))
            .collect();
        Self::new(SYMPTOM_SEVERITY, samples, Reduction::Mean)
    }

    /// Symptoms per week
    pub fn symptom_frequency(symptoms: &[SymptomEvent]) -> Self {
        let samples = symptoms
            .iter()
            .map(|s| TimedValue::new(s.recorded_at, 1.0))
            .collect();
        Self::new(SYMPTOM_FREQUENCY, samples, Reduction::Count)
    }

    /// Average calories per meal
    pub fn calories(meals: &[MealEvent]) -> Self {
        let samples = meals
            .iter()
            .map(|m| TimedValue::new(m.meal_time, m.calories))
            .collect();
        Self::new(AVERAGE_CALORIES, samples, Reduction::Mean)
    }

    /// Meals per week
    pub fn meal_frequency(meals: &[MealEvent]) -> Self {
        let samples = meals
            .iter()
            .map(|m| TimedValue::new(m.meal_time, 1.0))
            .collect();
        Self::new(MEAL_FREQUENCY, samples, Reduction::Count)
    }
}

/// Fits trend lines over weekly aggregates
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Fit one metric
    ///
    /// Returns `None` with fewer than `min_samples` in-range samples or fewer
    /// than `min_points` weekly points.
    pub fn compute_trend(
        &self,
        series: &MetricSeries,
        change_threshold: f64,
        range: &TimeRange,
    ) -> Option<TrendLine> {
        let in_range = series
            .samples
            .iter()
            .filter(|s| range.contains(s.at))
            .count();
        if in_range < self.config.min_samples {
            tracing::debug!(
                metric = %series.name,
                samples = in_range,
                "Too few samples for a trend"
            );
            return None;
        }

        let points = aggregate_values(&series.samples, Interval::Week, range, series.reduction);
        if points.len() < self.config.min_points {
            tracing::debug!(
                metric = %series.name,
                weeks = points.len(),
                "Too few weekly points for a trend"
            );
            return None;
        }

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        let slope = trend_slope(&values);
        let confidence = confidence_from_sample_size(points.len());

        Some(TrendLine {
            name: series.name.clone(),
            direction: interpret_direction(slope, change_threshold),
            slope: round_to(slope, 4),
            confidence,
            significance: self.significance(slope, confidence),
            points,
        })
    }

    /// Negative or non-finite slopes count as worst case
    pub fn significance(&self, slope: f64, confidence: f64) -> Significance {
        if !slope.is_finite() || slope < 0.0 {
            Significance::Low
        } else if confidence >= self.config.high_significance_confidence {
            Significance::High
        } else {
            Significance::Moderate
        }
    }

    /// Bristol type, pain, strain, satisfaction and weekly frequency
    pub fn bowel_trends(&self, events: &[BowelEvent], range: &TimeRange) -> Vec<TrendLine> {
        let c = &self.config;
        [
            (MetricSeries::bristol(events), c.bristol_threshold),
            (MetricSeries::pain(events), c.pain_threshold),
            (MetricSeries::strain(events), c.strain_threshold),
            (MetricSeries::satisfaction(events), c.satisfaction_threshold),
            (MetricSeries::bowel_frequency(events), c.bowel_frequency_threshold),
        ]
        .iter()
        .filter_map(|(series, threshold)| self.compute_trend(series, *threshold, range))
        .collect()
    }

    /// Symptom severity and weekly frequency
    pub fn symptom_trends(&self, symptoms: &[SymptomEvent], range: &TimeRange) -> Vec<TrendLine> {
        let c = &self.config;
        [
            (MetricSeries::symptom_severity(symptoms), c.symptom_severity_threshold),
            (MetricSeries::symptom_frequency(symptoms), c.symptom_frequency_threshold),
        ]
        .iter()
        .filter_map(|(series, threshold)| self.compute_trend(series, *threshold, range))
        .collect()
    }

    /// Average calories and weekly meal count
    pub fn meal_trends(&self, meals: &[MealEvent], range: &TimeRange) -> Vec<TrendLine> {
        let c = &self.config;
        [
            (MetricSeries::calories(meals), c.calorie_threshold),
            (MetricSeries::meal_frequency(meals), c.meal_frequency_threshold),
        ]
        .iter()
        .filter_map(|(series, threshold)| self.compute_trend(series, *threshold, range))
        .collect()
    }

    /// Combine trend slopes into one verdict, applying metric polarity
    ///
    /// Pain, strain and every symptom trend are inverted so that a falling
    /// value counts as improvement.
    pub fn overall_trend(
        &self,
        bowel: &[TrendLine],
        symptoms: &[TrendLine],
        meals: &[TrendLine],
    ) -> TrendDirection {
        let mut scores: Vec<f64> = Vec::new();

        for trend in bowel {
            match trend.name.as_str() {
                PAIN | STRAIN => scores.push(-trend.slope),
                _ => scores.push(trend.slope),
            }
        }
        scores.extend(symptoms.iter().map(|t| -t.slope));
        scores.extend(meals.iter().map(|t| t.slope));

        if scores.is_empty() {
            return TrendDirection::Stable;
        }

        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        if average > self.config.overall_threshold {
            TrendDirection::Improving
        } else if average < -self.config.overall_threshold {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    }
}
