//! Generic bucketing of timed values

use super::interval::{Bucket, Interval};
use super::range::TimeRange;
use crate::entries::Timestamped;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single measurement extracted from an entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedValue {
    pub at: DateTime<Utc>,
    pub value: f64,
}

impl TimedValue {
    pub fn new(at: DateTime<Utc>, value: f64) -> Self {
        Self { at, value }
    }
}

impl Timestamped for TimedValue {
    fn timestamp(&self) -> DateTime<Utc> {
        self.at
    }
}

/// One aggregated point of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// How values in one bucket collapse to a single number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    /// Average value (Bristol type, pain, calories)
    Mean,
    /// Number of entries (frequency)
    Count,
    /// Total (daily calories)
    Sum,
    /// Peak value (spicy level)
    Max,
}

impl Reduction {
    /// Reduce a bucket's values according to this type
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }

        Some(match self {
            Reduction::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Reduction::Count => values.len() as f64,
            Reduction::Sum => values.iter().sum(),
            Reduction::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

/// Group in-range items by bucket, in chronological bucket order
pub fn group_by<'a, T: Timestamped>(
    items: &'a [T],
    interval: Interval,
    range: &TimeRange,
) -> BTreeMap<Bucket, Vec<&'a T>> {
    let mut groups: BTreeMap<Bucket, Vec<&T>> = BTreeMap::new();

    for item in items {
        let at = item.timestamp();
        if !range.contains(at) {
            continue;
        }
        groups.entry(interval.bucket(at)).or_default().push(item);
    }

    groups
}

/// Reduce timed values per bucket into ascending trend points
pub fn aggregate_values(
    samples: &[TimedValue],
    interval: Interval,
    range: &TimeRange,
    reduction: Reduction,
) -> Vec<TrendPoint> {
    group_by(samples, interval, range)
        .into_iter()
        .filter_map(|(bucket, group)| {
            let values: Vec<f64> = group.iter().map(|s| s.value).collect();
            reduction.apply(&values).map(|value| TrendPoint {
                date: bucket.start_date(),
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reduction() {
        let values = [2.0, 4.0, 9.0];
        assert_eq!(Reduction::Mean.apply(&values), Some(5.0));
        assert_eq!(Reduction::Count.apply(&values), Some(3.0));
        assert_eq!(Reduction::Sum.apply(&values), Some(15.0));
        assert_eq!(Reduction::Max.apply(&values), Some(9.0));
        assert_eq!(Reduction::Mean.apply(&[]), None);
    }

    #[test]
    fn test_weekly_points_are_ascending() {
        // entries deliberately out of order
        let samples = vec![
            TimedValue::new(Utc.with_ymd_and_hms(2024, 1, 17, 9, 0, 0).unwrap(), 6.0),
            TimedValue::new(Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(), 2.0),
            TimedValue::new(Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap(), 4.0),
            TimedValue::new(Utc.with_ymd_and_hms(2024, 1, 9, 9, 0, 0).unwrap(), 5.0),
        ];

        let points = aggregate_values(
            &samples,
            Interval::Week,
            &TimeRange::unbounded(),
            Reduction::Mean,
        );

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(points[0].value, 3.0);
        assert_eq!(points[1].value, 5.0);
        assert_eq!(points[2].value, 6.0);
    }

    #[test]
    fn test_out_of_range_excluded() {
        let inside = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let outside = Utc.with_ymd_and_hms(2024, 2, 5, 0, 0, 0).unwrap();
        let samples = vec![TimedValue::new(inside, 1.0), TimedValue::new(outside, 1.0)];
        let range = TimeRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
        );

        let points = aggregate_values(&samples, Interval::Day, &range, Reduction::Count);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 1.0);
    }

    #[test]
    fn test_empty_input() {
        let points = aggregate_values(&[], Interval::Day, &TimeRange::unbounded(), Reduction::Mean);
        assert!(points.is_empty());
    }
}
