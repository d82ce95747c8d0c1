//! Grouping intervals and bucket keys

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Calendar grouping used by the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// Group by UTC calendar day
    Day,
    /// Group by ISO week (starts on Monday)
    Week,
}

impl Interval {
    /// Bucket key for a timestamp
    pub fn bucket(&self, at: DateTime<Utc>) -> Bucket {
        let date = at.date_naive();
        match self {
            Interval::Day => Bucket::Day(date),
            Interval::Week => {
                let iso = date.iso_week();
                Bucket::Week {
                    iso_year: iso.year(),
                    week: iso.week(),
                }
            }
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interval::Day => write!(f, "day"),
            Interval::Week => write!(f, "week"),
        }
    }
}

/// A group key; ordering is chronological within one interval kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Day(NaiveDate),
    Week { iso_year: i32, week: u32 },
}

impl Bucket {
    /// First calendar day of the bucket (the Monday for ISO weeks)
    pub fn start_date(&self) -> NaiveDate {
        match *self {
            Bucket::Day(date) => date,
            Bucket::Week { iso_year, week } => {
                NaiveDate::from_isoywd_opt(iso_year, week, Weekday::Mon).unwrap_or(NaiveDate::MIN)
            }
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::Day(date) => write!(f, "{}", date),
            Bucket::Week { iso_year, week } => write!(f, "{}-W{:02}", iso_year, week),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_bucket() {
        let at = Utc.with_ymd_and_hms(2024, 5, 17, 23, 59, 59).unwrap();
        let bucket = Interval::Day.bucket(at);
        assert_eq!(bucket, Bucket::Day(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()));
        assert_eq!(bucket.to_string(), "2024-05-17");
    }

    #[test]
    fn test_week_bucket_crosses_year() {
        // 2024-12-30 is a Monday in ISO week 1 of 2025
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap();
        let bucket = Interval::Week.bucket(at);
        assert_eq!(bucket, Bucket::Week { iso_year: 2025, week: 1 });
        assert_eq!(bucket.start_date(), NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
        assert_eq!(bucket.to_string(), "2025-W01");
    }

    #[test]
    fn test_week_ordering() {
        let late = Bucket::Week { iso_year: 2024, week: 52 };
        let early = Bucket::Week { iso_year: 2025, week: 1 };
        assert!(late < early);
    }
}
