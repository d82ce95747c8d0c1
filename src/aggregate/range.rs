//! Time ranges

use crate::entries::Timestamped;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive `[start, end]` window of time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range; reversed bounds are swapped
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Create a range, returning None if start is after end
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// A range containing every representable instant
    pub fn unbounded() -> Self {
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: DateTime::<Utc>::MAX_UTC,
        }
    }

    /// The last `days` days up to now
    ///
    /// `None` when `days` is not positive or reaches past the earliest
    /// representable instant.
    pub fn last_days(days: i64) -> Option<Self> {
        if days <= 0 {
            return None;
        }
        let end = Utc::now();
        let start = end.checked_sub_signed(Duration::try_days(days)?)?;
        Some(Self { start, end })
    }

    /// Whole calendar days from `first` through `last`, `None` if `first` is after `last`
    pub fn try_days_between(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        let start = first.and_hms_opt(0, 0, 0)?.and_utc();
        let end = last.succ_opt()?.and_hms_opt(0, 0, 0)?.and_utc() - Duration::nanoseconds(1);
        Self::try_new(start, end)
    }

    /// Whole calendar days from `first` through `last`
    pub fn days_between(first: NaiveDate, last: NaiveDate) -> Self {
        let start = first.and_hms_opt(0, 0, 0).map(|d| d.and_utc());
        let end = last
            .succ_opt()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc() - Duration::nanoseconds(1));
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Self::unbounded(),
        }
    }

    /// Check whether a timestamp is inside the range (both ends inclusive)
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }

    /// Copy out the items that fall inside the range
    pub fn filter<T: Timestamped + Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .filter(|item| self.contains(item.timestamp()))
            .cloned()
            .collect()
    }

    /// Calendar days touched by the range, ascending
    ///
    /// Empty for unbounded ranges so callers never materialize millennia.
    pub fn days(&self) -> Vec<NaiveDate> {
        if self.is_unbounded() {
            return Vec::new();
        }
        let first = self.start.date_naive();
        let last = self.end.date_naive();
        first.iter_days().take_while(|d| *d <= last).collect()
    }

    /// Number of calendar days touched, at least 1
    pub fn day_count(&self) -> i64 {
        if self.is_unbounded() {
            return 1;
        }
        (self.end.date_naive() - self.start.date_naive()).num_days() + 1
    }

    /// True when either end sits at the representable limit
    pub fn is_unbounded(&self) -> bool {
        self.start == DateTime::<Utc>::MIN_UTC || self.end == DateTime::<Utc>::MAX_UTC
    }
}
