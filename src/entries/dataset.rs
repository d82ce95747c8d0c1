//! A user's entries bundled for one analysis run

use super::error::{EntryError, EntryResult};
use super::types::*;
use crate::aggregate::TimeRange;
use serde::{Deserialize, Serialize};

/// The four entry collections for a single user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    #[serde(default)]
    pub bowel_movements: Vec<BowelEvent>,
    #[serde(default)]
    pub meals: Vec<MealEvent>,
    #[serde(default)]
    pub symptoms: Vec<SymptomEvent>,
    #[serde(default)]
    pub medications: Vec<MedicationRecord>,
}

impl HealthData {
    /// Parse an exported JSON document
    pub fn from_json(json: &str) -> EntryResult<Self> {
        serde_json::from_str(json).map_err(|e| EntryError::Malformed(e.to_string()))
    }

    /// Keep only events inside `range`
    ///
    /// Medication records are not point events and are kept as-is.
    pub fn within(&self, range: &TimeRange) -> HealthData {
        HealthData {
            bowel_movements: range.filter(&self.bowel_movements),
            meals: range.filter(&self.meals),
            symptoms: range.filter(&self.symptoms),
            medications: self.medications.clone(),
        }
    }

    /// True when no entries of any kind are present
    pub fn is_empty(&self) -> bool {
        self.bowel_movements.is_empty()
            && self.meals.is_empty()
            && self.symptoms.is_empty()
            && self.medications.is_empty()
    }

    /// Smallest range covering every event, if there is one
    pub fn span(&self) -> Option<TimeRange> {
        let times = self
            .bowel_movements
            .iter()
            .map(|e| e.recorded_at)
            .chain(self.meals.iter().map(|m| m.meal_time))
            .chain(self.symptoms.iter().map(|s| s.recorded_at));

        let mut bounds: Option<(chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>)> =
            None;
        for t in times {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(t), hi.max(t)),
                None => (t, t),
            });
        }
        bounds.map(|(start, end)| TimeRange::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_from_json_defaults_missing_collections() {
        let data = HealthData::from_json(
            r#"{"meals": [{"name": "Toast", "mealTime": "2024-01-02T08:00:00Z", "gluten": true}]}"#,
        )
        .unwrap();
        assert_eq!(data.meals.len(), 1);
        assert!(data.meals[0].gluten);
        assert!(data.bowel_movements.is_empty());
        assert!(data.medications.is_empty());
    }

    #[test]
    fn test_from_json_malformed() {
        let err = HealthData::from_json("{not json").unwrap_err();
        assert!(matches!(err, EntryError::Malformed(_)));
    }

    #[test]
    fn test_within_and_span() {
        let day = |d| Utc.with_ymd_and_hms(2024, 1, d, 9, 0, 0).unwrap();
        let data = HealthData {
            bowel_movements: vec![BowelEvent::new(4, day(1)), BowelEvent::new(4, day(9))],
            meals: vec![MealEvent::new("Oats", day(3))],
            symptoms: vec![SymptomEvent::new("Gas", 3, day(5))],
            medications: vec![MedicationRecord::new("Fiber supplement")],
        };

        let span = data.span().unwrap();
        assert_eq!(span.start, day(1));
        assert_eq!(span.end, day(9));

        let narrowed = data.within(&TimeRange::new(day(2), day(6)));
        assert_eq!(narrowed.bowel_movements.len(), 0);
        assert_eq!(narrowed.meals.len(), 1);
        assert_eq!(narrowed.symptoms.len(), 1);
        assert_eq!(narrowed.medications.len(), 1);
    }

    #[test]
    fn test_empty_span() {
        assert!(HealthData::default().span().is_none());
        assert!(HealthData::default().is_empty());
    }
}
