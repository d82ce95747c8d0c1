//! Before/after comparison around medication start dates

use super::types::MedicationEffect;
use crate::entries::{BowelEvent, MedicationRecord, SymptomEvent};
use crate::stats::{mean, round_to};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

const OVERALL: &str = "overall";

/// Percent drop from `before` to `after`, 0 when there is no baseline
fn percent_drop(before: &[f64], after: &[f64]) -> f64 {
    let baseline = mean(before);
    if before.is_empty() || baseline <= 0.0 {
        return 0.0;
    }
    round_to((baseline - mean(after)) / baseline * 100.0, 1)
}

fn symptom_improvement(
    symptoms: &[SymptomEvent],
    start: DateTime<Utc>,
) -> BTreeMap<String, f64> {
    let mut before = Vec::new();
    let mut after = Vec::new();
    let mut by_name: BTreeMap<&str, (Vec<f64>, Vec<f64>)> = BTreeMap::new();

    for symptom in symptoms {
        let severity = f64::from(symptom.severity);
        let split = by_name.entry(symptom.name.as_str()).or_default();
        if symptom.recorded_at < start {
            before.push(severity);
            split.0.push(severity);
        } else {
            after.push(severity);
            split.1.push(severity);
        }
    }

    let mut improvement: BTreeMap<String, f64> = by_name
        .into_iter()
        .filter(|(_, (b, a))| !b.is_empty() && !a.is_empty())
        .map(|(name, (b, a))| (name.to_string(), percent_drop(&b, &a)))
        .collect();
    improvement.insert(OVERALL.to_string(), percent_drop(&before, &after));
    improvement
}

fn bowel_improvement(events: &[BowelEvent], start: DateTime<Utc>) -> f64 {
    let (before, after): (Vec<&BowelEvent>, Vec<&BowelEvent>) =
        events.iter().partition(|e| e.recorded_at < start);

    let comfort = |group: &[&BowelEvent]| -> f64 {
        let scores: Vec<f64> = group.iter().map(|e| e.comfort_score()).collect();
        mean(&scores)
    };

    round_to(comfort(&after) - comfort(&before), 1)
}

/// Effect of each distinct medication, ordered by name
///
/// Medications without any start date are skipped. Entries recorded before
/// the earliest start date count as baseline, everything else as treatment.
///
/// One-sided data is taken at face value. Symptoms logged only before the
/// start give an overall improvement of 100%, and bowel comfort logged on one
/// side only is compared against a mean of 0. Per-symptom entries need
/// records on both sides.
pub fn medication_effectiveness(
    medications: &[MedicationRecord],
    symptoms: &[SymptomEvent],
    events: &[BowelEvent],
) -> Vec<MedicationEffect> {
    let mut starts: BTreeMap<&str, Option<DateTime<Utc>>> = BTreeMap::new();
    for medication in medications {
        let earliest = starts.entry(medication.name.as_str()).or_default();
        if let Some(start) = medication.start_date {
            *earliest = Some(earliest.map_or(start, |current| current.min(start)));
        }
    }

    starts
        .into_iter()
        .filter_map(|(name, start)| {
            let Some(start) = start else {
                tracing::debug!(medication = name, "no start date, skipping");
                return None;
            };

            let symptom_improvement = symptom_improvement(symptoms, start);
            let bowel_improvement = bowel_improvement(events, start);
            let overall = symptom_improvement.get(OVERALL).copied().unwrap_or(0.0);
            let score = (50.0 + overall * 0.3 + bowel_improvement * 0.2).clamp(0.0, 100.0);

            Some(MedicationEffect {
                medication_name: name.to_string(),
                symptom_improvement,
                bowel_improvement,
                effectiveness_score: round_to(score, 1),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_severity_halves_after_start() {
        let medications = vec![MedicationRecord::new("Mesalamine").started(at(10))];
        let symptoms: Vec<SymptomEvent> = (1..=20)
            .map(|day| {
                let severity = if day < 10 { 8 } else { 4 };
                SymptomEvent::new("Cramping", severity, at(day))
            })
            .collect();

        let effects = medication_effectiveness(&medications, &symptoms, &[]);
        assert_eq!(effects.len(), 1);

        let effect = &effects[0];
        assert_eq!(effect.medication_name, "Mesalamine");
        assert_eq!(effect.symptom_improvement["overall"], 50.0);
        assert_eq!(effect.symptom_improvement["Cramping"], 50.0);
        assert_eq!(effect.bowel_improvement, 0.0);
        assert_eq!(effect.effectiveness_score, 65.0);
        assert!(effect.effectiveness_score > 50.0);
    }

    #[test]
    fn test_earliest_start_wins() {
        let medications = vec![
            MedicationRecord::new("Loperamide").started(at(15)),
            MedicationRecord::new("Loperamide").started(at(5)),
        ];
        let events = vec![
            BowelEvent::new(6, at(3)).pain(5).strain(4).satisfaction(3),
            BowelEvent::new(4, at(8)).pain(1).strain(1).satisfaction(8),
        ];

        let effects = medication_effectiveness(&medications, &[], &events);
        assert_eq!(effects.len(), 1);
        // before: 3 - 5 - 4 = -6, after: 8 - 1 - 1 = 6
        assert_eq!(effects[0].bowel_improvement, 12.0);
        assert_eq!(effects[0].symptom_improvement["overall"], 0.0);
        assert_eq!(effects[0].effectiveness_score, 52.4);
    }

    #[test]
    fn test_no_start_date_skipped() {
        let medications = vec![
            MedicationRecord::new("Probiotic"),
            MedicationRecord::new("Fiber Supplement").started(at(2)),
        ];
        let effects = medication_effectiveness(&medications, &[], &[]);

        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].medication_name, "Fiber Supplement");
        assert_eq!(effects[0].effectiveness_score, 50.0);
    }

    #[test]
    fn test_name_entry_needs_both_sides() {
        let medications = vec![MedicationRecord::new("Simethicone").started(at(10))];
        let symptoms = vec![
            SymptomEvent::new("Gas", 6, at(2)),
            SymptomEvent::new("Gas", 3, at(12)),
            SymptomEvent::new("Nausea", 5, at(12)),
        ];

        let effects = medication_effectiveness(&medications, &symptoms, &[]);
        let improvement = &effects[0].symptom_improvement;
        assert_eq!(improvement["Gas"], 50.0);
        assert!(!improvement.contains_key("Nausea"));
        // before mean 6, after mean 4
        assert_eq!(improvement["overall"], 33.3);
    }

    #[test]
    fn test_one_sided_data() {
        let medications = vec![MedicationRecord::new("Simethicone").started(at(10))];
        let symptoms = vec![SymptomEvent::new("Gas", 6, at(2))];
        let events = vec![BowelEvent::new(4, at(12)).pain(1).strain(1).satisfaction(8)];

        let effect = &medication_effectiveness(&medications, &symptoms, &events)[0];
        assert_eq!(effect.symptom_improvement["overall"], 100.0);
        assert!(!effect.symptom_improvement.contains_key("Gas"));
        // after: 8 - 1 - 1 = 6 against an empty baseline
        assert_eq!(effect.bowel_improvement, 6.0);
        assert_eq!(effect.effectiveness_score, 81.2);
    }
}
