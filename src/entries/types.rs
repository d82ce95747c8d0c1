//! Raw log entries
//!
//! The four entity kinds the analytics read. Bounded scales (Bristol type,
//! pain, strain, satisfaction, severity, spicy level) are validated where the
//! entries are recorded and trusted as-is here.

use super::enums::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Anything with a point in time the aggregator can bucket
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

/// A logged bowel movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowelEvent {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    /// Bristol stool scale, 1-7
    pub bristol_type: u8,
    /// 1-10
    pub pain: u8,
    /// 1-10
    pub strain: u8,
    /// 1-10
    pub satisfaction: u8,
    #[serde(default)]
    pub volume: Option<Volume>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub consistency: Option<Consistency>,
    #[serde(default)]
    pub smell_level: Option<SmellLevel>,
    pub recorded_at: DateTime<Utc>,
}

impl BowelEvent {
    /// Create an event with neutral pain/strain (1) and satisfaction (5)
    pub fn new(bristol_type: u8, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            user_id: String::new(),
            bristol_type,
            pain: 1,
            strain: 1,
            satisfaction: 5,
            volume: None,
            color: None,
            consistency: None,
            smell_level: None,
            recorded_at,
        }
    }

    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn pain(mut self, pain: u8) -> Self {
        self.pain = pain;
        self
    }

    pub fn strain(mut self, strain: u8) -> Self {
        self.strain = strain;
        self
    }

    pub fn satisfaction(mut self, satisfaction: u8) -> Self {
        self.satisfaction = satisfaction;
        self
    }

    pub fn volume(mut self, volume: Volume) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Composite comfort score used for before/after comparisons
    pub fn comfort_score(&self) -> f64 {
        self.satisfaction as f64 - self.pain as f64 - self.strain as f64
    }
}

impl Timestamped for BowelEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// A logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEvent {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    pub meal_time: DateTime<Utc>,
    #[serde(default)]
    pub calories: f64,
    /// 1-10, `None` when not recorded
    #[serde(default)]
    pub spicy_level: Option<u8>,
    #[serde(default)]
    pub fiber_rich: bool,
    #[serde(default)]
    pub dairy: bool,
    #[serde(default)]
    pub gluten: bool,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub category: Option<MealCategory>,
}

impl MealEvent {
    pub fn new(name: impl Into<String>, meal_time: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            user_id: String::new(),
            name: name.into(),
            meal_time,
            calories: 0.0,
            spicy_level: None,
            fiber_rich: false,
            dairy: false,
            gluten: false,
            cuisine: None,
            category: None,
        }
    }

    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn calories(mut self, calories: f64) -> Self {
        self.calories = calories;
        self
    }

    pub fn spicy(mut self, level: u8) -> Self {
        self.spicy_level = Some(level);
        self
    }

    pub fn fiber_rich(mut self) -> Self {
        self.fiber_rich = true;
        self
    }

    pub fn dairy(mut self) -> Self {
        self.dairy = true;
        self
    }

    pub fn gluten(mut self) -> Self {
        self.gluten = true;
        self
    }

    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn category(mut self, category: MealCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Spicy level with unrecorded treated as zero
    pub fn spice(&self) -> u8 {
        self.spicy_level.unwrap_or(0)
    }
}

impl Timestamped for MealEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.meal_time
    }
}

/// A logged symptom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEvent {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    /// 1-10
    pub severity: u8,
    #[serde(default, rename = "type")]
    pub symptom_type: Option<SymptomType>,
    #[serde(default)]
    pub category: Option<SymptomCategory>,
    /// Free-text suspected triggers noted by the user
    #[serde(default)]
    pub triggers: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}

impl SymptomEvent {
    pub fn new(name: impl Into<String>, severity: u8, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            user_id: String::new(),
            name: name.into(),
            severity,
            symptom_type: None,
            category: None,
            triggers: Vec::new(),
            recorded_at,
        }
    }

    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn symptom_type(mut self, symptom_type: SymptomType) -> Self {
        self.symptom_type = Some(symptom_type);
        self
    }

    pub fn category(mut self, category: SymptomCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn trigger(mut self, trigger: impl Into<String>) -> Self {
        self.triggers.push(trigger.into());
        self
    }
}

impl Timestamped for SymptomEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// A medication the user takes or has taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRecord {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub category: Option<MedicationCategory>,
    #[serde(default)]
    pub form: Option<MedicationForm>,
    #[serde(default)]
    pub route: Option<MedicationRoute>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub side_effects: Vec<String>,
}

fn default_active() -> bool {
    true
}

impl MedicationRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            user_id: String::new(),
            name: name.into(),
            dosage: String::new(),
            frequency: String::new(),
            category: None,
            form: None,
            route: None,
            start_date: None,
            end_date: None,
            is_active: true,
            side_effects: Vec::new(),
        }
    }

    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn dosage(mut self, dosage: impl Into<String>, frequency: impl Into<String>) -> Self {
        self.dosage = dosage.into();
        self.frequency = frequency.into();
        self
    }

    pub fn category(mut self, category: MedicationCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn started(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn ended(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub fn side_effect(mut self, effect: impl Into<String>) -> Self {
        self.side_effects.push(effect.into());
        self
    }

    /// Whether the course is still running at `now`
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        match self.end_date {
            Some(end) => end > now,
            None => true,
        }
    }
}
