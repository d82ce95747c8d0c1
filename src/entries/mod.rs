//! Health log entries
//!
//! Input types for the analytics: bowel movements, meals, symptoms and
//! medications, plus the attribute enums they carry.

mod dataset;
mod enums;
mod error;
mod types;

pub use dataset::HealthData;
pub use enums::{
    Color, Consistency, MealCategory, MedicationCategory, MedicationForm, MedicationRoute,
    SmellLevel, SymptomCategory, SymptomType, Volume,
};
pub use error::{EntryError, EntryResult};
pub use types::{BowelEvent, MealEvent, MedicationRecord, SymptomEvent, Timestamped};
