//! Enumerated entry attributes
//!
//! Wire names are SCREAMING_SNAKE_CASE, matching what the tracking backend
//! stores and exports.

use super::error::EntryError;
use serde::{Deserialize, Serialize};

/// Declare an attribute enum with its wire names, `Display` and `FromStr`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Wire name of this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = EntryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(EntryError::UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Stool volume
    Volume {
        Small => "SMALL",
        Medium => "MEDIUM",
        Large => "LARGE",
        Massive => "MASSIVE",
    }
}

wire_enum! {
    /// Stool color
    Color {
        Brown => "BROWN",
        DarkBrown => "DARK_BROWN",
        LightBrown => "LIGHT_BROWN",
        Yellow => "YELLOW",
        Green => "GREEN",
        Red => "RED",
        Black => "BLACK",
    }
}

wire_enum! {
    /// Stool consistency as reported by the user
    Consistency {
        Solid => "SOLID",
        Soft => "SOFT",
        Loose => "LOOSE",
        Watery => "WATERY",
    }
}

wire_enum! {
    SmellLevel {
        None => "NONE",
        Mild => "MILD",
        Moderate => "MODERATE",
        Strong => "STRONG",
        Overwhelming => "OVERWHELMING",
    }
}

wire_enum! {
    MealCategory {
        Breakfast => "BREAKFAST",
        Lunch => "LUNCH",
        Dinner => "DINNER",
        Snack => "SNACK",
        Other => "OTHER",
    }
}

wire_enum! {
    SymptomCategory {
        Digestive => "DIGESTIVE",
        Abdominal => "ABDOMINAL",
        Systemic => "SYSTEMIC",
        Neurological => "NEUROLOGICAL",
        Other => "OTHER",
    }
}

wire_enum! {
    SymptomType {
        Bloating => "BLOATING",
        Cramps => "CRAMPS",
        Nausea => "NAUSEA",
        Heartburn => "HEARTBURN",
        Constipation => "CONSTIPATION",
        Diarrhea => "DIARRHEA",
        Gas => "GAS",
        Fatigue => "FATIGUE",
        Other => "OTHER",
    }
}

wire_enum! {
    MedicationCategory {
        Gastrointestinal => "GASTROINTESTINAL",
        PainRelief => "PAIN_RELIEF",
        Antibiotic => "ANTIBIOTIC",
        Probiotics => "PROBIOTICS",
        Supplements => "SUPPLEMENTS",
        AntiInflammatory => "ANTI_INFLAMMATORY",
        Other => "OTHER",
    }
}

wire_enum! {
    MedicationForm {
        Tablet => "TABLET",
        Capsule => "CAPSULE",
        Liquid => "LIQUID",
        Cream => "CREAM",
        Powder => "POWDER",
        Injection => "INJECTION",
        Suppository => "SUPPOSITORY",
        Other => "OTHER",
    }
}

wire_enum! {
    MedicationRoute {
        Oral => "ORAL",
        Topical => "TOPICAL",
        Rectal => "RECTAL",
        Injection => "INJECTION",
        Inhalation => "INHALATION",
        Other => "OTHER",
    }
}
