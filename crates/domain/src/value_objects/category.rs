//! Case-insensitive category names: `FoodType` and `EnclosureType`
//!
//! Both are identity-less labels compared by content. The spelling given at
//! construction is kept for display, while equality and hashing ignore case so
//! that `"Meat"` and `"meat"` are the same food.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! define_category {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new validated name (trimmed, non-empty).
            ///
            /// # Errors
            ///
            /// Returns `DomainError::Validation` if the name is empty after trimming.
            pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
                let name = name.into();
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!(
                        $label,
                        " name cannot be empty"
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the name as originally spelled.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Case-insensitive comparison against a raw name.
            pub fn is(&self, name: &str) -> bool {
                self.0.to_lowercase() == name.trim().to_lowercase()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0.to_lowercase() == other.0.to_lowercase()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.to_lowercase().hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }
    };
}

define_category!(
    /// A kind of food, e.g. "Meat" or "Hay"
    FoodType,
    "Food"
);

define_category!(
    /// The category of an enclosure, e.g. "Predator" or "Aviary"
    ///
    /// Only `Predator` and `Herbivore` carry species rules; any other name is
    /// accepted and imposes no restriction.
    EnclosureType,
    "Enclosure type"
);

impl EnclosureType {
    pub const PREDATOR: &'static str = "Predator";
    pub const HERBIVORE: &'static str = "Herbivore";
    pub const AVIARY: &'static str = "Aviary";
    pub const AQUARIUM: &'static str = "Aquarium";

    pub fn predator() -> Self {
        Self(Self::PREDATOR.to_string())
    }

    pub fn herbivore() -> Self {
        Self(Self::HERBIVORE.to_string())
    }

    pub fn aviary() -> Self {
        Self(Self::AVIARY.to_string())
    }

    pub fn aquarium() -> Self {
        Self(Self::AQUARIUM.to_string())
    }

    pub fn is_predator(&self) -> bool {
        self.is(Self::PREDATOR)
    }

    pub fn is_herbivore(&self) -> bool {
        self.is(Self::HERBIVORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn food_type_equality_ignores_case() {
        let a = FoodType::new("Meat").unwrap();
        let b = FoodType::new("mEAT").unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(b.as_str(), "mEAT");
    }

    #[test]
    fn enclosure_type_equality_ignores_case() {
        let a = EnclosureType::new("herbivore").unwrap();
        assert_eq!(a, EnclosureType::herbivore());
        assert_eq!(hash_of(&a), hash_of(&EnclosureType::herbivore()));
        assert!(a.is_herbivore());
        assert!(!a.is_predator());
    }

    #[test]
    fn different_names_are_not_equal() {
        assert_ne!(EnclosureType::aviary(), EnclosureType::aquarium());
        assert_ne!(FoodType::new("Fish").unwrap(), FoodType::new("Hay").unwrap());
    }

    #[test]
    fn set_deduplicates_case_variants() {
        let set: HashSet<FoodType> = ["Fish", "FISH", "fish", "Seeds"]
            .into_iter()
            .map(|n| FoodType::new(n).unwrap())
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_or_blank_names_are_rejected() {
        assert!(matches!(FoodType::new(""), Err(DomainError::Validation(_))));
        assert!(matches!(
            EnclosureType::new("   "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn names_are_trimmed() {
        let food = FoodType::new("  Bamboo ").unwrap();
        assert_eq!(food.as_str(), "Bamboo");
    }

    #[test]
    fn serde_round_trip_validates() {
        let json = serde_json::to_string(&EnclosureType::predator()).unwrap();
        assert_eq!(json, "\"Predator\"");
        let parsed: EnclosureType = serde_json::from_str("\"predator\"").unwrap();
        assert!(parsed.is_predator());
        assert!(serde_json::from_str::<FoodType>("\"\"").is_err());
    }
}
