//! Validated name newtypes for animals
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for name fields (Species, AnimalName)
const MAX_NAME_LENGTH: usize = 200;

/// Species that are kept in predator enclosures (compared case-insensitively)
const PREDATOR_SPECIES: [&str; 6] = ["lion", "tiger", "bear", "wolf", "crocodile", "fox"];

fn validated(value: String, label: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", label)));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            label, MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// Species
// ============================================================================

/// A validated species name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Species(String);

impl Species {
    /// Create a new validated species.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The species is empty after trimming
    /// - The species exceeds 200 characters after trimming
    pub fn new(species: impl Into<String>) -> Result<Self, DomainError> {
        validated(species.into(), "Species").map(Self)
    }

    /// Returns the species as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this species is on the predator list.
    ///
    /// The list is closed: Lion, Tiger, Bear, Wolf, Crocodile and Fox.
    pub fn is_predator(&self) -> bool {
        let lowered = self.0.to_lowercase();
        PREDATOR_SPECIES.contains(&lowered.as_str())
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Species {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Species> for String {
    fn from(species: Species) -> String {
        species.0
    }
}

// ============================================================================
// AnimalName
// ============================================================================

/// A validated animal name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnimalName(String);

impl AnimalName {
    /// Create a new validated animal name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty or too long.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validated(name.into(), "Name").map(Self)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnimalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AnimalName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AnimalName> for String {
    fn from(name: AnimalName) -> String {
        name.0
    }
}
