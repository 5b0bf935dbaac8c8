//! Animal aggregate - an individual animal living in the zoo
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: All fields are encapsulated
//! - **Newtypes**: `Species` and `AnimalName` for validated strings
//! - **Weak reference**: the current enclosure is held as an `EnclosureId`,
//!   never as an `Enclosure` value, so neither aggregate owns the other
//! - **Crate-private moves**: only `Enclosure` may change the enclosure
//!   reference, which keeps the reference and the enclosure's member list in step.
//!   The one public exit is `detach_from_stale_enclosure`, for a reference
//!   that no enclosure lists any more

use chrono::{DateTime, NaiveDate, Utc};

use crate::aggregates::Enclosure;
use crate::error::DomainError;
use crate::events::{AnimalMoved, DomainEvents};
use crate::value_objects::{AnimalName, FoodType, Gender, Species};
use crate::{AnimalId, EnclosureId};

/// An animal in the zoo
///
/// # Invariants
///
/// - `species` and `name` are non-empty (enforced by their newtypes)
/// - `date_of_birth` is not after the date the animal was registered
/// - `enclosure_id` names the one enclosure whose member list contains this
///   animal, or is `None`
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use zoo_domain::aggregates::Animal;
/// use zoo_domain::value_objects::{AnimalName, FoodType, Gender, Species};
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let simba = Animal::new(
///     Species::new("Lion").unwrap(),
///     AnimalName::new("Simba").unwrap(),
///     NaiveDate::from_ymd_opt(2019, 3, 14).unwrap(),
///     Gender::Male,
///     FoodType::new("Meat").unwrap(),
///     today,
/// )
/// .unwrap();
///
/// assert!(simba.is_healthy());
/// assert!(simba.enclosure_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    // Identity
    id: AnimalId,

    // Identity-level attributes
    species: Species,
    name: AnimalName,
    date_of_birth: NaiveDate,
    gender: Gender,
    favorite_food: FoodType,

    // Mutable state
    is_healthy: bool,
    enclosure_id: Option<EnclosureId>,
}

impl Animal {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Register a new, healthy animal that is not yet in any enclosure.
    ///
    /// `today` is the zoo's current date, used to reject birth dates in the future.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `date_of_birth` is after `today`.
    pub fn new(
        species: Species,
        name: AnimalName,
        date_of_birth: NaiveDate,
        gender: Gender,
        favorite_food: FoodType,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        if date_of_birth > today {
            return Err(DomainError::validation(
                "Date of birth cannot be in the future",
            ));
        }

        Ok(Self {
            id: AnimalId::new(),
            species,
            name,
            date_of_birth,
            gender,
            favorite_food,
            is_healthy: true,
            enclosure_id: None,
        })
    }

    /// Set the animal's ID (used when loading from storage).
    pub fn with_id(mut self, id: AnimalId) -> Self {
        self.id = id;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> AnimalId {
        self.id
    }

    #[inline]
    pub fn species(&self) -> &Species {
        &self.species
    }

    #[inline]
    pub fn name(&self) -> &AnimalName {
        &self.name
    }

    #[inline]
    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    #[inline]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    #[inline]
    pub fn favorite_food(&self) -> &FoodType {
        &self.favorite_food
    }

    #[inline]
    pub fn is_healthy(&self) -> bool {
        self.is_healthy
    }

    /// The enclosure the animal currently lives in, if any.
    #[inline]
    pub fn enclosure_id(&self) -> Option<EnclosureId> {
        self.enclosure_id
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Mark the animal as healthy. Returns `true` if the flag changed.
    pub fn treat(&mut self) -> bool {
        let changed = !self.is_healthy;
        self.is_healthy = true;
        changed
    }

    /// Mark the animal as sick. Returns `true` if the flag changed.
    pub fn mark_as_sick(&mut self) -> bool {
        let changed = self.is_healthy;
        self.is_healthy = false;
        changed
    }

    // =========================================================================
    // Enclosure reference (driven by Enclosure only)
    // =========================================================================

    pub(crate) fn move_to_enclosure(
        &mut self,
        enclosure_id: EnclosureId,
        events: &DomainEvents,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let old_enclosure_id = self.enclosure_id.replace(enclosure_id);
        events.raise(&AnimalMoved {
            animal_id: self.id,
            old_enclosure_id,
            new_enclosure_id: Some(enclosure_id),
            occurred_on: now,
        })?;
        Ok(())
    }

    pub(crate) fn remove_from_enclosure(
        &mut self,
        events: &DomainEvents,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let old_enclosure_id = self.enclosure_id.take();
        events.raise(&AnimalMoved {
            animal_id: self.id,
            old_enclosure_id,
            new_enclosure_id: None,
            occurred_on: now,
        })?;
        Ok(())
    }

    /// Drop an enclosure reference that no enclosure backs up.
    ///
    /// `listed_in` is the enclosure the animal currently references, or `None`
    /// when that enclosure no longer exists. The reference is cleared, with an
    /// `AnimalMoved` event, only when the enclosure is gone or does not list
    /// the animal. Returns `true` if the reference was cleared.
    pub fn detach_from_stale_enclosure(
        &mut self,
        listed_in: Option<&Enclosure>,
        events: &DomainEvents,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let Some(current) = self.enclosure_id else {
            return Ok(false);
        };
        if let Some(enclosure) = listed_in {
            if enclosure.id() != current || enclosure.contains(self.id) {
                return Ok(false);
            }
        }
        self.remove_from_enclosure(events, now)?;
        Ok(true)
    }
}

// ============================================================================
// Tests
// ============================================================================
