//! Enclosure aggregate - a physical area that houses animals
//!
//! The enclosure is the only authority over its member list. Adding or removing
//! an animal goes through `add_animal` / `remove_animal`, which update the
//! member list and the animal's enclosure reference together.
//!
//! # Species rules
//!
//! | Enclosure type | Accepts                              |
//! |----------------|--------------------------------------|
//! | `Predator`     | only species on the predator list    |
//! | `Herbivore`    | only species NOT on the predator list |
//! | anything else  | any species                          |

use chrono::{DateTime, Utc};

use crate::aggregates::Animal;
use crate::error::DomainError;
use crate::events::{AdmissionOutcome, DomainEvents, RemovalOutcome};
use crate::value_objects::{EnclosureType, Species};
use crate::{AnimalId, EnclosureId};

/// An enclosure in the zoo
///
/// # Invariants
///
/// - `size` and `max_capacity` are positive and fixed for life
/// - `animals.len() <= max_capacity`
/// - every member's `enclosure_id()` is this enclosure's id
///
/// # Example
///
/// ```
/// use zoo_domain::aggregates::Enclosure;
/// use zoo_domain::value_objects::EnclosureType;
///
/// let enclosure = Enclosure::new(EnclosureType::predator(), 100, 2).unwrap();
/// assert!(enclosure.can_add_animal());
/// assert_eq!(enclosure.available_slots(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    id: EnclosureId,
    enclosure_type: EnclosureType,
    size: u32,
    max_capacity: u32,
    /// Members in insertion order
    animals: Vec<AnimalId>,
}

impl Enclosure {
    /// Create an empty enclosure.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `size` or `max_capacity` is zero.
    pub fn new(
        enclosure_type: EnclosureType,
        size: u32,
        max_capacity: u32,
    ) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::validation("Size must be greater than zero"));
        }
        if max_capacity == 0 {
            return Err(DomainError::validation(
                "Max capacity must be greater than zero",
            ));
        }

        Ok(Self {
            id: EnclosureId::new(),
            enclosure_type,
            size,
            max_capacity,
            animals: Vec::new(),
        })
    }

    /// Set the enclosure's ID (used when loading from storage).
    pub fn with_id(mut self, id: EnclosureId) -> Self {
        self.id = id;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> EnclosureId {
        self.id
    }

    #[inline]
    pub fn enclosure_type(&self) -> &EnclosureType {
        &self.enclosure_type
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// Ids of the animals currently inside, in the order they arrived.
    #[inline]
    pub fn animal_ids(&self) -> &[AnimalId] {
        &self.animals
    }

    pub fn occupancy(&self) -> u32 {
        // Bounded by max_capacity, which is a u32
        self.animals.len() as u32
    }

    pub fn available_slots(&self) -> u32 {
        self.max_capacity.saturating_sub(self.occupancy())
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    pub fn contains(&self, animal_id: AnimalId) -> bool {
        self.animals.contains(&animal_id)
    }

    // =========================================================================
    // Rules
    // =========================================================================

    /// True while there is room for one more animal.
    pub fn can_add_animal(&self) -> bool {
        self.occupancy() < self.max_capacity
    }

    /// Whether this enclosure type accepts the given species.
    pub fn is_compatible(&self, species: &Species) -> bool {
        if self.enclosure_type.is_herbivore() {
            return !species.is_predator();
        }
        if self.enclosure_type.is_predator() {
            return species.is_predator();
        }
        true
    }

    /// Capacity and species check together, without changing anything.
    pub fn can_accept(&self, animal: &Animal) -> bool {
        self.can_add_animal() && self.is_compatible(animal.species())
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Put `animal` into this enclosure.
    ///
    /// On `Admitted` the animal's enclosure reference now points here and an
    /// `AnimalMoved` event has been raised. Any other outcome leaves both the
    /// enclosure and the animal untouched.
    ///
    /// An animal that still references another enclosure is refused with
    /// `InAnotherEnclosure`; take it out of that enclosure first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EventHandler` if a handler rejected the
    /// `AnimalMoved` event. The membership change has been applied by then.
    pub fn add_animal(
        &mut self,
        animal: &mut Animal,
        events: &DomainEvents,
        now: DateTime<Utc>,
    ) -> Result<AdmissionOutcome, DomainError> {
        if self.contains(animal.id()) {
            return Ok(AdmissionOutcome::AlreadyPresent);
        }
        if let Some(current) = animal.enclosure_id() {
            return Ok(AdmissionOutcome::InAnotherEnclosure { current });
        }
        if !self.can_add_animal() {
            return Ok(AdmissionOutcome::CapacityFull {
                occupancy: self.occupancy(),
                max_capacity: self.max_capacity,
            });
        }
        if !self.is_compatible(animal.species()) {
            return Ok(AdmissionOutcome::IncompatibleSpecies);
        }

        self.animals.push(animal.id());
        animal.move_to_enclosure(self.id, events, now)?;
        Ok(AdmissionOutcome::Admitted)
    }

    /// Take `animal` out of this enclosure.
    ///
    /// On `Removed` the animal's enclosure reference has been cleared and an
    /// `AnimalMoved` event raised. `NotPresent` leaves the animal untouched.
    pub fn remove_animal(
        &mut self,
        animal: &mut Animal,
        events: &DomainEvents,
        now: DateTime<Utc>,
    ) -> Result<RemovalOutcome, DomainError> {
        let Some(position) = self.animals.iter().position(|id| *id == animal.id()) else {
            return Ok(RemovalOutcome::NotPresent);
        };

        self.animals.remove(position);
        animal.remove_from_enclosure(events, now)?;
        Ok(RemovalOutcome::Removed)
    }
}

// ============================================================================
// Tests
// ============================================================================
