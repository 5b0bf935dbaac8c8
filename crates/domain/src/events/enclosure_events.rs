//! Enclosure mutation outcomes
//!
//! These enums communicate what happened when an enclosure's membership was
//! modified, allowing callers to react appropriately.

use crate::EnclosureId;

/// Outcome of offering an animal to an enclosure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// The animal joined the enclosure
    Admitted,
    /// The enclosure already holds `max_capacity` animals
    CapacityFull { occupancy: u32, max_capacity: u32 },
    /// The enclosure type does not accept this species
    IncompatibleSpecies,
    /// The animal is already a member, nothing changed
    AlreadyPresent,
    /// The animal still belongs to `current`; it must leave that enclosure first
    InAnotherEnclosure { current: EnclosureId },
}

impl AdmissionOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Outcome of taking an animal out of an enclosure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed,
    /// The animal was not a member, nothing changed
    NotPresent,
}

impl RemovalOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed)
    }
}
