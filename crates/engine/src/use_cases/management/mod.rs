//! Management use cases for CRUD-style operations.
//!
//! These services translate DTOs into domain calls. Anything that moves an
//! animal or plans a feeding is delegated to the transfer and feeding use
//! cases so those rules live in one place.

mod animal;
pub mod dto;
mod enclosure;
mod feeding_schedule;

pub use animal::AnimalCrud;
pub use enclosure::EnclosureCrud;
pub use feeding_schedule::FeedingScheduleCrud;

use zoo_domain::{DomainError, EnclosureId};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::feeding::FeedingError;
use crate::use_cases::transfer::TransferError;

/// Shared error type for management use cases.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Enclosure {0} still holds animals")]
    EnclosureOccupied(EnclosureId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error(transparent)]
    Feeding(#[from] FeedingError),
}

impl ManagementError {
    pub(crate) fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub animal: AnimalCrud,
    pub enclosure: EnclosureCrud,
    pub feeding_schedule: FeedingScheduleCrud,
}

impl ManagementUseCases {
    pub fn new(
        animal: AnimalCrud,
        enclosure: EnclosureCrud,
        feeding_schedule: FeedingScheduleCrud,
    ) -> Self {
        Self {
            animal,
            enclosure,
            feeding_schedule,
        }
    }
}
