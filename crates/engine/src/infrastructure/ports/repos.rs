//! Repository port traits for storage access.
//!
//! `get` yields `Ok(None)` for an unknown id; only storage failures are errors.
//! Every call is an independent write: there is no transaction spanning two
//! calls, so coordinating use cases must tolerate a partial sequence.

use async_trait::async_trait;
use chrono::NaiveDate;
use zoo_domain::{Animal, AnimalId, Enclosure, EnclosureId, FeedingSchedule, FeedingScheduleId};

use super::error::RepoError;

// =============================================================================
// Database Ports (one per aggregate type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnimalRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: AnimalId) -> Result<Option<Animal>, RepoError>;
    async fn list(&self) -> Result<Vec<Animal>, RepoError>;
    async fn add(&self, animal: &Animal) -> Result<(), RepoError>;
    async fn update(&self, animal: &Animal) -> Result<(), RepoError>;
    async fn delete(&self, id: AnimalId) -> Result<(), RepoError>;

    // Queries
    async fn list_in_enclosure(&self, enclosure_id: EnclosureId)
        -> Result<Vec<Animal>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnclosureRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: EnclosureId) -> Result<Option<Enclosure>, RepoError>;
    async fn list(&self) -> Result<Vec<Enclosure>, RepoError>;
    async fn add(&self, enclosure: &Enclosure) -> Result<(), RepoError>;
    async fn update(&self, enclosure: &Enclosure) -> Result<(), RepoError>;
    async fn delete(&self, id: EnclosureId) -> Result<(), RepoError>;

    // Queries
    /// Enclosures whose occupancy is below their max capacity.
    async fn list_available(&self) -> Result<Vec<Enclosure>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedingScheduleRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: FeedingScheduleId) -> Result<Option<FeedingSchedule>, RepoError>;
    async fn list(&self) -> Result<Vec<FeedingSchedule>, RepoError>;
    async fn add(&self, schedule: &FeedingSchedule) -> Result<(), RepoError>;
    async fn update(&self, schedule: &FeedingSchedule) -> Result<(), RepoError>;
    async fn delete(&self, id: FeedingScheduleId) -> Result<(), RepoError>;

    // Queries
    async fn list_for_animal(&self, animal_id: AnimalId)
        -> Result<Vec<FeedingSchedule>, RepoError>;
    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<FeedingSchedule>, RepoError>;
}
