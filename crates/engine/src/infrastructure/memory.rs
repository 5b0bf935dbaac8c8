//! In-memory repositories.
//!
//! Each repository keeps its aggregates in insertion order behind a
//! `tokio::sync::RwLock`. Stored values are clones: a caller mutating a loaded
//! aggregate changes nothing until it calls `update`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use zoo_domain::{Animal, AnimalId, Enclosure, EnclosureId, FeedingSchedule, FeedingScheduleId};

use crate::infrastructure::ports::{AnimalRepo, EnclosureRepo, FeedingScheduleRepo, RepoError};

/// Insert `item` unless an item with the same id is already stored.
fn insert_new<T: Clone, K: PartialEq + ToString>(
    items: &mut Vec<T>,
    item: &T,
    key: impl Fn(&T) -> K,
    entity_type: &'static str,
) -> Result<(), RepoError> {
    let id = key(item);
    if items.iter().any(|existing| key(existing) == id) {
        return Err(RepoError::duplicate(entity_type, id.to_string()));
    }
    items.push(item.clone());
    Ok(())
}

/// Replace the stored item with the same id as `item`.
fn replace<T: Clone, K: PartialEq + ToString>(
    items: &mut [T],
    item: &T,
    key: impl Fn(&T) -> K,
    entity_type: &'static str,
) -> Result<(), RepoError> {
    let id = key(item);
    match items.iter_mut().find(|existing| key(existing) == id) {
        Some(slot) => {
            *slot = item.clone();
            Ok(())
        }
        None => Err(RepoError::not_found(entity_type, id.to_string())),
    }
}

// =============================================================================
// Animals
// =============================================================================

#[derive(Default)]
pub struct InMemoryAnimalRepo {
    animals: RwLock<Vec<Animal>>,
}

impl InMemoryAnimalRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnimalRepo for InMemoryAnimalRepo {
    async fn get(&self, id: AnimalId) -> Result<Option<Animal>, RepoError> {
        let animals = self.animals.read().await;
        Ok(animals.iter().find(|a| a.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Animal>, RepoError> {
        Ok(self.animals.read().await.clone())
    }

    async fn add(&self, animal: &Animal) -> Result<(), RepoError> {
        let mut animals = self.animals.write().await;
        insert_new(&mut animals, animal, Animal::id, "Animal")
    }

    async fn update(&self, animal: &Animal) -> Result<(), RepoError> {
        let mut animals = self.animals.write().await;
        replace(&mut animals, animal, Animal::id, "Animal")
    }

    async fn delete(&self, id: AnimalId) -> Result<(), RepoError> {
        self.animals.write().await.retain(|a| a.id() != id);
        Ok(())
    }

    async fn list_in_enclosure(
        &self,
        enclosure_id: EnclosureId,
    ) -> Result<Vec<Animal>, RepoError> {
        let animals = self.animals.read().await;
        Ok(animals
            .iter()
            .filter(|a| a.enclosure_id() == Some(enclosure_id))
            .cloned()
            .collect())
    }
}

// =============================================================================
// Enclosures
// =============================================================================

#[derive(Default)]
pub struct InMemoryEnclosureRepo {
    enclosures: RwLock<Vec<Enclosure>>,
}

impl InMemoryEnclosureRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnclosureRepo for InMemoryEnclosureRepo {
    async fn get(&self, id: EnclosureId) -> Result<Option<Enclosure>, RepoError> {
        let enclosures = self.enclosures.read().await;
        Ok(enclosures.iter().find(|e| e.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Enclosure>, RepoError> {
        Ok(self.enclosures.read().await.clone())
    }

    async fn add(&self, enclosure: &Enclosure) -> Result<(), RepoError> {
        let mut enclosures = self.enclosures.write().await;
        insert_new(&mut enclosures, enclosure, Enclosure::id, "Enclosure")
    }

    async fn update(&self, enclosure: &Enclosure) -> Result<(), RepoError> {
        let mut enclosures = self.enclosures.write().await;
        replace(&mut enclosures, enclosure, Enclosure::id, "Enclosure")
    }

    async fn delete(&self, id: EnclosureId) -> Result<(), RepoError> {
        self.enclosures.write().await.retain(|e| e.id() != id);
        Ok(())
    }

    async fn list_available(&self) -> Result<Vec<Enclosure>, RepoError> {
        let enclosures = self.enclosures.read().await;
        Ok(enclosures
            .iter()
            .filter(|e| e.can_add_animal())
            .cloned()
            .collect())
    }
}

// =============================================================================
// Feeding schedules
// =============================================================================

#[derive(Default)]
pub struct InMemoryFeedingScheduleRepo {
    schedules: RwLock<Vec<FeedingSchedule>>,
}

impl InMemoryFeedingScheduleRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedingScheduleRepo for InMemoryFeedingScheduleRepo {
    async fn get(&self, id: FeedingScheduleId) -> Result<Option<FeedingSchedule>, RepoError> {
        let schedules = self.schedules.read().await;
        Ok(schedules.iter().find(|s| s.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<FeedingSchedule>, RepoError> {
        Ok(self.schedules.read().await.clone())
    }

    async fn add(&self, schedule: &FeedingSchedule) -> Result<(), RepoError> {
        let mut schedules = self.schedules.write().await;
        insert_new(&mut schedules, schedule, FeedingSchedule::id, "FeedingSchedule")
    }

    async fn update(&self, schedule: &FeedingSchedule) -> Result<(), RepoError> {
        let mut schedules = self.schedules.write().await;
        replace(&mut schedules, schedule, FeedingSchedule::id, "FeedingSchedule")
    }

    async fn delete(&self, id: FeedingScheduleId) -> Result<(), RepoError> {
        self.schedules.write().await.retain(|s| s.id() != id);
        Ok(())
    }

    async fn list_for_animal(
        &self,
        animal_id: AnimalId,
    ) -> Result<Vec<FeedingSchedule>, RepoError> {
        let schedules = self.schedules.read().await;
        Ok(schedules
            .iter()
            .filter(|s| s.animal_id() == animal_id)
            .cloned()
            .collect())
    }

    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<FeedingSchedule>, RepoError> {
        let schedules = self.schedules.read().await;
        Ok(schedules
            .iter()
            .filter(|s| s.schedule_date() == date)
            .cloned()
            .collect())
    }
}

/// The three in-memory repositories, ready to hand to `App::new`.
pub struct InMemoryRepositories {
    pub animal: Arc<InMemoryAnimalRepo>,
    pub enclosure: Arc<InMemoryEnclosureRepo>,
    pub feeding_schedule: Arc<InMemoryFeedingScheduleRepo>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self {
            animal: Arc::new(InMemoryAnimalRepo::new()),
            enclosure: Arc::new(InMemoryEnclosureRepo::new()),
            feeding_schedule: Arc::new(InMemoryFeedingScheduleRepo::new()),
        }
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}
