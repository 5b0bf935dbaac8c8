use std::sync::Arc;

use zoo_domain::{Enclosure, EnclosureId, EnclosureType};

use super::dto::{AnimalDto, EnclosureDto, NewEnclosure};
use super::ManagementError;
use crate::infrastructure::ports::{AnimalRepo, EnclosureRepo};

pub struct EnclosureCrud {
    enclosures: Arc<dyn EnclosureRepo>,
    animals: Arc<dyn AnimalRepo>,
}

impl EnclosureCrud {
    pub fn new(enclosures: Arc<dyn EnclosureRepo>, animals: Arc<dyn AnimalRepo>) -> Self {
        Self {
            enclosures,
            animals,
        }
    }

    pub async fn list(&self) -> Result<Vec<EnclosureDto>, ManagementError> {
        let enclosures = self.enclosures.list().await?;
        Ok(enclosures.iter().map(EnclosureDto::from).collect())
    }

    pub async fn get(&self, id: EnclosureId) -> Result<Option<EnclosureDto>, ManagementError> {
        Ok(self.enclosures.get(id).await?.as_ref().map(EnclosureDto::from))
    }

    /// Enclosures with at least one free slot.
    pub async fn list_available(&self) -> Result<Vec<EnclosureDto>, ManagementError> {
        let enclosures = self.enclosures.list_available().await?;
        Ok(enclosures.iter().map(EnclosureDto::from).collect())
    }

    pub async fn list_animals(&self, id: EnclosureId) -> Result<Vec<AnimalDto>, ManagementError> {
        let animals = self.animals.list_in_enclosure(id).await?;
        Ok(animals.iter().map(AnimalDto::from).collect())
    }

    pub async fn create(&self, input: NewEnclosure) -> Result<EnclosureId, ManagementError> {
        let enclosure = Enclosure::new(
            EnclosureType::new(input.enclosure_type)?,
            input.size,
            input.max_capacity,
        )?;

        self.enclosures.add(&enclosure).await?;
        tracing::info!(
            enclosure_id = %enclosure.id(),
            enclosure_type = %enclosure.enclosure_type(),
            max_capacity = enclosure.max_capacity(),
            "Enclosure created"
        );
        Ok(enclosure.id())
    }

    /// Write the stored enclosure back unchanged.
    ///
    /// Type, size and capacity are fixed at creation and membership only
    /// changes through animal transfers, so there is nothing else to update.
    pub async fn update(&self, id: EnclosureId) -> Result<(), ManagementError> {
        let enclosure = self
            .enclosures
            .get(id)
            .await?
            .ok_or_else(|| ManagementError::not_found("Enclosure", id))?;
        self.enclosures.update(&enclosure).await?;
        Ok(())
    }

    /// Delete an empty enclosure.
    pub async fn delete(&self, id: EnclosureId) -> Result<(), ManagementError> {
        let enclosure = self
            .enclosures
            .get(id)
            .await?
            .ok_or_else(|| ManagementError::not_found("Enclosure", id))?;
        if !enclosure.is_empty() {
            return Err(ManagementError::EnclosureOccupied(id));
        }
        self.enclosures.delete(id).await?;
        Ok(())
    }
}
