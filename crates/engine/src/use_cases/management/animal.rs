use std::sync::Arc;

use zoo_domain::{Animal, AnimalId, AnimalName, EnclosureId, FoodType, Gender, Species};

use super::dto::{AnimalDto, AnimalUpdate, NewAnimal};
use super::ManagementError;
use crate::infrastructure::clock::ZooClock;
use crate::infrastructure::ports::AnimalRepo;
use crate::use_cases::transfer::AnimalTransferService;

pub struct AnimalCrud {
    animals: Arc<dyn AnimalRepo>,
    transfer: Arc<AnimalTransferService>,
    clock: ZooClock,
}

impl AnimalCrud {
    pub fn new(
        animals: Arc<dyn AnimalRepo>,
        transfer: Arc<AnimalTransferService>,
        clock: ZooClock,
    ) -> Self {
        Self {
            animals,
            transfer,
            clock,
        }
    }

    pub async fn list(&self) -> Result<Vec<AnimalDto>, ManagementError> {
        let animals = self.animals.list().await?;
        Ok(animals.iter().map(AnimalDto::from).collect())
    }

    pub async fn get(&self, id: AnimalId) -> Result<Option<AnimalDto>, ManagementError> {
        Ok(self.animals.get(id).await?.as_ref().map(AnimalDto::from))
    }

    /// Register a new animal. It starts healthy and outside any enclosure.
    pub async fn create(&self, input: NewAnimal) -> Result<AnimalId, ManagementError> {
        let animal = Animal::new(
            Species::new(input.species)?,
            AnimalName::new(input.name)?,
            input.date_of_birth,
            input.gender.parse::<Gender>()?,
            FoodType::new(input.favorite_food)?,
            self.clock.today(),
        )?;

        self.animals.add(&animal).await?;
        tracing::info!(animal_id = %animal.id(), species = %animal.species(), "Animal registered");
        Ok(animal.id())
    }

    /// Set the health flag. Every other field is left as stored.
    pub async fn update(&self, input: AnimalUpdate) -> Result<(), ManagementError> {
        let mut animal = self
            .animals
            .get(input.id)
            .await?
            .ok_or_else(|| ManagementError::not_found("Animal", input.id))?;

        let changed = if input.is_healthy {
            animal.treat()
        } else {
            animal.mark_as_sick()
        };
        if changed {
            tracing::info!(animal_id = %input.id, is_healthy = input.is_healthy, "Animal health changed");
        }

        self.animals.update(&animal).await?;
        Ok(())
    }

    /// Delete an animal, taking it out of its enclosure first.
    pub async fn delete(&self, id: AnimalId) -> Result<(), ManagementError> {
        if let Some(animal) = self.animals.get(id).await? {
            if animal.enclosure_id().is_some() {
                self.transfer.remove_from_enclosure(id).await?;
            }
        }
        self.animals.delete(id).await?;
        Ok(())
    }

    pub async fn move_to_enclosure(
        &self,
        animal_id: AnimalId,
        enclosure_id: EnclosureId,
    ) -> Result<bool, ManagementError> {
        Ok(self.transfer.transfer_animal(animal_id, enclosure_id).await?)
    }

    pub async fn remove_from_enclosure(&self, animal_id: AnimalId) -> Result<bool, ManagementError> {
        Ok(self.transfer.remove_from_enclosure(animal_id).await?)
    }
}
