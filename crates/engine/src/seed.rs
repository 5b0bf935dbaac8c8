//! Sample data for the demo binary.

use chrono::NaiveDate;
use zoo_domain::{AnimalId, DomainError, EnclosureId};

use crate::app::App;
use crate::use_cases::management::dto::{NewAnimal, NewEnclosure};
use crate::use_cases::ManagementError;

/// Ids of the seeded data, for the demo to act on.
#[derive(Debug, Clone, Copy)]
pub struct DemoZoo {
    pub lion_den: EnclosureId,
    pub savanna: EnclosureId,
    pub aviary: EnclosureId,
    pub simba: AnimalId,
    pub rajah: AnimalId,
    pub marty: AnimalId,
    pub blu: AnimalId,
}

fn enclosure(kind: &str, size: u32, max_capacity: u32) -> NewEnclosure {
    NewEnclosure {
        enclosure_type: kind.to_string(),
        size,
        max_capacity,
    }
}

fn animal(
    species: &str,
    name: &str,
    born: &str,
    gender: &str,
    food: &str,
) -> Result<NewAnimal, ManagementError> {
    let date_of_birth = born
        .parse::<NaiveDate>()
        .map_err(|e| DomainError::parse(format!("{born}: {e}")))?;
    Ok(NewAnimal {
        species: species.to_string(),
        name: name.to_string(),
        date_of_birth,
        gender: gender.to_string(),
        favorite_food: food.to_string(),
    })
}

/// Create three enclosures and four animals, and place each animal.
pub async fn seed_demo(app: &App) -> Result<DemoZoo, ManagementError> {
    let enclosures = &app.use_cases.management.enclosure;
    let animals = &app.use_cases.management.animal;

    let lion_den = enclosures.create(enclosure("Predator", 400, 1)).await?;
    let savanna = enclosures.create(enclosure("Herbivore", 2000, 6)).await?;
    let aviary = enclosures.create(enclosure("Aviary", 150, 20)).await?;

    let simba = animals
        .create(animal("Lion", "Simba", "2016-05-14", "Male", "Meat")?)
        .await?;
    let rajah = animals
        .create(animal("Tiger", "Rajah", "2014-11-02", "Male", "Meat")?)
        .await?;
    let marty = animals
        .create(animal("Zebra", "Marty", "2018-03-01", "Male", "Grass")?)
        .await?;
    let blu = animals
        .create(animal("Macaw", "Blu", "2020-07-09", "Male", "Seeds")?)
        .await?;

    animals.move_to_enclosure(simba, lion_den).await?;
    animals.move_to_enclosure(marty, savanna).await?;
    animals.move_to_enclosure(blu, aviary).await?;

    tracing::info!("Demo zoo seeded");
    Ok(DemoZoo {
        lion_den,
        savanna,
        aviary,
        simba,
        rajah,
        marty,
        blu,
    })
}
