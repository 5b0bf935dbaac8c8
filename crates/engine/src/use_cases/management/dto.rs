//! Flat, serializable views of the aggregates and the inputs that create or
//! change them.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use zoo_domain::{Animal, AnimalId, Enclosure, EnclosureId, FeedingSchedule, FeedingScheduleId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalDto {
    pub id: AnimalId,
    pub species: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub favorite_food: String,
    pub is_healthy: bool,
    pub enclosure_id: Option<EnclosureId>,
}

impl From<&Animal> for AnimalDto {
    fn from(animal: &Animal) -> Self {
        Self {
            id: animal.id(),
            species: animal.species().to_string(),
            name: animal.name().to_string(),
            date_of_birth: animal.date_of_birth(),
            gender: animal.gender().to_string(),
            favorite_food: animal.favorite_food().to_string(),
            is_healthy: animal.is_healthy(),
            enclosure_id: animal.enclosure_id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimal {
    pub species: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub favorite_food: String,
}

/// Only the health flag of an existing animal can be changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalUpdate {
    pub id: AnimalId,
    pub is_healthy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnclosureDto {
    pub id: EnclosureId,
    pub enclosure_type: String,
    pub size: u32,
    pub max_capacity: u32,
    pub current_animals_count: u32,
    pub animal_ids: Vec<AnimalId>,
}

impl From<&Enclosure> for EnclosureDto {
    fn from(enclosure: &Enclosure) -> Self {
        Self {
            id: enclosure.id(),
            enclosure_type: enclosure.enclosure_type().to_string(),
            size: enclosure.size(),
            max_capacity: enclosure.max_capacity(),
            current_animals_count: enclosure.occupancy(),
            animal_ids: enclosure.animal_ids().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnclosure {
    pub enclosure_type: String,
    pub size: u32,
    pub max_capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingScheduleDto {
    pub id: FeedingScheduleId,
    pub animal_id: AnimalId,
    pub food_type: String,
    pub feeding_time: NaiveTime,
    pub schedule_date: NaiveDate,
    pub is_completed: bool,
}

impl From<&FeedingSchedule> for FeedingScheduleDto {
    fn from(schedule: &FeedingSchedule) -> Self {
        Self {
            id: schedule.id(),
            animal_id: schedule.animal_id(),
            food_type: schedule.food_type().to_string(),
            feeding_time: schedule.feeding_time(),
            schedule_date: schedule.schedule_date(),
            is_completed: schedule.is_completed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedingSchedule {
    pub animal_id: AnimalId,
    pub food_type: String,
    pub feeding_time: NaiveTime,
    pub schedule_date: NaiveDate,
}

/// Food, time and completion of an existing schedule. The animal and date are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUpdate {
    pub id: FeedingScheduleId,
    pub food_type: String,
    pub feeding_time: NaiveTime,
    pub is_completed: bool,
}
