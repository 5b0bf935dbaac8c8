//! Facts raised by aggregates after a state change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::FoodType;
use crate::{AnimalId, EnclosureId};

use super::dispatcher::{DomainEvent, DomainEvents, Subscribers};

/// An animal's enclosure reference changed.
///
/// `new_enclosure_id` is `None` when the animal left its enclosure without
/// entering another one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalMoved {
    pub animal_id: AnimalId,
    pub old_enclosure_id: Option<EnclosureId>,
    pub new_enclosure_id: Option<EnclosureId>,
    pub occurred_on: DateTime<Utc>,
}

/// A feeding was created or rescheduled close to the current time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingTime {
    pub animal_id: AnimalId,
    pub food_type: FoodType,
    pub occurred_on: DateTime<Utc>,
}

impl DomainEvent for AnimalMoved {
    fn event_type(&self) -> &'static str {
        "animal_moved"
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        self.occurred_on
    }

    fn subscribers(bus: &DomainEvents) -> &Subscribers<Self> {
        &bus.animal_moved
    }
}

impl DomainEvent for FeedingTime {
    fn event_type(&self) -> &'static str {
        "feeding_time"
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        self.occurred_on
    }

    fn subscribers(bus: &DomainEvents) -> &Subscribers<Self> {
        &bus.feeding_time
    }
}

/// Every zoo event as one tagged value, for consumers that want a single stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ZooEvent {
    AnimalMoved(AnimalMoved),
    FeedingTime(FeedingTime),
}

impl ZooEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::AnimalMoved(e) => e.event_type(),
            Self::FeedingTime(e) => e.event_type(),
        }
    }

    pub fn occurred_on(&self) -> DateTime<Utc> {
        match self {
            Self::AnimalMoved(e) => e.occurred_on(),
            Self::FeedingTime(e) => e.occurred_on(),
        }
    }
}

impl From<AnimalMoved> for ZooEvent {
    fn from(event: AnimalMoved) -> Self {
        Self::AnimalMoved(event)
    }
}

impl From<FeedingTime> for ZooEvent {
    fn from(event: FeedingTime) -> Self {
        Self::FeedingTime(event)
    }
}
