//! Zoo domain: animals, enclosures, feeding schedules and the rules that bind them.
//!
//! This crate is synchronous and free of I/O. Everything that touches storage
//! or the wall clock lives in the engine crate and reaches the domain through
//! plain arguments.

pub mod aggregates;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::{Animal, Enclosure, FeedingSchedule, FEEDING_TIME_WINDOW_MINUTES};
pub use error::DomainError;
pub use events::{
    AdmissionOutcome, AnimalMoved, DomainEvent, DomainEvents, EventHandler, FeedingTime,
    FnHandler, HandlerError, RecordingHandler, RemovalOutcome, ZooEvent,
};
pub use ids::{AnimalId, EnclosureId, FeedingScheduleId};
pub use value_objects::{AnimalName, EnclosureType, FoodType, Gender, Species};
