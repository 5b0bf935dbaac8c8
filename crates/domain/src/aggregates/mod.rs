//! Aggregate roots - domain objects that own an invariant
//!
//! Each aggregate:
//! - Has a unique identity assigned at construction
//! - Exposes behavior through methods, not public fields
//! - Raises domain events through an injected `DomainEvents` dispatcher
//! - Reports rule outcomes as enums, and malformed input as `DomainError`
//!
//! Aggregates reference each other by id only. `Animal` knows the id of its
//! enclosure, `Enclosure` knows the ids of its animals, `FeedingSchedule` knows
//! the id of the animal it feeds.

pub mod animal;
pub mod enclosure;
pub mod feeding_schedule;

pub use animal::Animal;
pub use enclosure::Enclosure;
pub use feeding_schedule::{FeedingSchedule, FEEDING_TIME_WINDOW_MINUTES};
