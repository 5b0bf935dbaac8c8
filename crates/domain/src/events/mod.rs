//! Domain Events
//!
//! Immutable facts about state changes that already happened, and the
//! dispatcher that delivers them to interested handlers.
//!
//! ## Aggregate Mutation Outcomes
//!
//! `enclosure_events` contains return types from enclosure mutations,
//! communicating what happened when membership was modified.

mod dispatcher;
pub mod enclosure_events;
mod zoo_events;

pub use dispatcher::{
    DomainEvent, DomainEvents, EventHandler, FnHandler, HandlerError, RecordingHandler,
    Subscribers,
};
pub use enclosure_events::{AdmissionOutcome, RemovalOutcome};
pub use zoo_events::{AnimalMoved, FeedingTime, ZooEvent};
