//! Event handlers that write domain events to the tracing log.
//!
//! Every event is widened to a `ZooEvent` first, so the log carries the same
//! `event_type` names a single event stream would.

use std::marker::PhantomData;
use std::sync::Arc;

use zoo_domain::{
    AnimalMoved, DomainEvent, DomainEvents, EventHandler, FeedingTime, HandlerError, ZooEvent,
};

/// Logs every event of type `E` at info level.
pub struct EventLogger<E> {
    _event: PhantomData<fn(&E)>,
}

impl<E> EventLogger<E> {
    pub fn new() -> Self {
        Self {
            _event: PhantomData,
        }
    }
}

impl<E> Default for EventLogger<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventHandler<E> for EventLogger<E>
where
    E: DomainEvent + Into<ZooEvent>,
{
    fn handle(&self, event: &E) -> Result<(), HandlerError> {
        log_event(&event.clone().into());
        Ok(())
    }
}

fn log_event(event: &ZooEvent) {
    let event_type = event.event_type();
    let occurred_on = event.occurred_on();
    match event {
        ZooEvent::AnimalMoved(moved) => match moved.new_enclosure_id {
            Some(new) => tracing::info!(
                event_type,
                animal_id = %moved.animal_id,
                old_enclosure_id = ?moved.old_enclosure_id,
                new_enclosure_id = %new,
                %occurred_on,
                "Animal moved into enclosure"
            ),
            None => tracing::info!(
                event_type,
                animal_id = %moved.animal_id,
                old_enclosure_id = ?moved.old_enclosure_id,
                %occurred_on,
                "Animal removed from enclosure"
            ),
        },
        ZooEvent::FeedingTime(feeding) => tracing::info!(
            event_type,
            animal_id = %feeding.animal_id,
            food_type = %feeding.food_type,
            %occurred_on,
            "Feeding time"
        ),
    }
}

/// Subscribe the log handlers to `events`.
pub fn register_event_loggers(events: &DomainEvents) {
    events.register::<AnimalMoved>(Arc::new(EventLogger::<AnimalMoved>::new()));
    events.register::<FeedingTime>(Arc::new(EventLogger::<FeedingTime>::new()));
}
