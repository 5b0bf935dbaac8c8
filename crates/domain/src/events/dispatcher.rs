//! Synchronous domain event dispatch
//!
//! `DomainEvents` is an explicitly constructed dispatcher that the composition
//! root owns and hands to every aggregate operation that raises events. Each
//! event type has its own subscriber list, so matching a handler to an event is
//! resolved at compile time through the `DomainEvent` trait.
//!
//! Dispatch runs in registration order on the caller's stack. The first
//! handler that fails stops the dispatch and its error is returned to the
//! operation that raised the event.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use super::zoo_events::{AnimalMoved, FeedingTime};

/// Error reported by an event handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct HandlerError(String);

impl HandlerError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// An event type that can be dispatched through `DomainEvents`.
pub trait DomainEvent: Clone + fmt::Debug + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;

    fn occurred_on(&self) -> DateTime<Utc>;

    /// The subscriber list for this event type.
    fn subscribers(bus: &DomainEvents) -> &Subscribers<Self>;
}

/// Reacts to one event type.
pub trait EventHandler<E>: Send + Sync {
    fn handle(&self, event: &E) -> Result<(), HandlerError>;
}

/// Handler list for a single event type.
pub struct Subscribers<E> {
    handlers: RwLock<Vec<Arc<dyn EventHandler<E>>>>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }
}

impl<E> Subscribers<E> {
    fn snapshot(&self) -> Vec<Arc<dyn EventHandler<E>>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn same_handler<E>(a: &Arc<dyn EventHandler<E>>, b: &Arc<dyn EventHandler<E>>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// The zoo's event dispatcher.
#[derive(Default)]
pub struct DomainEvents {
    pub(super) animal_moved: Subscribers<AnimalMoved>,
    pub(super) feeding_time: Subscribers<FeedingTime>,
}

impl DomainEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Returns `false` if this exact handler is already registered.
    pub fn register<E: DomainEvent>(&self, handler: Arc<dyn EventHandler<E>>) -> bool {
        let mut handlers = E::subscribers(self)
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if handlers.iter().any(|h| same_handler(h, &handler)) {
            return false;
        }
        handlers.push(handler);
        true
    }

    /// Remove a previously registered handler. Returns `false` if it was not registered.
    pub fn unregister<E: DomainEvent>(&self, handler: &Arc<dyn EventHandler<E>>) -> bool {
        let mut handlers = E::subscribers(self)
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|h| !same_handler(h, handler));
        handlers.len() != before
    }

    /// Dispatch `event` to every handler registered for its type.
    ///
    /// Handlers registered or removed while a dispatch is running take effect
    /// from the next `raise`.
    pub fn raise<E: DomainEvent>(&self, event: &E) -> Result<(), HandlerError> {
        for handler in E::subscribers(self).snapshot() {
            handler.handle(event)?;
        }
        Ok(())
    }

    pub fn handler_count<E: DomainEvent>(&self) -> usize {
        E::subscribers(self)
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for DomainEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainEvents")
            .field("animal_moved", &self.handler_count::<AnimalMoved>())
            .field("feeding_time", &self.handler_count::<FeedingTime>())
            .finish()
    }
}

/// Adapts a closure into an `EventHandler`.
pub struct FnHandler<F>(F);

impl<F> FnHandler<F> {
    pub fn new<E>(f: F) -> Self
    where
        F: Fn(&E) -> Result<(), HandlerError> + Send + Sync,
    {
        Self(f)
    }
}

impl<E, F> EventHandler<E> for FnHandler<F>
where
    F: Fn(&E) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, event: &E) -> Result<(), HandlerError> {
        (self.0)(event)
    }
}

/// Keeps a copy of every event it receives.
pub struct RecordingHandler<E> {
    events: Mutex<Vec<E>>,
}

impl<E: Clone> RecordingHandler<E> {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<E> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Clone> Default for RecordingHandler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + Send> EventHandler<E> for RecordingHandler<E> {
    fn handle(&self, event: &E) -> Result<(), HandlerError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}
