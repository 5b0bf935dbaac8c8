//! Errors raised by the zoo domain.
//!
//! Rule outcomes (a full enclosure, an incompatible species) are not errors;
//! the aggregates report them as enums. `DomainError` covers input that can
//! never be valid and event handlers that refuse an event.

use thiserror::Error;

use crate::events::HandlerError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected input: an empty name, a zero capacity, a birth date after today.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A string did not name any known variant (`FromStr` implementations).
    #[error("Parse error: {0}")]
    Parse(String),

    /// A domain event handler failed while the event was being dispatched.
    ///
    /// The state change that raised the event has already been applied.
    #[error("Event handler failed: {0}")]
    EventHandler(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<HandlerError> for DomainError {
    fn from(err: HandlerError) -> Self {
        Self::EventHandler(err.to_string())
    }
}
