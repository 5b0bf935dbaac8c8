//! Clock implementations.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::infrastructure::ports::ClockPort;

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The zoo's wall clock: an injected `ClockPort` viewed through the zoo's UTC offset.
///
/// Event timestamps use `now()`. Anything that asks "is it today" or "what
/// time of day is it" uses `local_now()`.
#[derive(Clone)]
pub struct ZooClock {
    clock: Arc<dyn ClockPort>,
    offset: FixedOffset,
}

impl ZooClock {
    pub fn new(clock: Arc<dyn ClockPort>, offset: FixedOffset) -> Self {
        Self { clock, offset }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn local_now(&self) -> DateTime<FixedOffset> {
        self.clock.now().with_timezone(&self.offset)
    }

    pub fn today(&self) -> NaiveDate {
        self.local_now().date_naive()
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
