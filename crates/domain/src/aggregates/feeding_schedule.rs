//! FeedingSchedule aggregate - one planned feeding of one animal

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};

use crate::error::DomainError;
use crate::events::{DomainEvents, FeedingTime};
use crate::value_objects::FoodType;
use crate::{AnimalId, FeedingScheduleId};

/// How close to the current time of day a feeding must be to count as "now".
pub const FEEDING_TIME_WINDOW_MINUTES: i64 = 5;

/// A planned feeding
///
/// `now` arguments are the zoo's local wall-clock time; the offset decides
/// which calendar day counts as today.
///
/// # Invariants
///
/// - Changing food or time never resets completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedingSchedule {
    id: FeedingScheduleId,
    animal_id: AnimalId,
    food_type: FoodType,
    feeding_time: NaiveTime,
    schedule_date: NaiveDate,
    is_completed: bool,
}

impl FeedingSchedule {
    pub fn new(
        animal_id: AnimalId,
        food_type: FoodType,
        feeding_time: NaiveTime,
        schedule_date: NaiveDate,
    ) -> Self {
        Self {
            id: FeedingScheduleId::new(),
            animal_id,
            food_type,
            feeding_time,
            schedule_date,
            is_completed: false,
        }
    }

    /// Set the schedule's ID (used when loading from storage).
    pub fn with_id(mut self, id: FeedingScheduleId) -> Self {
        self.id = id;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> FeedingScheduleId {
        self.id
    }

    #[inline]
    pub fn animal_id(&self) -> AnimalId {
        self.animal_id
    }

    #[inline]
    pub fn food_type(&self) -> &FoodType {
        &self.food_type
    }

    #[inline]
    pub fn feeding_time(&self) -> NaiveTime {
        self.feeding_time
    }

    #[inline]
    pub fn schedule_date(&self) -> NaiveDate {
        self.schedule_date
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    // =========================================================================
    // Feeding-time check
    // =========================================================================

    /// True when the schedule is for today and its time is less than
    /// `FEEDING_TIME_WINDOW_MINUTES` away from `now`, in either direction.
    pub fn is_due(&self, now: DateTime<FixedOffset>) -> bool {
        if self.schedule_date != now.date_naive() {
            return false;
        }
        let window = Duration::minutes(FEEDING_TIME_WINDOW_MINUTES);
        let diff = now.time() - self.feeding_time;
        diff < window && diff > -window
    }

    /// Raise `FeedingTime` if the schedule is due. Returns whether it was raised.
    pub fn announce_if_due(
        &self,
        now: DateTime<FixedOffset>,
        events: &DomainEvents,
    ) -> Result<bool, DomainError> {
        if !self.is_due(now) {
            return Ok(false);
        }
        events.raise(&FeedingTime {
            animal_id: self.animal_id,
            food_type: self.food_type.clone(),
            occurred_on: now.with_timezone(&Utc),
        })?;
        Ok(true)
    }

    // =========================================================================
    // Mutation Methods
    // =========================================================================

    pub fn change_food_type(&mut self, food_type: FoodType) {
        self.food_type = food_type;
    }

    /// Move the feeding to `feeding_time`, announcing it if that is due now.
    ///
    /// Returns whether `FeedingTime` was raised.
    pub fn change_time(
        &mut self,
        feeding_time: NaiveTime,
        now: DateTime<FixedOffset>,
        events: &DomainEvents,
    ) -> Result<bool, DomainError> {
        self.feeding_time = feeding_time;
        self.announce_if_due(now, events)
    }

    pub fn mark_as_completed(&mut self) {
        self.is_completed = true;
    }

    pub fn reset_completion(&mut self) {
        self.is_completed = false;
    }
}

// ============================================================================
// Tests
// ============================================================================
