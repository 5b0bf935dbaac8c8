use std::sync::Arc;

use chrono::NaiveDate;
use zoo_domain::{AnimalId, DomainEvents, FeedingScheduleId, FoodType};

use super::dto::{FeedingScheduleDto, NewFeedingSchedule, ScheduleUpdate};
use super::ManagementError;
use crate::infrastructure::clock::ZooClock;
use crate::infrastructure::ports::FeedingScheduleRepo;
use crate::use_cases::feeding::FeedingOrganizationService;

pub struct FeedingScheduleCrud {
    schedules: Arc<dyn FeedingScheduleRepo>,
    feeding: Arc<FeedingOrganizationService>,
    events: Arc<DomainEvents>,
    clock: ZooClock,
}

impl FeedingScheduleCrud {
    pub fn new(
        schedules: Arc<dyn FeedingScheduleRepo>,
        feeding: Arc<FeedingOrganizationService>,
        events: Arc<DomainEvents>,
        clock: ZooClock,
    ) -> Self {
        Self {
            schedules,
            feeding,
            events,
            clock,
        }
    }

    pub async fn list(&self) -> Result<Vec<FeedingScheduleDto>, ManagementError> {
        let schedules = self.schedules.list().await?;
        Ok(schedules.iter().map(FeedingScheduleDto::from).collect())
    }

    pub async fn get(
        &self,
        id: FeedingScheduleId,
    ) -> Result<Option<FeedingScheduleDto>, ManagementError> {
        Ok(self
            .schedules
            .get(id)
            .await?
            .as_ref()
            .map(FeedingScheduleDto::from))
    }

    pub async fn list_for_animal(
        &self,
        animal_id: AnimalId,
    ) -> Result<Vec<FeedingScheduleDto>, ManagementError> {
        let schedules = self.feeding.get_animal_feeding_schedules(animal_id).await?;
        Ok(schedules.iter().map(FeedingScheduleDto::from).collect())
    }

    pub async fn list_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<FeedingScheduleDto>, ManagementError> {
        let schedules = self.schedules.list_for_date(date).await?;
        Ok(schedules.iter().map(FeedingScheduleDto::from).collect())
    }

    pub async fn list_for_today(&self) -> Result<Vec<FeedingScheduleDto>, ManagementError> {
        let schedules = self.feeding.get_today_feeding_schedules().await?;
        Ok(schedules.iter().map(FeedingScheduleDto::from).collect())
    }

    pub async fn create(
        &self,
        input: NewFeedingSchedule,
    ) -> Result<FeedingScheduleId, ManagementError> {
        Ok(self
            .feeding
            .schedule_feeding(
                input.animal_id,
                &input.food_type,
                input.feeding_time,
                input.schedule_date,
            )
            .await?)
    }

    /// Apply food, time and completion changes.
    ///
    /// A time change that lands inside the feeding window raises `FeedingTime`.
    pub async fn update(&self, input: ScheduleUpdate) -> Result<(), ManagementError> {
        let mut schedule = self
            .schedules
            .get(input.id)
            .await?
            .ok_or_else(|| ManagementError::not_found("FeedingSchedule", input.id))?;

        if schedule.food_type().as_str() != input.food_type {
            schedule.change_food_type(FoodType::new(input.food_type)?);
        }
        if schedule.feeding_time() != input.feeding_time {
            schedule.change_time(input.feeding_time, self.clock.local_now(), &self.events)?;
        }
        if input.is_completed {
            schedule.mark_as_completed();
        } else {
            schedule.reset_completion();
        }

        self.schedules.update(&schedule).await?;
        Ok(())
    }

    pub async fn delete(&self, id: FeedingScheduleId) -> Result<(), ManagementError> {
        self.schedules.delete(id).await?;
        Ok(())
    }

    pub async fn mark_completed(&self, id: FeedingScheduleId) -> Result<(), ManagementError> {
        Ok(self.feeding.mark_feeding_completed(id).await?)
    }
}
