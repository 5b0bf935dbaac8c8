//! Feeding organization use case.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use zoo_domain::{
    AnimalId, DomainError, DomainEvents, FeedingSchedule, FeedingScheduleId, FoodType,
};

use crate::infrastructure::clock::ZooClock;
use crate::infrastructure::ports::{AnimalRepo, FeedingScheduleRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum FeedingError {
    #[error("Animal not found: {0}")]
    AnimalNotFound(AnimalId),
    #[error("Feeding schedule not found: {0}")]
    ScheduleNotFound(FeedingScheduleId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Plans feedings and tracks their completion.
pub struct FeedingOrganizationService {
    animals: Arc<dyn AnimalRepo>,
    schedules: Arc<dyn FeedingScheduleRepo>,
    events: Arc<DomainEvents>,
    clock: ZooClock,
}

impl FeedingOrganizationService {
    pub fn new(
        animals: Arc<dyn AnimalRepo>,
        schedules: Arc<dyn FeedingScheduleRepo>,
        events: Arc<DomainEvents>,
        clock: ZooClock,
    ) -> Self {
        Self {
            animals,
            schedules,
            events,
            clock,
        }
    }

    /// Plan a feeding for an existing animal.
    ///
    /// The schedule is stored first. If it falls within the feeding window of
    /// the zoo's current local time, `FeedingTime` is raised afterwards.
    pub async fn schedule_feeding(
        &self,
        animal_id: AnimalId,
        food_type: &str,
        feeding_time: NaiveTime,
        schedule_date: NaiveDate,
    ) -> Result<FeedingScheduleId, FeedingError> {
        if self.animals.get(animal_id).await?.is_none() {
            return Err(FeedingError::AnimalNotFound(animal_id));
        }
        let food_type = FoodType::new(food_type)?;

        let schedule = FeedingSchedule::new(animal_id, food_type, feeding_time, schedule_date);
        self.schedules.add(&schedule).await?;

        tracing::info!(
            schedule_id = %schedule.id(),
            %animal_id,
            %feeding_time,
            %schedule_date,
            "Feeding scheduled"
        );

        schedule.announce_if_due(self.clock.local_now(), &self.events)?;
        Ok(schedule.id())
    }

    pub async fn mark_feeding_completed(
        &self,
        schedule_id: FeedingScheduleId,
    ) -> Result<(), FeedingError> {
        let mut schedule = self
            .schedules
            .get(schedule_id)
            .await?
            .ok_or(FeedingError::ScheduleNotFound(schedule_id))?;

        schedule.mark_as_completed();
        self.schedules.update(&schedule).await?;
        Ok(())
    }

    /// Schedules whose date is the zoo's current local date.
    pub async fn get_today_feeding_schedules(&self) -> Result<Vec<FeedingSchedule>, FeedingError> {
        Ok(self.schedules.list_for_date(self.clock.today()).await?)
    }

    pub async fn get_animal_feeding_schedules(
        &self,
        animal_id: AnimalId,
    ) -> Result<Vec<FeedingSchedule>, FeedingError> {
        Ok(self.schedules.list_for_animal(animal_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockAnimalRepo, MockFeedingScheduleRepo};
    use chrono::{FixedOffset, TimeZone, Utc};
    use mockall::predicate::*;
    use zoo_domain::{Animal, AnimalName, FeedingTime, Gender, RecordingHandler, Species};

    /// 2024-06-01 09:00 UTC, which is 12:00 in a UTC+3 zoo.
    fn clock() -> ZooClock {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        ZooClock::new(
            Arc::new(FixedClock(now)),
            FixedOffset::east_opt(3 * 3600).unwrap(),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn penguin() -> Animal {
        Animal::new(
            Species::new("Penguin").unwrap(),
            AnimalName::new("Pingu").unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 10).unwrap(),
            Gender::Female,
            FoodType::new("Fish").unwrap(),
            today(),
        )
        .unwrap()
    }

    fn recording_bus() -> (Arc<DomainEvents>, Arc<RecordingHandler<FeedingTime>>) {
        let events = Arc::new(DomainEvents::new());
        let recorder = Arc::new(RecordingHandler::<FeedingTime>::new());
        events.register::<FeedingTime>(recorder.clone());
        (events, recorder)
    }

    fn service(
        animals: MockAnimalRepo,
        schedules: MockFeedingScheduleRepo,
        events: Arc<DomainEvents>,
    ) -> FeedingOrganizationService {
        FeedingOrganizationService::new(Arc::new(animals), Arc::new(schedules), events, clock())
    }

    mod schedule_feeding {
        use super::*;

        #[tokio::test]
        async fn unknown_animal_is_not_found_and_nothing_is_stored() {
            let mut animal_repo = MockAnimalRepo::new();
            let mut schedule_repo = MockFeedingScheduleRepo::new();
            animal_repo.expect_get().returning(|_| Ok(None));
            schedule_repo.expect_add().never();

            let (events, recorder) = recording_bus();
            let missing = AnimalId::new();
            let result = service(animal_repo, schedule_repo, events)
                .schedule_feeding(missing, "Fish", at(12, 0), today())
                .await;

            assert!(matches!(result, Err(FeedingError::AnimalNotFound(id)) if id == missing));
            assert!(recorder.is_empty());
        }

        #[tokio::test]
        async fn feeding_near_now_is_stored_then_announced() {
            let pingu = penguin();
            let pingu_id = pingu.id();
            let mut animal_repo = MockAnimalRepo::new();
            let mut schedule_repo = MockFeedingScheduleRepo::new();
            animal_repo
                .expect_get()
                .with(eq(pingu_id))
                .returning(move |_| Ok(Some(pingu.clone())));
            schedule_repo
                .expect_add()
                .withf(move |s| {
                    s.animal_id() == pingu_id && !s.is_completed() && s.feeding_time() == at(12, 3)
                })
                .times(1)
                .returning(|_| Ok(()));

            let (events, recorder) = recording_bus();
            let id = service(animal_repo, schedule_repo, events)
                .schedule_feeding(pingu_id, "Fish", at(12, 3), today())
                .await
                .unwrap();

            assert_ne!(id, FeedingScheduleId::from_uuid(uuid::Uuid::nil()));
            let announced = recorder.events();
            assert_eq!(announced.len(), 1);
            assert_eq!(announced[0].animal_id, pingu_id);
            assert_eq!(announced[0].food_type.as_str(), "Fish");
            assert_eq!(announced[0].occurred_on, clock().now());
        }

        #[tokio::test]
        async fn feeding_later_today_is_stored_silently() {
            let pingu = penguin();
            let mut animal_repo = MockAnimalRepo::new();
            let mut schedule_repo = MockFeedingScheduleRepo::new();
            let stored = pingu.clone();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(stored.clone())));
            schedule_repo.expect_add().times(1).returning(|_| Ok(()));

            let (events, recorder) = recording_bus();
            let result = service(animal_repo, schedule_repo, events)
                .schedule_feeding(pingu.id(), "Fish", at(17, 30), today())
                .await;

            assert!(result.is_ok());
            assert!(recorder.is_empty());
        }

        #[tokio::test]
        async fn blank_food_type_is_rejected_before_storing() {
            let pingu = penguin();
            let mut animal_repo = MockAnimalRepo::new();
            let mut schedule_repo = MockFeedingScheduleRepo::new();
            let stored = pingu.clone();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(stored.clone())));
            schedule_repo.expect_add().never();

            let result = service(animal_repo, schedule_repo, Arc::new(DomainEvents::new()))
                .schedule_feeding(pingu.id(), "   ", at(12, 0), today())
                .await;

            assert!(matches!(
                result,
                Err(FeedingError::Domain(DomainError::Validation(_)))
            ));
        }
    }

    mod mark_feeding_completed {
        use super::*;

        #[tokio::test]
        async fn persists_completion() {
            let schedule =
                FeedingSchedule::new(AnimalId::new(), FoodType::new("Hay").unwrap(), at(8, 0), today());
            let schedule_id = schedule.id();
            let mut schedule_repo = MockFeedingScheduleRepo::new();
            schedule_repo
                .expect_get()
                .with(eq(schedule_id))
                .returning(move |_| Ok(Some(schedule.clone())));
            schedule_repo
                .expect_update()
                .withf(|s| s.is_completed())
                .times(1)
                .returning(|_| Ok(()));

            let result = service(
                MockAnimalRepo::new(),
                schedule_repo,
                Arc::new(DomainEvents::new()),
            )
            .mark_feeding_completed(schedule_id)
            .await;

            assert!(result.is_ok());
        }

        #[tokio::test]
        async fn unknown_schedule_is_not_found() {
            let mut schedule_repo = MockFeedingScheduleRepo::new();
            schedule_repo.expect_get().returning(|_| Ok(None));
            schedule_repo.expect_update().never();

            let result = service(
                MockAnimalRepo::new(),
                schedule_repo,
                Arc::new(DomainEvents::new()),
            )
            .mark_feeding_completed(FeedingScheduleId::new())
            .await;

            assert!(matches!(result, Err(FeedingError::ScheduleNotFound(_))));
        }
    }

    #[tokio::test]
    async fn today_is_the_zoo_local_date() {
        let mut schedule_repo = MockFeedingScheduleRepo::new();
        // 23:30 UTC on 05-31 is already 06-01 in the zoo
        let late = Utc.with_ymd_and_hms(2024, 5, 31, 23, 30, 0).unwrap();
        schedule_repo
            .expect_list_for_date()
            .with(eq(today()))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = FeedingOrganizationService::new(
            Arc::new(MockAnimalRepo::new()),
            Arc::new(schedule_repo),
            Arc::new(DomainEvents::new()),
            ZooClock::new(
                Arc::new(FixedClock(late)),
                FixedOffset::east_opt(3 * 3600).unwrap(),
            ),
        );

        assert!(service.get_today_feeding_schedules().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn animal_schedules_come_from_repository() {
        let animal_id = AnimalId::new();
        let schedule =
            FeedingSchedule::new(animal_id, FoodType::new("Fish").unwrap(), at(9, 0), today());
        let mut schedule_repo = MockFeedingScheduleRepo::new();
        schedule_repo
            .expect_list_for_animal()
            .with(eq(animal_id))
            .returning(move |_| Ok(vec![schedule.clone()]));

        let schedules = service(
            MockAnimalRepo::new(),
            schedule_repo,
            Arc::new(DomainEvents::new()),
        )
        .get_animal_feeding_schedules(animal_id)
        .await
        .unwrap();

        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].animal_id(), animal_id);
    }
}
