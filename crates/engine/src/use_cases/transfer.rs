//! Animal transfer use case.
//!
//! A transfer touches up to three aggregates (the animal, its current
//! enclosure, the target enclosure) through separate repository writes. The
//! writes are ordered so that an interrupted transfer leaves the animal out of
//! both enclosures rather than counted in two:
//!
//! 1. the current enclosure is saved without the animal
//! 2. the target enclosure is saved with the animal
//! 3. the animal is saved with its new enclosure reference
//!
//! If the process stops between 1 and 2, the stored animal still names its old
//! enclosure while that enclosure no longer lists it. Rerunning the transfer
//! repairs this: a reference to an enclosure that is gone or does not list the
//! animal is dropped before the animal enters the target.

use std::sync::Arc;

use zoo_domain::{AnimalId, DomainError, DomainEvents, EnclosureId, RemovalOutcome};

use crate::infrastructure::clock::ZooClock;
use crate::infrastructure::ports::{AnimalRepo, EnclosureRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Moves animals between enclosures and takes them out of enclosures.
///
/// Rule rejections (unknown ids, full enclosure, incompatible species) are
/// reported as `Ok(false)`. `Err` means storage failed or an event handler
/// rejected an `AnimalMoved` event.
pub struct AnimalTransferService {
    animals: Arc<dyn AnimalRepo>,
    enclosures: Arc<dyn EnclosureRepo>,
    events: Arc<DomainEvents>,
    clock: ZooClock,
}

impl AnimalTransferService {
    pub fn new(
        animals: Arc<dyn AnimalRepo>,
        enclosures: Arc<dyn EnclosureRepo>,
        events: Arc<DomainEvents>,
        clock: ZooClock,
    ) -> Self {
        Self {
            animals,
            enclosures,
            events,
            clock,
        }
    }

    /// Move an animal into `target_enclosure_id`, taking it out of its current
    /// enclosure first.
    ///
    /// Returns `true` when the animal ends up in the target, including when it
    /// was already there.
    pub async fn transfer_animal(
        &self,
        animal_id: AnimalId,
        target_enclosure_id: EnclosureId,
    ) -> Result<bool, TransferError> {
        let Some(mut animal) = self.animals.get(animal_id).await? else {
            tracing::debug!(%animal_id, "Transfer rejected: animal not found");
            return Ok(false);
        };
        let Some(mut target) = self.enclosures.get(target_enclosure_id).await? else {
            tracing::debug!(%target_enclosure_id, "Transfer rejected: enclosure not found");
            return Ok(false);
        };

        if animal.enclosure_id() == Some(target_enclosure_id) && target.contains(animal_id) {
            return Ok(true);
        }

        if !target.can_accept(&animal) {
            tracing::debug!(
                %animal_id,
                %target_enclosure_id,
                species = %animal.species(),
                occupancy = target.occupancy(),
                max_capacity = target.max_capacity(),
                "Transfer rejected: target enclosure cannot accept animal"
            );
            return Ok(false);
        }

        let now = self.clock.now();

        if let Some(current_id) = animal.enclosure_id() {
            match self.enclosures.get(current_id).await? {
                Some(mut current) => match current.remove_animal(&mut animal, &self.events, now)? {
                    RemovalOutcome::Removed => self.enclosures.update(&current).await?,
                    RemovalOutcome::NotPresent => {
                        tracing::warn!(
                            %animal_id,
                            enclosure_id = %current_id,
                            "Enclosure does not list the animal that references it, moving it anyway"
                        );
                        animal.detach_from_stale_enclosure(Some(&current), &self.events, now)?;
                    }
                },
                None => {
                    tracing::warn!(
                        %animal_id,
                        enclosure_id = %current_id,
                        "Animal references a missing enclosure, moving it anyway"
                    );
                    animal.detach_from_stale_enclosure(None, &self.events, now)?;
                }
            }
        }

        let outcome = target.add_animal(&mut animal, &self.events, now)?;
        if !outcome.is_admitted() {
            tracing::warn!(
                %animal_id,
                %target_enclosure_id,
                ?outcome,
                "Target enclosure refused animal after it left its enclosure"
            );
            return Ok(false);
        }

        self.enclosures.update(&target).await?;
        self.animals.update(&animal).await?;

        tracing::info!(%animal_id, %target_enclosure_id, "Animal transferred");
        Ok(true)
    }

    /// Take an animal out of its enclosure without placing it anywhere else.
    ///
    /// Returns `false` when the animal is unknown, not in an enclosure, or its
    /// enclosure cannot be found or does not list it.
    pub async fn remove_from_enclosure(&self, animal_id: AnimalId) -> Result<bool, TransferError> {
        let Some(mut animal) = self.animals.get(animal_id).await? else {
            return Ok(false);
        };
        let Some(enclosure_id) = animal.enclosure_id() else {
            return Ok(false);
        };
        let Some(mut enclosure) = self.enclosures.get(enclosure_id).await? else {
            tracing::warn!(%animal_id, %enclosure_id, "Animal references a missing enclosure");
            return Ok(false);
        };

        let now = self.clock.now();
        match enclosure.remove_animal(&mut animal, &self.events, now)? {
            RemovalOutcome::Removed => {}
            RemovalOutcome::NotPresent => {
                tracing::warn!(
                    %animal_id,
                    %enclosure_id,
                    "Enclosure does not list the animal that references it"
                );
                return Ok(false);
            }
        }

        self.enclosures.update(&enclosure).await?;
        self.animals.update(&animal).await?;

        tracing::info!(%animal_id, %enclosure_id, "Animal removed from enclosure");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockAnimalRepo, MockEnclosureRepo};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
    use mockall::predicate::*;
    use zoo_domain::{
        Animal, AnimalMoved, AnimalName, Enclosure, EnclosureType, FnHandler, FoodType, Gender,
        HandlerError, RecordingHandler, Species,
    };

    fn clock() -> ZooClock {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        ZooClock::new(Arc::new(FixedClock(now)), FixedOffset::east_opt(0).unwrap())
    }

    fn animal(species: &str, name: &str) -> Animal {
        Animal::new(
            Species::new(species).unwrap(),
            AnimalName::new(name).unwrap(),
            NaiveDate::from_ymd_opt(2019, 4, 2).unwrap(),
            Gender::Male,
            FoodType::new("Meat").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
        .unwrap()
    }

    /// Place `animal` in `enclosure` without going through a repository.
    fn seat(enclosure: &mut Enclosure, animal: &mut Animal) {
        let outcome = enclosure
            .add_animal(animal, &DomainEvents::new(), Utc::now())
            .unwrap();
        assert!(outcome.is_admitted());
    }

    fn service(
        animals: MockAnimalRepo,
        enclosures: MockEnclosureRepo,
        events: Arc<DomainEvents>,
    ) -> AnimalTransferService {
        AnimalTransferService::new(Arc::new(animals), Arc::new(enclosures), events, clock())
    }

    mod transfer_animal {
        use super::*;

        #[tokio::test]
        async fn moves_animal_between_enclosures() {
            let mut simba = animal("Lion", "Simba");
            let mut old = Enclosure::new(EnclosureType::predator(), 300, 2).unwrap();
            seat(&mut old, &mut simba);
            let new = Enclosure::new(EnclosureType::predator(), 500, 2).unwrap();
            let (simba_id, old_id, new_id) = (simba.id(), old.id(), new.id());

            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();

            let stored = simba.clone();
            animal_repo
                .expect_get()
                .with(eq(simba_id))
                .returning(move |_| Ok(Some(stored.clone())));
            let stored_new = new.clone();
            enclosure_repo
                .expect_get()
                .with(eq(new_id))
                .returning(move |_| Ok(Some(stored_new.clone())));
            let stored_old = old.clone();
            enclosure_repo
                .expect_get()
                .with(eq(old_id))
                .returning(move |_| Ok(Some(stored_old.clone())));

            enclosure_repo
                .expect_update()
                .withf(move |e| e.id() == old_id && e.is_empty())
                .times(1)
                .returning(|_| Ok(()));
            enclosure_repo
                .expect_update()
                .withf(move |e| e.id() == new_id && e.contains(simba_id))
                .times(1)
                .returning(|_| Ok(()));
            animal_repo
                .expect_update()
                .withf(move |a| a.enclosure_id() == Some(new_id))
                .times(1)
                .returning(|_| Ok(()));

            let events = Arc::new(DomainEvents::new());
            let recorder = Arc::new(RecordingHandler::<AnimalMoved>::new());
            events.register::<AnimalMoved>(recorder.clone());

            let result = service(animal_repo, enclosure_repo, events)
                .transfer_animal(simba_id, new_id)
                .await;

            assert!(result.unwrap());
            let moves = recorder.events();
            assert_eq!(moves.len(), 2);
            assert_eq!(moves[0].old_enclosure_id, Some(old_id));
            assert_eq!(moves[0].new_enclosure_id, None);
            assert_eq!(moves[1].old_enclosure_id, None);
            assert_eq!(moves[1].new_enclosure_id, Some(new_id));
            assert_eq!(moves[1].occurred_on, clock().now());
        }

        #[tokio::test]
        async fn unknown_animal_returns_false_without_writes() {
            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();

            animal_repo.expect_get().returning(|_| Ok(None));
            animal_repo.expect_update().never();
            enclosure_repo.expect_update().never();

            let result = service(animal_repo, enclosure_repo, Arc::new(DomainEvents::new()))
                .transfer_animal(AnimalId::new(), EnclosureId::new())
                .await;

            assert!(!result.unwrap());
        }

        #[tokio::test]
        async fn unknown_target_returns_false_without_writes() {
            let zebra = animal("Zebra", "Marty");
            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();

            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(zebra.clone())));
            enclosure_repo.expect_get().returning(|_| Ok(None));
            animal_repo.expect_update().never();
            enclosure_repo.expect_update().never();

            let result = service(animal_repo, enclosure_repo, Arc::new(DomainEvents::new()))
                .transfer_animal(AnimalId::new(), EnclosureId::new())
                .await;

            assert!(!result.unwrap());
        }

        #[tokio::test]
        async fn full_target_returns_false_without_writes() {
            let mut resident = animal("Lion", "Nala");
            let mut full = Enclosure::new(EnclosureType::predator(), 100, 1).unwrap();
            seat(&mut full, &mut resident);
            let rajah = animal("Tiger", "Rajah");

            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();
            let stored = rajah.clone();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(stored.clone())));
            enclosure_repo
                .expect_get()
                .returning(move |_| Ok(Some(full.clone())));
            animal_repo.expect_update().never();
            enclosure_repo.expect_update().never();

            let events = Arc::new(DomainEvents::new());
            let recorder = Arc::new(RecordingHandler::<AnimalMoved>::new());
            events.register::<AnimalMoved>(recorder.clone());

            let result = service(animal_repo, enclosure_repo, events)
                .transfer_animal(rajah.id(), EnclosureId::new())
                .await;

            assert!(!result.unwrap());
            assert!(recorder.is_empty());
        }

        #[tokio::test]
        async fn incompatible_species_leaves_current_enclosure_alone() {
            let mut wolf = animal("Wolf", "Akela");
            let mut den = Enclosure::new(EnclosureType::predator(), 100, 3).unwrap();
            seat(&mut den, &mut wolf);
            let meadow = Enclosure::new(EnclosureType::herbivore(), 800, 10).unwrap();
            let meadow_id = meadow.id();

            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();
            let stored = wolf.clone();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(stored.clone())));
            enclosure_repo
                .expect_get()
                .with(eq(meadow_id))
                .returning(move |_| Ok(Some(meadow.clone())));
            animal_repo.expect_update().never();
            enclosure_repo.expect_update().never();

            let result = service(animal_repo, enclosure_repo, Arc::new(DomainEvents::new()))
                .transfer_animal(wolf.id(), meadow_id)
                .await;

            assert!(!result.unwrap());
        }

        #[tokio::test]
        async fn transfer_into_current_enclosure_is_a_no_op() {
            let mut simba = animal("Lion", "Simba");
            let mut den = Enclosure::new(EnclosureType::predator(), 100, 1).unwrap();
            seat(&mut den, &mut simba);
            let den_id = den.id();

            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();
            let stored = simba.clone();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(stored.clone())));
            enclosure_repo
                .expect_get()
                .returning(move |_| Ok(Some(den.clone())));
            animal_repo.expect_update().never();
            enclosure_repo.expect_update().never();

            let result = service(animal_repo, enclosure_repo, Arc::new(DomainEvents::new()))
                .transfer_animal(simba.id(), den_id)
                .await;

            assert!(result.unwrap());
        }

        #[tokio::test]
        async fn animal_without_enclosure_is_placed_directly() {
            let zebra = animal("Zebra", "Marty");
            let meadow = Enclosure::new(EnclosureType::herbivore(), 800, 10).unwrap();
            let meadow_id = meadow.id();

            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();
            let stored = zebra.clone();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(stored.clone())));
            enclosure_repo
                .expect_get()
                .with(eq(meadow_id))
                .times(1)
                .returning(move |_| Ok(Some(meadow.clone())));
            enclosure_repo
                .expect_update()
                .times(1)
                .returning(|_| Ok(()));
            animal_repo
                .expect_update()
                .times(1)
                .returning(|_| Ok(()));

            let result = service(animal_repo, enclosure_repo, Arc::new(DomainEvents::new()))
                .transfer_animal(zebra.id(), meadow_id)
                .await;

            assert!(result.unwrap());
        }

        #[tokio::test]
        async fn stale_reference_is_dropped_and_old_enclosure_left_alone() {
            let mut simba = animal("Lion", "Simba");
            let mut old = Enclosure::new(EnclosureType::predator(), 300, 2).unwrap();
            // The old enclosure was saved without the animal, the animal was not.
            let forgetful = old.clone();
            seat(&mut old, &mut simba);
            let (simba_id, old_id) = (simba.id(), old.id());
            let new = Enclosure::new(EnclosureType::predator(), 500, 2).unwrap();
            let new_id = new.id();

            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(simba.clone())));
            enclosure_repo
                .expect_get()
                .with(eq(new_id))
                .returning(move |_| Ok(Some(new.clone())));
            enclosure_repo
                .expect_get()
                .with(eq(old_id))
                .returning(move |_| Ok(Some(forgetful.clone())));
            enclosure_repo
                .expect_update()
                .withf(move |e| e.id() == new_id && e.contains(simba_id))
                .times(1)
                .returning(|_| Ok(()));
            animal_repo
                .expect_update()
                .withf(move |a| a.enclosure_id() == Some(new_id))
                .times(1)
                .returning(|_| Ok(()));

            let events = Arc::new(DomainEvents::new());
            let recorder = Arc::new(RecordingHandler::<AnimalMoved>::new());
            events.register::<AnimalMoved>(recorder.clone());

            let result = service(animal_repo, enclosure_repo, events)
                .transfer_animal(simba_id, new_id)
                .await;

            assert!(result.unwrap());
            let moves = recorder.events();
            assert_eq!(moves.len(), 2);
            assert_eq!(moves[0].old_enclosure_id, Some(old_id));
            assert_eq!(moves[0].new_enclosure_id, None);
            assert_eq!(moves[1].new_enclosure_id, Some(new_id));
        }

        #[tokio::test]
        async fn reference_to_missing_enclosure_is_dropped_before_admission() {
            let mut simba = animal("Lion", "Simba");
            let mut lost = Enclosure::new(EnclosureType::predator(), 300, 2).unwrap();
            seat(&mut lost, &mut simba);
            let (simba_id, lost_id) = (simba.id(), lost.id());
            let new = Enclosure::new(EnclosureType::predator(), 500, 2).unwrap();
            let new_id = new.id();

            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(simba.clone())));
            enclosure_repo
                .expect_get()
                .with(eq(new_id))
                .returning(move |_| Ok(Some(new.clone())));
            enclosure_repo
                .expect_get()
                .with(eq(lost_id))
                .returning(|_| Ok(None));
            enclosure_repo
                .expect_update()
                .withf(move |e| e.id() == new_id && e.contains(simba_id))
                .times(1)
                .returning(|_| Ok(()));
            animal_repo
                .expect_update()
                .withf(move |a| a.enclosure_id() == Some(new_id))
                .times(1)
                .returning(|_| Ok(()));

            let result = service(animal_repo, enclosure_repo, Arc::new(DomainEvents::new()))
                .transfer_animal(simba_id, new_id)
                .await;

            assert!(result.unwrap());
        }

        #[tokio::test]
        async fn repository_failure_propagates() {
            let mut animal_repo = MockAnimalRepo::new();
            let enclosure_repo = MockEnclosureRepo::new();
            animal_repo
                .expect_get()
                .returning(|_| Err(RepoError::storage("get", "connection lost")));

            let result = service(animal_repo, enclosure_repo, Arc::new(DomainEvents::new()))
                .transfer_animal(AnimalId::new(), EnclosureId::new())
                .await;

            assert!(matches!(result, Err(TransferError::Repo(_))));
        }

        #[tokio::test]
        async fn handler_failure_propagates_as_domain_error() {
            let zebra = animal("Zebra", "Marty");
            let meadow = Enclosure::new(EnclosureType::herbivore(), 800, 10).unwrap();

            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();
            let stored = zebra.clone();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(stored.clone())));
            enclosure_repo
                .expect_get()
                .returning(move |_| Ok(Some(meadow.clone())));
            animal_repo.expect_update().never();
            enclosure_repo.expect_update().never();

            let events = Arc::new(DomainEvents::new());
            events.register::<AnimalMoved>(Arc::new(FnHandler::new(|_: &AnimalMoved| {
                Err(HandlerError::new("audit log offline"))
            })));

            let result = service(animal_repo, enclosure_repo, events)
                .transfer_animal(zebra.id(), EnclosureId::new())
                .await;

            assert!(matches!(
                result,
                Err(TransferError::Domain(DomainError::EventHandler(_)))
            ));
        }
    }

    mod remove_from_enclosure {
        use super::*;

        #[tokio::test]
        async fn clears_both_sides() {
            let mut simba = animal("Lion", "Simba");
            let mut den = Enclosure::new(EnclosureType::predator(), 100, 2).unwrap();
            seat(&mut den, &mut simba);
            let (simba_id, den_id) = (simba.id(), den.id());

            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(simba.clone())));
            enclosure_repo
                .expect_get()
                .with(eq(den_id))
                .returning(move |_| Ok(Some(den.clone())));
            enclosure_repo
                .expect_update()
                .withf(move |e| !e.contains(simba_id))
                .times(1)
                .returning(|_| Ok(()));
            animal_repo
                .expect_update()
                .withf(|a| a.enclosure_id().is_none())
                .times(1)
                .returning(|_| Ok(()));

            let events = Arc::new(DomainEvents::new());
            let recorder = Arc::new(RecordingHandler::<AnimalMoved>::new());
            events.register::<AnimalMoved>(recorder.clone());

            let result = service(animal_repo, enclosure_repo, events)
                .remove_from_enclosure(simba_id)
                .await;

            assert!(result.unwrap());
            let moves = recorder.events();
            assert_eq!(moves.len(), 1);
            assert_eq!(moves[0].old_enclosure_id, Some(den_id));
            assert_eq!(moves[0].new_enclosure_id, None);
        }

        #[tokio::test]
        async fn animal_without_enclosure_returns_false() {
            let zebra = animal("Zebra", "Marty");
            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();
            let stored = zebra.clone();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(stored.clone())));
            enclosure_repo.expect_get().never();
            animal_repo.expect_update().never();

            let result = service(animal_repo, enclosure_repo, Arc::new(DomainEvents::new()))
                .remove_from_enclosure(zebra.id())
                .await;

            assert!(!result.unwrap());
        }

        #[tokio::test]
        async fn unknown_animal_returns_false() {
            let mut animal_repo = MockAnimalRepo::new();
            animal_repo.expect_get().returning(|_| Ok(None));

            let result = service(
                animal_repo,
                MockEnclosureRepo::new(),
                Arc::new(DomainEvents::new()),
            )
            .remove_from_enclosure(AnimalId::new())
            .await;

            assert!(!result.unwrap());
        }

        #[tokio::test]
        async fn missing_enclosure_returns_false() {
            let mut simba = animal("Lion", "Simba");
            let mut den = Enclosure::new(EnclosureType::predator(), 100, 2).unwrap();
            seat(&mut den, &mut simba);

            let mut animal_repo = MockAnimalRepo::new();
            let mut enclosure_repo = MockEnclosureRepo::new();
            let stored = simba.clone();
            animal_repo
                .expect_get()
                .returning(move |_| Ok(Some(stored.clone())));
            enclosure_repo.expect_get().returning(|_| Ok(None));
            animal_repo.expect_update().never();
            enclosure_repo.expect_update().never();

            let result = service(animal_repo, enclosure_repo, Arc::new(DomainEvents::new()))
                .remove_from_enclosure(simba.id())
                .await;

            assert!(!result.unwrap());
        }
    }
}
