//! Application state and composition.

use std::sync::Arc;

use zoo_domain::DomainEvents;

use crate::infrastructure::{
    clock::ZooClock,
    config::ZooConfig,
    event_log::register_event_loggers,
    memory::InMemoryRepositories,
    ports::{AnimalRepo, ClockPort, EnclosureRepo, FeedingScheduleRepo},
};
use crate::use_cases::{
    self,
    management::{AnimalCrud, EnclosureCrud, FeedingScheduleCrud},
};

/// Main application state.
///
/// Holds the repositories, the shared event dispatcher and every use case.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub events: Arc<DomainEvents>,
    pub clock: ZooClock,
    pub config: ZooConfig,
}

/// Container for all repository ports.
pub struct Repositories {
    pub animal: Arc<dyn AnimalRepo>,
    pub enclosure: Arc<dyn EnclosureRepo>,
    pub feeding_schedule: Arc<dyn FeedingScheduleRepo>,
}

impl From<InMemoryRepositories> for Repositories {
    fn from(repos: InMemoryRepositories) -> Self {
        Self {
            animal: repos.animal,
            enclosure: repos.enclosure,
            feeding_schedule: repos.feeding_schedule,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub transfer: Arc<use_cases::AnimalTransferService>,
    pub feeding: Arc<use_cases::FeedingOrganizationService>,
    pub management: use_cases::ManagementUseCases,
    pub statistics: use_cases::ZooStatisticsService,
}

impl App {
    /// Create a new App with all dependencies wired up.
    ///
    /// The tracing loggers are subscribed to the dispatcher before any use
    /// case can raise an event.
    pub fn new(repos: Repositories, clock: Arc<dyn ClockPort>, config: ZooConfig) -> Self {
        let clock = ZooClock::new(clock, config.utc_offset);
        let events = Arc::new(DomainEvents::new());
        register_event_loggers(&events);

        let transfer = Arc::new(use_cases::AnimalTransferService::new(
            repos.animal.clone(),
            repos.enclosure.clone(),
            events.clone(),
            clock.clone(),
        ));
        let feeding = Arc::new(use_cases::FeedingOrganizationService::new(
            repos.animal.clone(),
            repos.feeding_schedule.clone(),
            events.clone(),
            clock.clone(),
        ));

        let management = use_cases::ManagementUseCases::new(
            AnimalCrud::new(repos.animal.clone(), transfer.clone(), clock.clone()),
            EnclosureCrud::new(repos.enclosure.clone(), repos.animal.clone()),
            FeedingScheduleCrud::new(
                repos.feeding_schedule.clone(),
                feeding.clone(),
                events.clone(),
                clock.clone(),
            ),
        );
        let statistics =
            use_cases::ZooStatisticsService::new(repos.animal.clone(), repos.enclosure.clone());

        let use_cases = UseCases {
            transfer,
            feeding,
            management,
            statistics,
        };

        Self {
            repositories: repos,
            use_cases,
            events,
            clock,
            config,
        }
    }

    /// An App over fresh in-memory repositories.
    pub fn in_memory(clock: Arc<dyn ClockPort>, config: ZooConfig) -> Self {
        Self::new(InMemoryRepositories::new().into(), clock, config)
    }
}
