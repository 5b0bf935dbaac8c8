//! Use cases - coordinate aggregates and repositories for the zoo's workflows.
//!
//! Transfers and feeding organization own the cross-aggregate rules.
//! Management wraps them with CRUD entry points; statistics only reads.

pub mod feeding;
pub mod management;
pub mod statistics;
pub mod transfer;

pub use feeding::{FeedingError, FeedingOrganizationService};
pub use management::{ManagementError, ManagementUseCases};
pub use statistics::{ZooStatistics, ZooStatisticsService};
pub use transfer::{AnimalTransferService, TransferError};
