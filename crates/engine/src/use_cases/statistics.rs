//! Zoo-wide counts computed from the repositories.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use zoo_domain::{Animal, Enclosure};

use crate::infrastructure::ports::{AnimalRepo, EnclosureRepo, RepoError};

/// A point-in-time summary of the zoo.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZooStatistics {
    pub total_animals: usize,
    pub healthy_animals: usize,
    pub sick_animals: usize,
    pub species_counts: BTreeMap<String, usize>,
    pub total_enclosures: usize,
    pub available_enclosures: usize,
    pub enclosure_type_counts: BTreeMap<String, usize>,
    pub average_enclosure_occupancy: f64,
}

pub struct ZooStatisticsService {
    animals: Arc<dyn AnimalRepo>,
    enclosures: Arc<dyn EnclosureRepo>,
}

impl ZooStatisticsService {
    pub fn new(animals: Arc<dyn AnimalRepo>, enclosures: Arc<dyn EnclosureRepo>) -> Self {
        Self {
            animals,
            enclosures,
        }
    }

    /// Animal count per species, keyed by the species as spelled.
    pub async fn species_counts(&self) -> Result<BTreeMap<String, usize>, RepoError> {
        Ok(count_species(&self.animals.list().await?))
    }

    pub async fn total_animals(&self) -> Result<usize, RepoError> {
        Ok(self.animals.list().await?.len())
    }

    pub async fn healthy_animals(&self) -> Result<usize, RepoError> {
        Ok(count_healthy(&self.animals.list().await?))
    }

    pub async fn sick_animals(&self) -> Result<usize, RepoError> {
        let animals = self.animals.list().await?;
        Ok(animals.len() - count_healthy(&animals))
    }

    pub async fn total_enclosures(&self) -> Result<usize, RepoError> {
        Ok(self.enclosures.list().await?.len())
    }

    pub async fn available_enclosures(&self) -> Result<usize, RepoError> {
        Ok(self.enclosures.list_available().await?.len())
    }

    /// Enclosure count per type, keyed by the type as spelled.
    pub async fn enclosure_type_counts(&self) -> Result<BTreeMap<String, usize>, RepoError> {
        Ok(count_enclosure_types(&self.enclosures.list().await?))
    }

    /// Mean number of animals per enclosure, `0.0` with no enclosures.
    pub async fn average_enclosure_occupancy(&self) -> Result<f64, RepoError> {
        Ok(average_occupancy(&self.enclosures.list().await?))
    }

    /// All figures at once, read from a single listing of each repository.
    pub async fn snapshot(&self) -> Result<ZooStatistics, RepoError> {
        let animals = self.animals.list().await?;
        let enclosures = self.enclosures.list().await?;
        let healthy_animals = count_healthy(&animals);

        Ok(ZooStatistics {
            total_animals: animals.len(),
            healthy_animals,
            sick_animals: animals.len() - healthy_animals,
            species_counts: count_species(&animals),
            total_enclosures: enclosures.len(),
            available_enclosures: enclosures.iter().filter(|e| e.can_add_animal()).count(),
            enclosure_type_counts: count_enclosure_types(&enclosures),
            average_enclosure_occupancy: average_occupancy(&enclosures),
        })
    }
}

fn count_species(animals: &[Animal]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for animal in animals {
        *counts.entry(animal.species().to_string()).or_insert(0) += 1;
    }
    counts
}

fn count_healthy(animals: &[Animal]) -> usize {
    animals.iter().filter(|a| a.is_healthy()).count()
}

fn count_enclosure_types(enclosures: &[Enclosure]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for enclosure in enclosures {
        *counts
            .entry(enclosure.enclosure_type().to_string())
            .or_insert(0) += 1;
    }
    counts
}

fn average_occupancy(enclosures: &[Enclosure]) -> f64 {
    if enclosures.is_empty() {
        return 0.0;
    }
    let total: u32 = enclosures.iter().map(|e| e.occupancy()).sum();
    f64::from(total) / enclosures.len() as f64
}
