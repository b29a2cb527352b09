//! Sample data seeding.

use std::sync::Arc;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::{default_catalogue, NewSampleItem};
use crate::domain::ports::SampleItemRepository;

/// Loads the sample catalogue into an empty store.
pub struct SampleDataSeeder {
    items: Arc<dyn SampleItemRepository>,
    catalogue: Vec<NewSampleItem>,
}

impl SampleDataSeeder {
    /// Seeder for the built-in catalogue.
    pub fn new(items: Arc<dyn SampleItemRepository>) -> Self {
        Self::with_catalogue(items, default_catalogue())
    }

    pub fn with_catalogue(items: Arc<dyn SampleItemRepository>, catalogue: Vec<NewSampleItem>) -> Self {
        Self { items, catalogue }
    }

    /// Insert the catalogue when the store is empty. Returns how many items
    /// were inserted.
    pub async fn seed_if_empty(&self) -> DomainResult<usize> {
        let count = self.items.count().await?;
        info!(count, "current sample data count");

        if count > 0 {
            info!("sample data already exists, skipping initialization");
            return Ok(0);
        }

        for item in &self.catalogue {
            self.items.insert(item).await?;
        }
        info!(records = self.catalogue.len(), "sample data initialized");
        Ok(self.catalogue.len())
    }
}
