//! Cache administration.

use std::sync::Arc;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::ports::CacheStore;

/// Clears every region of the cache store.
pub struct CacheAdminService {
    cache: Arc<dyn CacheStore>,
}

impl CacheAdminService {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    /// Evict every entry in every known region and return the region names.
    ///
    /// Measurement history is untouched. Clearing an empty cache succeeds.
    pub async fn clear_all(&self) -> DomainResult<Vec<String>> {
        let regions = self.cache.list_regions().await?;
        for region in &regions {
            self.cache.clear_region(region).await?;
            info!(backend = self.cache.backend_name(), "Cache '{}' cleared", region);
        }
        Ok(regions)
    }
}
