//! In-memory cache store backed by moka.
//!
//! Each region is its own moka cache sharing the same capacity and TTL
//! settings, so clearing a region never touches the others.

use async_trait::async_trait;
use moka::future::Cache;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::errors::DomainResult;
use crate::domain::models::CacheConfig;
use crate::domain::ports::CacheStore;

/// Default maximum entries per region.
const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// In-process cache store with one moka cache per region.
pub struct MokaCacheStore {
    regions: RwLock<HashMap<String, Cache<String, String>>>,
    max_capacity: u64,
    time_to_live: Option<Duration>,
}

impl Default for MokaCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheStore {
    /// Create a store with default capacity and no expiry.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_MAX_CAPACITY, None)
    }

    pub fn with_config(max_capacity: u64, time_to_live: Option<Duration>) -> Self {
        Self {
            regions: RwLock::new(HashMap::new()),
            max_capacity,
            time_to_live,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        let ttl = (config.ttl_secs > 0).then(|| Duration::from_secs(config.ttl_secs));
        Self::with_config(config.max_capacity, ttl)
    }

    fn build_region(&self) -> Cache<String, String> {
        let builder = Cache::builder().max_capacity(self.max_capacity);
        match self.time_to_live {
            Some(ttl) => builder.time_to_live(ttl).build(),
            None => builder.build(),
        }
    }

    async fn region(&self, name: &str) -> Option<Cache<String, String>> {
        self.regions.read().await.get(name).cloned()
    }

    async fn region_or_create(&self, name: &str) -> Cache<String, String> {
        if let Some(cache) = self.region(name).await {
            return cache;
        }
        let mut regions = self.regions.write().await;
        regions
            .entry(name.to_string())
            .or_insert_with(|| self.build_region())
            .clone()
    }

    /// Approximate number of live entries in a region.
    pub async fn entry_count(&self, region: &str) -> u64 {
        match self.region(region).await {
            Some(cache) => {
                cache.run_pending_tasks().await;
                cache.entry_count()
            }
            None => 0,
        }
    }
}

#[async_trait]
impl CacheStore for MokaCacheStore {
    async fn get(&self, region: &str, key: &str) -> DomainResult<Option<String>> {
        match self.region(region).await {
            Some(cache) => Ok(cache.get(key).await),
            None => Ok(None),
        }
    }

    async fn put(&self, region: &str, key: &str, value: String) -> DomainResult<()> {
        self.region_or_create(region).await.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn clear_region(&self, region: &str) -> DomainResult<()> {
        if let Some(cache) = self.region(region).await {
            cache.invalidate_all();
            cache.run_pending_tasks().await;
        }
        Ok(())
    }

    async fn list_regions(&self) -> DomainResult<Vec<String>> {
        let mut names: Vec<String> = self.regions.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
