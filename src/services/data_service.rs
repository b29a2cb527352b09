//! Data-access facade.
//!
//! Serves sample items either straight from the backing store or through
//! the cache store. Every backing-store read pays the simulated delay; a
//! cache hit returns without touching the store.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{CacheMode, DataQuery, Fetched, QueryResult, SampleItem};
use crate::domain::ports::{CacheStore, SampleItemRepository};
use crate::services::latency::DelaySimulator;

/// Sample-item reads, optionally through the cache store.
pub struct DataService {
    items: Arc<dyn SampleItemRepository>,
    cache: Arc<dyn CacheStore>,
    delay: DelaySimulator,
}

impl DataService {
    pub fn new(
        items: Arc<dyn SampleItemRepository>,
        cache: Arc<dyn CacheStore>,
        delay: DelaySimulator,
    ) -> Self {
        Self { items, cache, delay }
    }

    /// Run any query, returning the untyped result.
    pub async fn fetch(&self, query: &DataQuery, mode: CacheMode) -> DomainResult<Fetched<QueryResult>> {
        match query {
            DataQuery::All => Ok(self.find_all(mode).await?.map(QueryResult::Items)),
            DataQuery::ByCategory(category) => Ok(self
                .find_by_category(category, mode)
                .await?
                .map(QueryResult::Items)),
            DataQuery::ById(id) => Ok(self.find_by_id(*id, mode).await?.map(QueryResult::Item)),
        }
    }

    pub async fn find_all(&self, mode: CacheMode) -> DomainResult<Fetched<Vec<SampleItem>>> {
        let query = DataQuery::All;
        self.read(&query, mode, || self.items.find_all()).await
    }

    /// Items in a category; an unknown category yields an empty list.
    pub async fn find_by_category(&self, category: &str, mode: CacheMode) -> DomainResult<Fetched<Vec<SampleItem>>> {
        let query = DataQuery::ByCategory(category.to_string());
        query.validate()?;
        self.read(&query, mode, || self.items.find_by_category(category)).await
    }

    /// A single item; an unknown id yields `None`.
    pub async fn find_by_id(&self, id: i64, mode: CacheMode) -> DomainResult<Fetched<Option<SampleItem>>> {
        let query = DataQuery::ById(id);
        query.validate()?;
        self.read(&query, mode, || self.items.find_by_id(id)).await
    }

    async fn read<T, F, Fut>(&self, query: &DataQuery, mode: CacheMode, load: F) -> DomainResult<Fetched<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = DomainResult<T>>,
    {
        if !mode.is_enabled() {
            self.delay.pause().await;
            return Ok(Fetched::miss(load().await?));
        }

        let region = query.cache_region();
        let key = query.cache_key();

        if let Some(raw) = self.cache.get(region, &key).await? {
            match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(region, key = %key, "cache hit");
                    return Ok(Fetched::hit(value));
                }
                Err(e) => {
                    warn!(region, key = %key, error = %e, "discarding undecodable cache entry");
                }
            }
        }

        debug!(region, key = %key, backend = self.cache.backend_name(), "cache miss");
        self.delay.pause().await;
        let value = load().await?;
        self.cache.put(region, &key, serde_json::to_string(&value)?).await?;
        Ok(Fetched::miss(value))
    }
}
