//! Cache store port.
//!
//! A key-value store partitioned into named regions. Values are opaque
//! strings (the data-access facade stores JSON).

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a key. `None` is a miss.
    async fn get(&self, region: &str, key: &str) -> DomainResult<Option<String>>;

    /// Store a value, creating the region on first use.
    async fn put(&self, region: &str, key: &str, value: String) -> DomainResult<()>;

    /// Evict every entry in a region. Clearing an unknown or empty region succeeds.
    async fn clear_region(&self, region: &str) -> DomainResult<()>;

    /// Names of all regions the store knows about.
    async fn list_regions(&self) -> DomainResult<Vec<String>>;

    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;
}
