//! Repository port for sample items (the backing store).

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{NewSampleItem, SampleItem};

#[async_trait]
pub trait SampleItemRepository: Send + Sync {
    /// List every item, ordered by id.
    async fn find_all(&self) -> DomainResult<Vec<SampleItem>>;

    /// List items in a category. Unknown categories yield an empty list.
    async fn find_by_category(&self, category: &str) -> DomainResult<Vec<SampleItem>>;

    /// Get an item by ID.
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<SampleItem>>;

    /// Count stored items.
    async fn count(&self) -> DomainResult<u64>;

    /// Insert a new item and return it with its assigned id.
    async fn insert(&self, item: &NewSampleItem) -> DomainResult<SampleItem>;
}
