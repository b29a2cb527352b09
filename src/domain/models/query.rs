//! Data-access queries and their results.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::SampleItem;

/// Cache region holding the full item list.
pub const REGION_ALL: &str = "sampleData.all";
/// Cache region holding per-category item lists.
pub const REGION_CATEGORY: &str = "sampleData.category";
/// Cache region holding single-item lookups.
pub const REGION_ID: &str = "sampleData.id";

/// A lookup against the sample item store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataQuery {
    All,
    ByCategory(String),
    ById(i64),
}

impl DataQuery {
    /// Build a query from optional request parameters.
    ///
    /// No parameter means the full list; giving both is rejected.
    pub fn from_params(category: Option<String>, id: Option<i64>) -> DomainResult<Self> {
        match (category, id) {
            (Some(_), Some(_)) => Err(DomainError::InvalidArgument(
                "category and id are mutually exclusive".to_string(),
            )),
            (Some(category), None) => Ok(Self::ByCategory(category)),
            (None, Some(id)) => Ok(Self::ById(id)),
            (None, None) => Ok(Self::All),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::All => Ok(()),
            Self::ByCategory(category) if category.trim().is_empty() => Err(
                DomainError::InvalidArgument("category must not be empty".to_string()),
            ),
            Self::ByCategory(_) => Ok(()),
            Self::ById(id) if *id < 1 => Err(DomainError::InvalidArgument(format!(
                "id must be a positive integer, got {id}"
            ))),
            Self::ById(_) => Ok(()),
        }
    }

    /// Logical operation name recorded with each measurement.
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::All => "getAllData",
            Self::ByCategory(_) => "getDataByCategory",
            Self::ById(_) => "getDataById",
        }
    }

    pub fn cache_region(&self) -> &'static str {
        match self {
            Self::All => REGION_ALL,
            Self::ByCategory(_) => REGION_CATEGORY,
            Self::ById(_) => REGION_ID,
        }
    }

    /// Deterministic cache key within the query's region.
    pub fn cache_key(&self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::ByCategory(category) => category.clone(),
            Self::ById(id) => id.to_string(),
        }
    }
}

/// Result of a [`DataQuery`]: a list for `All` / `ByCategory`, an optional
/// single item for `ById`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResult {
    Items(Vec<SampleItem>),
    Item(Option<SampleItem>),
}

impl QueryResult {
    pub fn len(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Item(item) => usize::from(item.is_some()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A value together with whether the cache satisfied the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub value: T,
    pub cache_hit: bool,
}

impl<T> Fetched<T> {
    pub fn hit(value: T) -> Self {
        Self { value, cache_hit: true }
    }

    pub fn miss(value: T) -> Self {
        Self { value, cache_hit: false }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            value: f(self.value),
            cache_hit: self.cache_hit,
        }
    }
}
