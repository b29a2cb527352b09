//! Measurement domain model.
//!
//! One measurement is recorded per measured API invocation. Rows are
//! append-only: the store assigns `id`, `request_count` and `created_at` at
//! insert time and nothing updates or deletes them afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a call went through the cache or straight to the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheMode {
    WithCache,
    WithoutCache,
}

impl CacheMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithCache => "with-cache",
            Self::WithoutCache => "without-cache",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "with-cache" | "cached" => Some(Self::WithCache),
            "without-cache" | "uncached" => Some(Self::WithoutCache),
            _ => None,
        }
    }

    pub fn from_enabled(cache_enabled: bool) -> Self {
        if cache_enabled {
            Self::WithCache
        } else {
            Self::WithoutCache
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::WithCache)
    }
}

impl std::fmt::Display for CacheMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted measurement row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: i64,
    pub api_name: String,
    pub cache_enabled: bool,
    pub response_time_ms: u64,
    pub cache_hit: bool,
    pub request_count: u32,
    pub created_at: DateTime<Utc>,
}

/// The caller-supplied part of a measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeasurement {
    pub api_name: String,
    pub cache_enabled: bool,
    pub response_time_ms: u64,
    pub cache_hit: bool,
}

impl NewMeasurement {
    /// Build a measurement. A hit is only meaningful with the cache enabled,
    /// so `cache_hit` is forced to false otherwise.
    pub fn new(api_name: impl Into<String>, mode: CacheMode, response_time_ms: u64, cache_hit: bool) -> Self {
        Self {
            api_name: api_name.into(),
            cache_enabled: mode.is_enabled(),
            response_time_ms,
            cache_hit: mode.is_enabled() && cache_hit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_mode_parsing() {
        assert_eq!(CacheMode::from_str("with-cache"), Some(CacheMode::WithCache));
        assert_eq!(CacheMode::from_str("WITHOUT-CACHE"), Some(CacheMode::WithoutCache));
        assert_eq!(CacheMode::from_str("sometimes"), None);
        assert_eq!(CacheMode::WithCache.to_string(), "with-cache");
    }

    #[test]
    fn test_uncached_measurement_never_hits() {
        let m = NewMeasurement::new("getAllData", CacheMode::WithoutCache, 120, true);
        assert!(!m.cache_enabled);
        assert!(!m.cache_hit);
    }
}
