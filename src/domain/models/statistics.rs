//! Aggregate performance statistics.

use serde::{Deserialize, Serialize};

/// Raw aggregate for one `(api_name, cache_enabled)` pair as returned by the
/// record store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeAggregate {
    /// `None` when there are no rows.
    pub avg_response_time_ms: Option<f64>,
    pub total: u64,
    pub hits: u64,
}

/// Summary of calls that went through the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedModeSummary {
    pub avg_response_time: f64,
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_hit_rate: f64,
}

/// Summary of calls that bypassed the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UncachedModeSummary {
    pub avg_response_time: f64,
    pub total_requests: u64,
}

/// Side-by-side comparison for one API name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub api_name: String,
    pub with_cache: CachedModeSummary,
    pub without_cache: UncachedModeSummary,
    /// Uncached average divided by cached average, when both are positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speedup: Option<f64>,
}

/// Percentage of hits among `total` requests, always within `[0, 100]`.
pub fn hit_rate(hits: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = hits.min(total) as f64 / total as f64 * 100.0;
    rate
}

impl CachedModeSummary {
    pub fn from_aggregate(aggregate: ModeAggregate) -> Self {
        Self {
            avg_response_time: aggregate.avg_response_time_ms.unwrap_or(0.0),
            total_requests: aggregate.total,
            cache_hits: aggregate.hits,
            cache_hit_rate: hit_rate(aggregate.hits, aggregate.total),
        }
    }
}

impl UncachedModeSummary {
    pub fn from_aggregate(aggregate: ModeAggregate) -> Self {
        Self {
            avg_response_time: aggregate.avg_response_time_ms.unwrap_or(0.0),
            total_requests: aggregate.total,
        }
    }
}

impl PerformanceReport {
    pub fn new(
        api_name: impl Into<String>,
        with_cache: CachedModeSummary,
        without_cache: UncachedModeSummary,
    ) -> Self {
        let speedup = (with_cache.avg_response_time > 0.0 && without_cache.avg_response_time > 0.0)
            .then(|| without_cache.avg_response_time / with_cache.avg_response_time);

        Self {
            api_name: api_name.into(),
            with_cache,
            without_cache,
            speedup,
        }
    }
}
