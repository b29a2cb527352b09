//! Measurement harness.
//!
//! Wraps one data-access call, times it, decides whether the cache served
//! it and records exactly one measurement for every successful call. Failed
//! calls are logged with their elapsed time but never recorded.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CacheMode, Fetched, HitDetection, Measurement, MeasurementConfig, NewMeasurement};
use crate::domain::ports::MeasurementRepository;

/// Upper bound for recent-metric listings.
pub const MAX_RECENT_LIMIT: u32 = 1000;

/// How a cached call is classified as a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheHitPolicy {
    /// Trust the flag reported by the data-access facade.
    Reported,
    /// Calls faster than the threshold count as hits.
    LatencyThreshold(Duration),
}

impl CacheHitPolicy {
    pub fn from_config(config: &MeasurementConfig) -> Self {
        match config.hit_detection {
            HitDetection::Reported => Self::Reported,
            HitDetection::Latency => Self::LatencyThreshold(Duration::from_millis(config.latency_threshold_ms)),
        }
    }

    pub fn classify(&self, mode: CacheMode, reported_hit: bool, elapsed: Duration) -> bool {
        if !mode.is_enabled() {
            return false;
        }
        match self {
            Self::Reported => reported_hit,
            Self::LatencyThreshold(threshold) => elapsed < *threshold,
        }
    }
}

impl Default for CacheHitPolicy {
    fn default() -> Self {
        Self::Reported
    }
}

/// A successful measured call.
#[derive(Debug, Clone, PartialEq)]
pub struct Measured<T> {
    pub data: T,
    pub response_time_ms: u64,
    pub cache_enabled: bool,
    pub cache_hit: bool,
    pub timestamp: DateTime<Utc>,
}

/// A failed measured call, carrying what the caller needs to report it.
#[derive(Debug, Error)]
#[error("{source} (after {response_time_ms}ms, cache enabled: {cache_enabled})")]
pub struct MeasuredError {
    #[source]
    pub source: DomainError,
    pub response_time_ms: u64,
    pub cache_enabled: bool,
}

fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Times data-access calls and records their outcome.
pub struct PerformanceService {
    measurements: Arc<dyn MeasurementRepository>,
    hit_policy: CacheHitPolicy,
}

impl PerformanceService {
    pub fn new(measurements: Arc<dyn MeasurementRepository>, hit_policy: CacheHitPolicy) -> Self {
        Self {
            measurements,
            hit_policy,
        }
    }

    /// Time `call`, classify the outcome and persist one measurement.
    ///
    /// The clock starts when `call` is first polled, so building the future
    /// beforehand is free.
    pub async fn measure<T, F>(&self, api_name: &str, mode: CacheMode, call: F) -> Result<Measured<T>, MeasuredError>
    where
        F: Future<Output = DomainResult<Fetched<T>>>,
    {
        let start = Instant::now();
        let outcome = call.await;
        let elapsed = start.elapsed();
        let response_time_ms = elapsed_ms(elapsed);
        let cache_enabled = mode.is_enabled();

        let fetched = match outcome {
            Ok(fetched) => fetched,
            Err(source) => {
                error!(
                    api = api_name,
                    cache_enabled,
                    response_time_ms,
                    error = %source,
                    "measured call failed"
                );
                return Err(MeasuredError {
                    source,
                    response_time_ms,
                    cache_enabled,
                });
            }
        };

        let cache_hit = self.hit_policy.classify(mode, fetched.cache_hit, elapsed);
        let measurement = NewMeasurement::new(api_name, mode, response_time_ms, cache_hit);

        let stored = self.measurements.insert(&measurement).await.map_err(|source| {
            error!(api = api_name, error = %source, "failed to record measurement");
            MeasuredError {
                source,
                response_time_ms,
                cache_enabled,
            }
        })?;

        info!(
            api = api_name,
            cache_enabled,
            response_time_ms,
            cache_hit,
            "performance metrics recorded"
        );

        Ok(Measured {
            data: fetched.value,
            response_time_ms,
            cache_enabled,
            cache_hit,
            timestamp: stored.created_at,
        })
    }

    /// Newest cache-enabled measurements for an API.
    pub async fn recent_metrics(&self, api_name: &str, limit: u32) -> DomainResult<Vec<Measurement>> {
        if limit == 0 || limit > MAX_RECENT_LIMIT {
            return Err(DomainError::InvalidArgument(format!(
                "limit must be between 1 and {MAX_RECENT_LIMIT}, got {limit}"
            )));
        }
        self.measurements.recent(api_name, true, limit).await
    }

    /// Measurements recorded within `[start, end]`.
    pub async fn metrics_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Vec<Measurement>> {
        if start > end {
            return Err(DomainError::InvalidArgument("start must not be after end".to_string()));
        }
        self.measurements.list_between(start, end).await
    }
}
