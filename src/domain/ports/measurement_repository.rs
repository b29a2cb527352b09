//! Repository port for measurement rows (the record store).
//!
//! Measurements are append-only, so the port has no update or delete.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::errors::DomainResult;
use crate::domain::models::{Measurement, ModeAggregate, NewMeasurement};

#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Persist one measurement. The store sets `request_count` and `created_at`.
    async fn insert(&self, measurement: &NewMeasurement) -> DomainResult<Measurement>;

    /// Average response time, row count and hit count for one API and mode.
    async fn aggregate(&self, api_name: &str, cache_enabled: bool) -> DomainResult<ModeAggregate>;

    /// Most recent measurements for one API and mode, newest first.
    async fn recent(&self, api_name: &str, cache_enabled: bool, limit: u32) -> DomainResult<Vec<Measurement>>;

    /// Measurements created within `[start, end]`, oldest first.
    async fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Vec<Measurement>>;

    /// Distinct API names that have at least one measurement.
    async fn api_names(&self) -> DomainResult<Vec<String>>;
}
