//! SQLite adapter for MeasurementRepository.
//!
//! `created_at` is stored as fixed-width RFC3339 (microseconds, `Z` suffix)
//! so that text comparison orders rows chronologically.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;

use crate::adapters::sqlite::parse_datetime;
use crate::domain::errors::DomainResult;
use crate::domain::models::{Measurement, ModeAggregate, NewMeasurement};
use crate::domain::ports::MeasurementRepository;

/// Append-only SQLite store for measurements.
#[derive(Clone)]
pub struct SqliteMeasurementRepository {
    pool: SqlitePool,
}

impl SqliteMeasurementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[derive(sqlx::FromRow)]
struct MeasurementRow {
    id: i64,
    api_name: String,
    cache_enabled: i64,
    response_time_ms: i64,
    cache_hit: i64,
    request_count: i64,
    created_at: String,
}

fn row_to_measurement(row: MeasurementRow) -> DomainResult<Measurement> {
    Ok(Measurement {
        id: row.id,
        api_name: row.api_name,
        cache_enabled: row.cache_enabled != 0,
        response_time_ms: to_u64(row.response_time_ms),
        cache_hit: row.cache_hit != 0,
        request_count: u32::try_from(row.request_count).unwrap_or(1),
        created_at: parse_datetime(&row.created_at)?,
    })
}

#[async_trait]
impl MeasurementRepository for SqliteMeasurementRepository {
    async fn insert(&self, measurement: &NewMeasurement) -> DomainResult<Measurement> {
        let created_at = Utc::now();
        let response_time_ms = i64::try_from(measurement.response_time_ms).unwrap_or(i64::MAX);

        let result = sqlx::query(
            "INSERT INTO performance_metrics
             (api_name, cache_enabled, response_time_ms, cache_hit, request_count, created_at)
             VALUES (?1, ?2, ?3, ?4, 1, ?5)",
        )
        .bind(&measurement.api_name)
        .bind(measurement.cache_enabled)
        .bind(response_time_ms)
        .bind(measurement.cache_hit)
        .bind(format_timestamp(created_at))
        .execute(&self.pool)
        .await?;

        Ok(Measurement {
            id: result.last_insert_rowid(),
            api_name: measurement.api_name.clone(),
            cache_enabled: measurement.cache_enabled,
            response_time_ms: measurement.response_time_ms,
            cache_hit: measurement.cache_hit,
            request_count: 1,
            created_at,
        })
    }

    async fn aggregate(&self, api_name: &str, cache_enabled: bool) -> DomainResult<ModeAggregate> {
        let (avg, total, hits): (Option<f64>, i64, i64) = sqlx::query_as(
            "SELECT AVG(response_time_ms), COUNT(*), COALESCE(SUM(CASE WHEN cache_hit != 0 THEN 1 ELSE 0 END), 0)
             FROM performance_metrics
             WHERE api_name = ? AND cache_enabled = ?",
        )
        .bind(api_name)
        .bind(cache_enabled)
        .fetch_one(&self.pool)
        .await?;

        Ok(ModeAggregate {
            avg_response_time_ms: avg,
            total: to_u64(total),
            hits: to_u64(hits),
        })
    }

    async fn recent(&self, api_name: &str, cache_enabled: bool, limit: u32) -> DomainResult<Vec<Measurement>> {
        let rows: Vec<MeasurementRow> = sqlx::query_as(
            "SELECT * FROM performance_metrics
             WHERE api_name = ? AND cache_enabled = ?
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
        )
        .bind(api_name)
        .bind(cache_enabled)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_measurement).collect()
    }

    async fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Vec<Measurement>> {
        let rows: Vec<MeasurementRow> = sqlx::query_as(
            "SELECT * FROM performance_metrics
             WHERE created_at >= ? AND created_at <= ?
             ORDER BY created_at ASC, id ASC",
        )
        .bind(format_timestamp(start))
        .bind(format_timestamp(end))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_measurement).collect()
    }

    async fn api_names(&self) -> DomainResult<Vec<String>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT api_name FROM performance_metrics ORDER BY api_name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
