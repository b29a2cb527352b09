//! Request handlers and wire types.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::server::AppState;
use crate::domain::errors::DomainError;
use crate::domain::models::{CacheMode, DataQuery, Measurement, PerformanceReport, QueryResult};
use crate::services::{MeasuredError, DEFAULT_API_NAME};

const DEFAULT_RECENT_LIMIT: u32 = 20;

/// Query parameters shared by the data endpoints.
///
/// Kept as raw strings so malformed values surface as `InvalidArgument`.
#[derive(Debug, Default, Deserialize)]
pub struct DataParams {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl DataParams {
    pub fn parse(self) -> Result<(DataQuery, CacheMode), DomainError> {
        let mode = match self.mode.as_deref() {
            Some(raw) => CacheMode::from_str(raw).ok_or_else(|| {
                DomainError::InvalidArgument(format!(
                    "unknown mode '{raw}', expected 'with-cache' or 'without-cache'"
                ))
            })?,
            None => {
                return Err(DomainError::InvalidArgument(
                    "mode is required ('with-cache' or 'without-cache')".to_string(),
                ))
            }
        };

        let id = self
            .id
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| DomainError::InvalidArgument(format!("id must be an integer, got '{raw}'")))
            })
            .transpose()?;

        Ok((DataQuery::from_params(self.category, id)?, mode))
    }
}

#[derive(Debug, Deserialize)]
pub struct StatisticsParams {
    #[serde(default)]
    pub api: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    #[serde(default)]
    pub api: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Time window for the metrics listing, as RFC 3339 timestamps.
///
/// `to` defaults to the current time.
#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

fn parse_timestamp(name: &str, raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| DomainError::InvalidArgument(format!("{name} must be an RFC 3339 timestamp, got '{raw}'")))
}

impl RangeParams {
    pub fn parse(self, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>), DomainError> {
        let from = match self.from.as_deref() {
            Some(raw) => parse_timestamp("from", raw)?,
            None => return Err(DomainError::InvalidArgument("from is required".to_string())),
        };
        let to = match self.to.as_deref() {
            Some(raw) => parse_timestamp("to", raw)?,
            None => now,
        };
        Ok((from, to))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Envelope returned by the measured data endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasuredResponse<T> {
    pub data: T,
    pub response_time_ms: u64,
    pub cache_enabled: bool,
    /// Present only for cache-enabled calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_hit: Option<bool>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasuredErrorResponse {
    pub error: String,
    pub response_time_ms: u64,
    pub cache_enabled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheResponse {
    pub message: String,
    pub regions: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn status_for(err: &DomainError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn api_error(err: &DomainError) -> ApiError {
    if !err.is_client_error() {
        tracing::error!(error = %err, "request failed");
    }
    (
        status_for(err),
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
        }),
    )
}

impl IntoResponse for MeasuredError {
    fn into_response(self) -> Response {
        let body = MeasuredErrorResponse {
            error: self.source.to_string(),
            response_time_ms: self.response_time_ms,
            cache_enabled: self.cache_enabled,
        };
        (status_for(&self.source), Json(body)).into_response()
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "cacheperf".to_string(),
    })
}

/// Plain data read, not measured.
pub async fn get_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DataParams>,
) -> Result<Json<QueryResult>, ApiError> {
    let (query, mode) = params.parse().map_err(|e| api_error(&e))?;
    let fetched = state.data.fetch(&query, mode).await.map_err(|e| api_error(&e))?;
    Ok(Json(fetched.value))
}

pub async fn get_measured_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DataParams>,
) -> Result<Json<MeasuredResponse<QueryResult>>, Response> {
    let (query, mode) = params.parse().map_err(|e| api_error(&e).into_response())?;

    let measured = state
        .performance
        .measure(query.api_name(), mode, state.data.fetch(&query, mode))
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Json(MeasuredResponse {
        data: measured.data,
        response_time_ms: measured.response_time_ms,
        cache_enabled: measured.cache_enabled,
        cache_hit: measured.cache_enabled.then_some(measured.cache_hit),
        timestamp: measured.timestamp.to_rfc3339(),
    }))
}

pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatisticsParams>,
) -> Result<Json<PerformanceReport>, ApiError> {
    let api_name = params.api.as_deref().unwrap_or(DEFAULT_API_NAME);
    state
        .statistics
        .report(api_name)
        .await
        .map(Json)
        .map_err(|e| api_error(&e))
}

pub async fn get_all_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PerformanceReport>>, ApiError> {
    state
        .statistics
        .report_all()
        .await
        .map(Json)
        .map_err(|e| api_error(&e))
}

pub async fn get_recent_metrics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentParams>,
) -> Result<Json<Vec<Measurement>>, ApiError> {
    let api_name = params.api.as_deref().unwrap_or(DEFAULT_API_NAME);
    let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    state
        .performance
        .recent_metrics(api_name, limit)
        .await
        .map(Json)
        .map_err(|e| api_error(&e))
}

/// Every measurement recorded within `[from, to]`, oldest first.
pub async fn get_metrics_between(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<Measurement>>, ApiError> {
    let (from, to) = params.parse(Utc::now()).map_err(|e| api_error(&e))?;
    state
        .performance
        .metrics_between(from, to)
        .await
        .map(Json)
        .map_err(|e| api_error(&e))
}

pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Result<Json<ClearCacheResponse>, ApiError> {
    let regions = state.cache_admin.clear_all().await.map_err(|e| api_error(&e))?;
    Ok(Json(ClearCacheResponse {
        message: "Cache cleared successfully".to_string(),
        regions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mode: Option<&str>, category: Option<&str>, id: Option<&str>) -> DataParams {
        DataParams {
            mode: mode.map(String::from),
            category: category.map(String::from),
            id: id.map(String::from),
        }
    }

    #[test]
    fn test_parse_defaults_to_full_list() {
        let (query, mode) = params(Some("with-cache"), None, None).parse().unwrap();
        assert_eq!(query, DataQuery::All);
        assert_eq!(mode, CacheMode::WithCache);
    }

    #[test]
    fn test_parse_id_and_category() {
        let (query, mode) = params(Some("without-cache"), None, Some("7")).parse().unwrap();
        assert_eq!(query, DataQuery::ById(7));
        assert_eq!(mode, CacheMode::WithoutCache);

        let (query, _) = params(Some("with-cache"), Some("Books"), None).parse().unwrap();
        assert_eq!(query, DataQuery::ByCategory("Books".to_string()));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in [
            params(None, None, None),
            params(Some("sometimes"), None, None),
            params(Some("with-cache"), None, Some("abc")),
            params(Some("with-cache"), Some("Books"), Some("1")),
        ] {
            assert!(matches!(bad.parse(), Err(DomainError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_range_params() {
        let now = Utc::now();
        let range = RangeParams {
            from: Some("2024-01-01T00:00:00Z".to_string()),
            to: None,
        };
        let (from, to) = range.parse(now).unwrap();
        assert_eq!(from.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(to, now);

        assert!(matches!(RangeParams::default().parse(now), Err(DomainError::InvalidArgument(_))));
        let bad = RangeParams {
            from: Some("yesterday".to_string()),
            to: None,
        };
        assert!(matches!(bad.parse(now), Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&DomainError::InvalidArgument("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&DomainError::BackingStoreUnavailable("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_measured_response_omits_hit_when_uncached() {
        let response = MeasuredResponse {
            data: Vec::<u8>::new(),
            response_time_ms: 312,
            cache_enabled: false,
            cache_hit: None,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"responseTimeMs\":312"));
        assert!(json.contains("\"cacheEnabled\":false"));
        assert!(!json.contains("cacheHit"));
    }
}
