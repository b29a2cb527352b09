//! Statistics aggregator.
//!
//! Read-only: builds comparison reports from the record store's aggregate
//! queries and never touches measurement rows.

use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CachedModeSummary, PerformanceReport, UncachedModeSummary};
use crate::domain::ports::MeasurementRepository;

/// API name reported when the caller does not pick one.
pub const DEFAULT_API_NAME: &str = "getAllData";

/// Builds cached vs uncached performance reports.
pub struct StatisticsService {
    measurements: Arc<dyn MeasurementRepository>,
}

impl StatisticsService {
    pub fn new(measurements: Arc<dyn MeasurementRepository>) -> Self {
        Self { measurements }
    }

    /// Cached vs. uncached summary for one API.
    pub async fn report(&self, api_name: &str) -> DomainResult<PerformanceReport> {
        let with_cache = self.measurements.aggregate(api_name, true).await?;
        let without_cache = self.measurements.aggregate(api_name, false).await?;

        Ok(PerformanceReport::new(
            api_name,
            CachedModeSummary::from_aggregate(with_cache),
            UncachedModeSummary::from_aggregate(without_cache),
        ))
    }

    /// One report per API that has recorded measurements.
    pub async fn report_all(&self) -> DomainResult<Vec<PerformanceReport>> {
        let mut reports = Vec::new();
        for api_name in self.measurements.api_names().await? {
            reports.push(self.report(&api_name).await?);
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteMeasurementRepository};
    use crate::domain::models::{CacheMode, NewMeasurement};

    async fn setup() -> (StatisticsService, Arc<SqliteMeasurementRepository>) {
        let pool = create_migrated_test_pool().await.unwrap();
        let repo = Arc::new(SqliteMeasurementRepository::new(pool));
        (StatisticsService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_report_three_hits_one_miss() {
        let (service, repo) = setup().await;
        for hit in [true, true, true, false] {
            repo.insert(&NewMeasurement::new("getAll", CacheMode::WithCache, 50, hit))
                .await
                .unwrap();
        }

        let report = service.report("getAll").await.unwrap();
        assert_eq!(report.with_cache.total_requests, 4);
        assert_eq!(report.with_cache.cache_hits, 3);
        assert!((report.with_cache.cache_hit_rate - 75.0).abs() < f64::EPSILON);
        assert!((report.with_cache.avg_response_time - 50.0).abs() < f64::EPSILON);
        assert_eq!(report.without_cache.total_requests, 0);
        assert_eq!(report.speedup, None);
    }

    #[tokio::test]
    async fn test_report_without_rows_is_zeroed() {
        let (service, _) = setup().await;
        let report = service.report(DEFAULT_API_NAME).await.unwrap();
        assert_eq!(report.with_cache, CachedModeSummary::default());
        assert_eq!(report.without_cache, UncachedModeSummary::default());
    }

    #[tokio::test]
    async fn test_report_computes_speedup() {
        let (service, repo) = setup().await;
        repo.insert(&NewMeasurement::new("getAllData", CacheMode::WithCache, 10, true)).await.unwrap();
        repo.insert(&NewMeasurement::new("getAllData", CacheMode::WithoutCache, 250, false)).await.unwrap();

        let report = service.report("getAllData").await.unwrap();
        assert_eq!(report.speedup, Some(25.0));
    }

    #[tokio::test]
    async fn test_report_all_covers_each_api() {
        let (service, repo) = setup().await;
        repo.insert(&NewMeasurement::new("getAllData", CacheMode::WithCache, 10, true)).await.unwrap();
        repo.insert(&NewMeasurement::new("getDataById", CacheMode::WithoutCache, 120, false)).await.unwrap();

        let reports = service.report_all().await.unwrap();
        let names: Vec<&str> = reports.iter().map(|r| r.api_name.as_str()).collect();
        assert_eq!(names, vec!["getAllData", "getDataById"]);
    }
}
