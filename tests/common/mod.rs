//! Common test utilities for integration tests
//!
//! Builds the full service graph over an in-memory migrated database and
//! the in-process cache store.

#![allow(dead_code)]

use std::sync::Arc;

use cacheperf::adapters::cache::MokaCacheStore;
use cacheperf::adapters::http::{build_router, AppState};
use cacheperf::adapters::sqlite::{
    create_migrated_test_pool, SqliteMeasurementRepository, SqliteSampleItemRepository,
};
use cacheperf::domain::models::Config;
use cacheperf::domain::ports::{CacheStore, MeasurementRepository, SampleItemRepository};
use cacheperf::infrastructure::setup::build_state;
use cacheperf::services::SampleDataSeeder;

pub struct Harness {
    pub state: Arc<AppState>,
    pub items: Arc<SqliteSampleItemRepository>,
    pub measurements: Arc<SqliteMeasurementRepository>,
    pub cache: Arc<MokaCacheStore>,
}

impl Harness {
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone(), false)
    }
}

/// Config with the simulated delay narrowed to `[min_ms, max_ms)`.
pub fn config_with_delay(min_ms: u64, max_ms: u64) -> Config {
    let mut config = Config::default();
    config.simulation.min_delay_ms = min_ms;
    config.simulation.max_delay_ms = max_ms;
    config
}

/// Seeded harness with the given configuration.
pub async fn harness(config: &Config) -> Harness {
    let pool = create_migrated_test_pool().await.expect("test pool");
    let items = Arc::new(SqliteSampleItemRepository::new(pool.clone()));
    let measurements = Arc::new(SqliteMeasurementRepository::new(pool));
    let cache = Arc::new(MokaCacheStore::new());

    SampleDataSeeder::new(items.clone())
        .seed_if_empty()
        .await
        .expect("seed sample data");

    let state = Arc::new(build_state(
        config,
        items.clone() as Arc<dyn SampleItemRepository>,
        measurements.clone() as Arc<dyn MeasurementRepository>,
        cache.clone() as Arc<dyn CacheStore>,
    ));

    Harness {
        state,
        items,
        measurements,
        cache,
    }
}

/// Seeded harness without simulated delay.
pub async fn fast_harness() -> Harness {
    harness(&config_with_delay(0, 0)).await
}
