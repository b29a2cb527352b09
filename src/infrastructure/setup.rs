//! Setup and wiring
//!
//! Handles project initialization (config directory, default config file,
//! database migrations) and builds the service graph from a [`Config`].

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::cache::MokaCacheStore;
use crate::adapters::http::AppState;
use crate::adapters::sqlite::{
    initialize_database, PoolConfig, SqliteMeasurementRepository, SqliteSampleItemRepository,
};
use crate::domain::models::{CacheBackend, CacheConfig, Config};
use crate::domain::ports::{CacheStore, MeasurementRepository, SampleItemRepository};
use crate::infrastructure::config::CONFIG_DIR;
use crate::services::{
    CacheAdminService, CacheHitPolicy, DataService, DelaySimulator, PerformanceService,
    SampleDataSeeder, StatisticsService,
};

/// Default configuration template content
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# cacheperf configuration
# Override settings by editing this file, adding .cacheperf/local.yaml or
# setting environment variables with the CACHEPERF_ prefix
#
# Example environment variables:
#   export CACHEPERF_SERVER__PORT=9090
#   export CACHEPERF_CACHE__BACKEND=redis
#   export CACHEPERF_LOGGING__LEVEL=debug

server:
  host: "127.0.0.1"
  port: 8080
  enable_cors: true

database:
  # Path to SQLite database file (project-local)
  path: ".cacheperf/cacheperf.db"
  max_connections: 5
  # Insert the sample catalogue when the table is empty
  seed_sample_data: true

cache:
  # memory (moka) or redis (requires the redis feature)
  backend: "memory"
  redis_url: "redis://127.0.0.1:6379"
  # Maximum entries per cache region (memory backend)
  max_capacity: 10000
  # Entry time-to-live in seconds, 0 disables expiry
  ttl_secs: 600

simulation:
  # Simulated backing-store latency, drawn from [min, max)
  min_delay_ms: 100
  max_delay_ms: 500

measurement:
  # reported: trust the facade's hit flag
  # latency: calls faster than latency_threshold_ms count as hits
  hit_detection: "reported"
  latency_threshold_ms: 100

logging:
  # Log level: trace, debug, info, warn, error
  level: "info"
  # Log format: json, pretty
  format: "pretty"
  # Rolling log file rotation: daily, hourly, never (used with log_dir)
  rotation: "daily"
"#;

/// Setup paths and directories
pub struct SetupPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl SetupPaths {
    /// Get setup paths for the current directory
    pub fn new() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::in_dir(current_dir))
    }

    pub fn in_dir(root: PathBuf) -> Self {
        let config_dir = root.join(CONFIG_DIR);
        Self {
            config_file: config_dir.join("config.yaml"),
            config_dir,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.config_file.exists()
    }
}

/// Create the configuration directory
pub fn create_config_dir(paths: &SetupPaths) -> Result<()> {
    fs::create_dir_all(&paths.config_dir).context("Failed to create config directory")
}

/// Write the default configuration file. Returns whether the file was written.
pub fn create_config_file(paths: &SetupPaths, force: bool) -> Result<bool> {
    if paths.config_file.exists() && !force {
        return Ok(false);
    }

    fs::write(&paths.config_file, DEFAULT_CONFIG_TEMPLATE).context("Failed to write config file")?;
    Ok(true)
}

/// Create the database if needed and apply pending migrations.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = initialize_database(&config.database.url(), Some(PoolConfig::from(&config.database)))
        .await
        .context("Failed to initialize database")?;
    pool.close().await;
    Ok(())
}

/// Build the configured cache store.
pub async fn build_cache_store(config: &CacheConfig) -> Result<Arc<dyn CacheStore>> {
    match config.backend {
        CacheBackend::Memory => Ok(Arc::new(MokaCacheStore::from_config(config))),
        #[cfg(feature = "redis")]
        CacheBackend::Redis => {
            let store = crate::adapters::cache::RedisCacheStore::from_config(config)
                .await
                .context("Failed to create Redis cache store")?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "redis"))]
        CacheBackend::Redis => {
            anyhow::bail!("cache backend 'redis' requires building with the 'redis' feature")
        }
    }
}

/// Wire the services over already-built stores.
pub fn build_state(
    config: &Config,
    items: Arc<dyn SampleItemRepository>,
    measurements: Arc<dyn MeasurementRepository>,
    cache: Arc<dyn CacheStore>,
) -> AppState {
    AppState {
        data: DataService::new(
            items,
            cache.clone(),
            DelaySimulator::from_config(&config.simulation),
        ),
        performance: PerformanceService::new(
            measurements.clone(),
            CacheHitPolicy::from_config(&config.measurement),
        ),
        statistics: StatisticsService::new(measurements),
        cache_admin: CacheAdminService::new(cache),
    }
}

/// Everything a command needs at runtime.
pub struct AppContext {
    pub pool: SqlitePool,
    pub items: Arc<dyn SampleItemRepository>,
    pub state: Arc<AppState>,
}

impl AppContext {
    /// Open and migrate the database, build the cache store and services.
    pub async fn build(config: &Config) -> Result<Self> {
        let pool = initialize_database(&config.database.url(), Some(PoolConfig::from(&config.database)))
            .await
            .with_context(|| format!("Failed to open database at {}", config.database.path))?;

        let cache = build_cache_store(&config.cache).await?;
        tracing::info!(backend = cache.backend_name(), "cache store ready");

        let items: Arc<dyn SampleItemRepository> = Arc::new(SqliteSampleItemRepository::new(pool.clone()));
        let measurements: Arc<dyn MeasurementRepository> =
            Arc::new(SqliteMeasurementRepository::new(pool.clone()));

        let state = Arc::new(build_state(config, items.clone(), measurements, cache));
        Ok(Self { pool, items, state })
    }

    pub fn seeder(&self) -> SampleDataSeeder {
        SampleDataSeeder::new(self.items.clone())
    }
}
