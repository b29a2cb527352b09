use serde::{Deserialize, Serialize};

/// Main configuration structure for cacheperf
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Cache store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Simulated backing-store latency
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Measurement harness configuration
    #[serde(default)]
    pub measurement: MeasurementConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to enable permissive CORS (the demo frontend runs on another origin)
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_true(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Insert the sample catalogue at startup when the table is empty
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

fn default_database_path() -> String {
    ".cacheperf/cacheperf.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl DatabaseConfig {
    /// sqlx connection URL for the configured path.
    pub fn url(&self) -> String {
        if self.path.starts_with("sqlite:") {
            self.path.clone()
        } else {
            format!("sqlite:{}", self.path)
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
            seed_sample_data: default_true(),
        }
    }
}

/// Which cache store backs the cached code path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process moka cache
    Memory,
    /// External Redis server (requires the `redis` feature)
    Redis,
}

impl Default for CacheBackend {
    fn default() -> Self {
        Self::Memory
    }
}

/// Cache store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// Redis connection URL, used when `backend` is `redis`
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Maximum entries per region (memory backend)
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,

    /// Entry time-to-live in seconds, 0 disables expiry
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

const fn default_max_capacity() -> u64 {
    10_000
}

const fn default_ttl_secs() -> u64 {
    600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: default_redis_url(),
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Simulated backing-store latency, applied to every store read
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationConfig {
    /// Inclusive lower bound of the delay in milliseconds
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Exclusive upper bound of the delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

const fn default_min_delay_ms() -> u64 {
    100
}

const fn default_max_delay_ms() -> u64 {
    500
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// How the harness decides whether a cached call was a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitDetection {
    /// Use the hit/miss flag reported by the data-access facade
    Reported,
    /// Classify calls faster than `latency_threshold_ms` as hits
    Latency,
}

impl Default for HitDetection {
    fn default() -> Self {
        Self::Reported
    }
}

/// Measurement harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MeasurementConfig {
    #[serde(default)]
    pub hit_detection: HitDetection,

    /// Threshold for `latency` hit detection in milliseconds
    #[serde(default = "default_latency_threshold_ms")]
    pub latency_threshold_ms: u64,
}

const fn default_latency_threshold_ms() -> u64 {
    100
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            hit_detection: HitDetection::default(),
            latency_threshold_ms: default_latency_threshold_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stdout only when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// Log file rotation: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
