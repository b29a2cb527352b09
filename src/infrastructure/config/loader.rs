use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::{CacheBackend, Config, HitDetection};

/// Directory holding project-local configuration and the database.
pub const CONFIG_DIR: &str = ".cacheperf";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid port: 0")]
    InvalidPort,

    #[error("Invalid max_capacity: 0. Must be at least 1")]
    InvalidMaxCapacity,

    #[error("Invalid delay range: min_delay_ms ({0}) must not exceed max_delay_ms ({1})")]
    InvalidDelayRange(u64, u64),

    #[error("Redis URL cannot be empty when the redis backend is selected")]
    EmptyRedisUrl,

    #[error("Invalid latency_threshold_ms: 0. Must be positive for latency hit detection")]
    InvalidLatencyThreshold,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .cacheperf/config.yaml (project config, created by init)
    /// 3. .cacheperf/local.yaml (local overrides, optional)
    /// 4. Environment variables (CACHEPERF_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")))
            .merge(Env::prefixed("CACHEPERF_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Explicit file when given, hierarchical lookup otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(config.database.max_connections));
        }

        if config.cache.max_capacity == 0 {
            return Err(ConfigError::InvalidMaxCapacity);
        }

        if config.cache.backend == CacheBackend::Redis && config.cache.redis_url.trim().is_empty() {
            return Err(ConfigError::EmptyRedisUrl);
        }

        if config.simulation.min_delay_ms > config.simulation.max_delay_ms {
            return Err(ConfigError::InvalidDelayRange(
                config.simulation.min_delay_ms,
                config.simulation.max_delay_ms,
            ));
        }

        if config.measurement.hit_detection == HitDetection::Latency
            && config.measurement.latency_threshold_ms == 0
        {
            return Err(ConfigError::InvalidLatencyThreshold);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, ".cacheperf/cacheperf.db");
        assert_eq!(config.simulation.min_delay_ms, 100);
        assert_eq!(config.simulation.max_delay_ms, 500);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.logging.level, "info");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
server:
  port: 3000
database:
  path: /custom/path.db
  max_connections: 2
cache:
  backend: redis
  redis_url: redis://cache:6379
simulation:
  min_delay_ms: 10
  max_delay_ms: 20
measurement:
  hit_detection: latency
  latency_threshold_ms: 50
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "/custom/path.db");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.cache.backend, CacheBackend::Redis);
        assert_eq!(config.cache.redis_url, "redis://cache:6379");
        assert_eq!(config.simulation.max_delay_ms, 20);
        assert_eq!(config.measurement.hit_detection, HitDetection::Latency);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.rotation, "daily");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLogFormat(_)
        ));
    }

    #[test]
    fn test_validate_empty_database_path() {
        let mut config = Config::default();
        config.database.path = String::new();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyDatabasePath
        ));
    }

    #[test]
    fn test_validate_zero_max_connections() {
        let mut config = Config::default();
        config.database.max_connections = 0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidMaxConnections(0)
        ));
    }

    #[test]
    fn test_validate_inverted_delay_range() {
        let mut config = Config::default();
        config.simulation.min_delay_ms = 600;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidDelayRange(600, 500)
        ));
    }

    #[test]
    fn test_validate_equal_delay_bounds_allowed() {
        let mut config = Config::default();
        config.simulation.min_delay_ms = 0;
        config.simulation.max_delay_ms = 0;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_cache_settings() {
        let mut config = Config::default();
        config.cache.max_capacity = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidMaxCapacity
        ));

        let mut config = Config::default();
        config.cache.backend = CacheBackend::Redis;
        config.cache.redis_url = " ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyRedisUrl
        ));
    }

    #[test]
    fn test_validate_latency_threshold() {
        let mut config = Config::default();
        config.measurement.latency_threshold_ms = 0;
        assert!(ConfigLoader::validate(&config).is_ok());

        config.measurement.hit_detection = HitDetection::Latency;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLatencyThreshold
        ));
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(ConfigLoader::validate(&config).unwrap_err(), ConfigError::InvalidPort));
    }

    #[test]
    fn test_env_override() {
        temp_env::with_vars(
            [
                ("CACHEPERF_SERVER__PORT", Some("9090")),
                ("CACHEPERF_LOGGING__LEVEL", Some("debug")),
                ("CACHEPERF_SIMULATION__MAX_DELAY_MS", Some("250")),
            ],
            || {
                let config = ConfigLoader::load().expect("env overrides should load");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.logging.level, "debug");
                assert_eq!(config.simulation.max_delay_ms, 250);
            },
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 4000\ncache:\n  ttl_secs: 0").unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.cache.ttl_secs, 0);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        assert!(ConfigLoader::load_from_file("/nonexistent/cacheperf.yaml").is_err());
    }

    #[test]
    fn test_hierarchical_merging() {
        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(base_file, "simulation:\n  min_delay_ms: 50\nlogging:\n  level: info\n  format: json").unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "simulation:\n  min_delay_ms: 75\nlogging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.simulation.min_delay_ms, 75, "Override should win");
        assert_eq!(config.logging.level, "debug", "Override should win for nested fields");
        assert_eq!(config.logging.format, "json", "Base value should persist when not overridden");
        assert_eq!(config.simulation.max_delay_ms, 500);
    }
}
