//! Redis cache store.
//!
//! Entries live under `<prefix>:<region>:<key>`; region names are tracked in
//! the set `<prefix>:regions`. One `ConnectionManager` is opened up front and
//! cloned per call, so a cache hit costs a single round trip.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::CacheConfig;
use crate::domain::ports::CacheStore;

const KEY_PREFIX: &str = "cacheperf";
const SCAN_BATCH: usize = 100;

/// `CacheStore` backed by a Redis server.
#[derive(Clone)]
pub struct RedisCacheStore {
    connection: ConnectionManager,
    ttl_secs: u64,
}

fn redis_error(op: &str, err: &redis::RedisError) -> DomainError {
    DomainError::BackingStoreUnavailable(format!("Redis {op} failed: {err}"))
}

fn open_client(connection_string: &str) -> DomainResult<Client> {
    Client::open(connection_string)
        .map_err(|e| DomainError::BackingStoreUnavailable(format!("Failed to create Redis client: {e}")))
}

impl RedisCacheStore {
    /// Connect to a URL such as `redis://localhost:6379`.
    pub async fn connect(connection_string: &str, ttl_secs: u64) -> DomainResult<Self> {
        let client = open_client(connection_string)?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| redis_error("CONNECT", &e))?;

        Ok(Self { connection, ttl_secs })
    }

    pub async fn from_config(config: &CacheConfig) -> DomainResult<Self> {
        Self::connect(&config.redis_url, config.ttl_secs).await
    }

    fn entry_key(region: &str, key: &str) -> String {
        format!("{KEY_PREFIX}:{region}:{key}")
    }

    fn region_pattern(region: &str) -> String {
        format!("{KEY_PREFIX}:{region}:*")
    }

    fn regions_key() -> String {
        format!("{KEY_PREFIX}:regions")
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, region: &str, key: &str) -> DomainResult<Option<String>> {
        let mut conn = self.connection.clone();
        conn.get::<_, Option<String>>(Self::entry_key(region, key))
            .await
            .map_err(|e| redis_error("GET", &e))
    }

    async fn put(&self, region: &str, key: &str, value: String) -> DomainResult<()> {
        let mut conn = self.connection.clone();
        let entry_key = Self::entry_key(region, key);

        let result: redis::RedisResult<()> = if self.ttl_secs > 0 {
            conn.set_ex(&entry_key, value, self.ttl_secs).await
        } else {
            conn.set(&entry_key, value).await
        };
        result.map_err(|e| redis_error("SET", &e))?;

        conn.sadd::<_, _, ()>(Self::regions_key(), region)
            .await
            .map_err(|e| redis_error("SADD", &e))
    }

    async fn clear_region(&self, region: &str) -> DomainResult<()> {
        let mut conn = self.connection.clone();
        let pattern = Self::region_pattern(region);
        let mut cursor: u64 = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(|e| redis_error("SCAN", &e))?;

            if !keys.is_empty() {
                conn.del::<_, ()>(keys).await.map_err(|e| redis_error("DEL", &e))?;
            }
            if next == 0 {
                return Ok(());
            }
            cursor = next;
        }
    }

    async fn list_regions(&self) -> DomainResult<Vec<String>> {
        let mut conn = self.connection.clone();
        let mut regions: Vec<String> = conn
            .smembers(Self::regions_key())
            .await
            .map_err(|e| redis_error("SMEMBERS", &e))?;
        regions.sort();
        Ok(regions)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
