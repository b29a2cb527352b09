//! Cache store adapters.
//!
//! `MokaCacheStore` keeps regions in process using `moka`; `RedisCacheStore`
//! (behind the `redis` feature) shares them across instances.

pub mod moka_store;
#[cfg(feature = "redis")]
pub mod redis_store;

pub use moka_store::MokaCacheStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisCacheStore;
