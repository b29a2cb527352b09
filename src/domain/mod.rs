//! Domain layer for cacheperf
//!
//! Models, errors and the port traits implemented by the storage and cache
//! adapters.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
