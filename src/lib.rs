//! cacheperf - cached vs. uncached data-access latency harness
//!
//! Serves a small sample catalogue through two code paths, one that reads
//! the backing store directly and one that goes through a cache store, and
//! records the response time of every measured call so the two can be
//! compared.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Service Layer** (`services`): data-access facade, measurement
//!   harness, statistics aggregator, cache administration, seeding
//! - **Adapters** (`adapters`): SQLite stores, moka/Redis cache stores,
//!   HTTP API
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging,
//!   wiring
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    CacheMode, Config, DataQuery, Fetched, Measurement, PerformanceReport, QueryResult, SampleItem,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    CacheAdminService, DataService, PerformanceService, SampleDataSeeder, StatisticsService,
};
