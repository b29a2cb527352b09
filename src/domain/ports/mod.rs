//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces implemented by the adapters:
//! - SampleItemRepository: backing store for sample items
//! - MeasurementRepository: append-only record store for measurements
//! - CacheStore: region-partitioned key-value cache

pub mod cache_store;
pub mod measurement_repository;
pub mod sample_item_repository;

pub use cache_store::CacheStore;
pub use measurement_repository::MeasurementRepository;
pub use sample_item_repository::SampleItemRepository;
