pub mod config;
pub mod measurement;
pub mod query;
pub mod sample_item;
pub mod statistics;

pub use config::{
    CacheBackend, CacheConfig, Config, DatabaseConfig, HitDetection, LoggingConfig,
    MeasurementConfig, ServerConfig, SimulationConfig,
};
pub use measurement::{CacheMode, Measurement, NewMeasurement};
pub use query::{DataQuery, Fetched, QueryResult};
pub use sample_item::{default_catalogue, NewSampleItem, SampleItem};
pub use statistics::{
    hit_rate, CachedModeSummary, ModeAggregate, PerformanceReport, UncachedModeSummary,
};
