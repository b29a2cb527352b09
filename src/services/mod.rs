pub mod cache_admin;
pub mod data_service;
pub mod latency;
pub mod performance_service;
pub mod seeder;
pub mod statistics_service;

pub use cache_admin::CacheAdminService;
pub use data_service::DataService;
pub use latency::DelaySimulator;
pub use performance_service::{CacheHitPolicy, Measured, MeasuredError, PerformanceService, MAX_RECENT_LIMIT};
pub use seeder::SampleDataSeeder;
pub use statistics_service::{StatisticsService, DEFAULT_API_NAME};
