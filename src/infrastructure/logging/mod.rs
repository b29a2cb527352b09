//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - pretty or JSON console output
//! - optional rolling JSON log files

pub mod logger;

pub use logger::LoggerImpl;
