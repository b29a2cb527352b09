//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging (tracing)
//! - Project setup and service wiring

pub mod config;
pub mod logging;
pub mod setup;
