//! HTTP surface for the harness.

pub mod handlers;
pub mod server;

pub use handlers::{ErrorResponse, HealthResponse, MeasuredErrorResponse, MeasuredResponse};
pub use server::{build_router, AppState, HttpConfig, HttpServer};
