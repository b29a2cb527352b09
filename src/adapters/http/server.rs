//! HTTP server.
//!
//! Routes the demo endpoints onto the services held in [`AppState`].

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::domain::models::ServerConfig;
use crate::services::{CacheAdminService, DataService, PerformanceService, StatisticsService};

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for HttpConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            enable_cors: config.enable_cors,
        }
    }
}

/// Shared state for the HTTP handlers.
pub struct AppState {
    pub data: DataService,
    pub performance: PerformanceService,
    pub statistics: StatisticsService,
    pub cache_admin: CacheAdminService,
}

/// Build the router over shared state.
pub fn build_router(state: Arc<AppState>, enable_cors: bool) -> Router {
    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/data", get(handlers::get_data))
        .route("/api/performance/data", get(handlers::get_measured_data))
        .route("/api/performance/statistics", get(handlers::get_statistics))
        .route("/api/performance/statistics/all", get(handlers::get_all_statistics))
        .route("/api/performance/metrics", get(handlers::get_metrics_between))
        .route("/api/performance/metrics/recent", get(handlers::get_recent_metrics))
        .route("/api/performance/cache/clear", post(handlers::clear_cache))
        .with_state(state);

    if enable_cors {
        app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}

/// Binds the router to the configured address.
pub struct HttpServer {
    config: HttpConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    pub fn new(state: Arc<AppState>, config: HttpConfig) -> Self {
        Self { config, state }
    }

    fn address(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.config.host, self.config.port).parse()
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.address()?;
        let router = build_router(self.state, self.config.enable_cors);

        tracing::info!("cacheperf HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.enable_cors);
    }

    #[test]
    fn test_config_from_server_config() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            enable_cors: false,
        };
        let config = HttpConfig::from(&server);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert!(!config.enable_cors);
    }
}
