//! Implementation of the `cacheperf serve` command.

use anyhow::{Context, Result};
use clap::Args;
use std::future::Future;

use crate::adapters::http::{HttpConfig, HttpServer};
use crate::domain::models::Config;
use crate::infrastructure::setup::AppContext;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(long, short)]
    pub port: Option<u16>,
}

impl ServeArgs {
    fn http_config(&self, config: &Config) -> HttpConfig {
        let mut http = HttpConfig::from(&config.server);
        if let Some(host) = &self.host {
            http.host = host.clone();
        }
        if let Some(port) = self.port {
            http.port = port;
        }
        http
    }
}

pub async fn execute(args: ServeArgs, config: &Config) -> Result<()> {
    run(args, config, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
        }
        tracing::info!("shutting down");
    })
    .await
}

async fn run<F>(args: ServeArgs, config: &Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let context = AppContext::build(config).await?;

    if config.database.seed_sample_data {
        match context.seeder().seed_if_empty().await {
            Ok(inserted) => tracing::debug!(inserted, "sample data checked"),
            Err(e) => tracing::error!(error = %e, "failed to seed sample data"),
        }
    }

    let server = HttpServer::new(context.state.clone(), args.http_config(config));
    server
        .serve_with_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("HTTP server failed")?;

    context.pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::initialize_database;

    fn local_args() -> ServeArgs {
        ServeArgs {
            host: Some("127.0.0.1".to_string()),
            port: Some(0),
        }
    }

    fn config_in(dir: &tempfile::TempDir) -> Config {
        let mut config = Config::default();
        config.database.path = dir.path().join("cacheperf.db").to_string_lossy().into_owned();
        config
    }

    #[test]
    fn test_overrides_apply_over_config() {
        let args = ServeArgs {
            host: Some("0.0.0.0".to_string()),
            port: None,
        };
        let http = args.http_config(&Config::default());
        assert_eq!(http.host, "0.0.0.0");
        assert_eq!(http.port, 8080);
    }

    #[tokio::test]
    async fn test_startup_seeds_sample_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        run(local_args(), &config, async {}).await.unwrap();

        let pool = initialize_database(&config.database.url(), None).await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sample_data")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 8);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_seeding_failure_does_not_abort_startup() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let pool = initialize_database(&config.database.url(), None).await.unwrap();
        sqlx::query("DROP TABLE sample_data").execute(&pool).await.unwrap();
        pool.close().await;

        run(local_args(), &config, async {}).await.unwrap();
    }
}
