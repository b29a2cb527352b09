//! Command-line interface.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{init::InitArgs, serve::ServeArgs, stats::StatsArgs};

#[derive(Parser, Debug)]
#[command(name = "cacheperf", version, about = "Cached vs. uncached data-access latency harness")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .cacheperf/
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the default configuration and create the database
    Init(InitArgs),
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Insert the sample catalogue if the store is empty
    Seed,
    /// Print cached vs. uncached statistics
    Stats(StatsArgs),
}

/// Report a command failure and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cacheperf", "stats", "--api", "getDataById", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Stats(args) => assert_eq!(args.api.as_deref(), Some("getDataById")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["cacheperf", "--config", "alt.yaml", "serve", "--port", "9000"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_init_force() {
        let cli = Cli::try_parse_from(["cacheperf", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Init(InitArgs { force: true })));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["cacheperf", "bench"]).is_err());
    }
}
