//! cacheperf CLI entry point.

use clap::Parser;

use cacheperf::cli::{commands, handle_error, Cli, Commands};
use cacheperf::infrastructure::config::ConfigLoader;
use cacheperf::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, &config, cli.json).await,
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Seed => commands::seed::execute(&config, cli.json).await,
        Commands::Stats(args) => commands::stats::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
