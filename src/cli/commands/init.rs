//! Implementation of the `cacheperf init` command.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::setup::{create_config_dir, create_config_file, run_migrations, SetupPaths};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub config_file: PathBuf,
    pub config_written: bool,
    pub database_path: String,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.config_written {
            lines.push(format!("\nWrote {}", self.config_file.display()));
        } else {
            lines.push(format!(
                "\nKept existing {} (use --force to overwrite)",
                self.config_file.display()
            ));
        }
        lines.push(format!("Database ready at {}", self.database_path));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let paths = SetupPaths::new()?;
    let reinitializing = paths.is_initialized();

    create_config_dir(&paths)?;
    let config_written = create_config_file(&paths, args.force)?;
    run_migrations(config).await?;

    let output_data = InitOutput {
        success: true,
        message: if reinitializing && args.force {
            "Project reinitialized successfully.".to_string()
        } else {
            "Project initialized successfully.".to_string()
        },
        config_file: paths.config_file,
        config_written,
        database_path: config.database.path.clone(),
    };

    output(&output_data, json_mode);
    Ok(())
}
