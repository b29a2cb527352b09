//! Implementation of the `cacheperf seed` command.

use anyhow::{Context, Result};

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::setup::AppContext;

#[derive(Debug, serde::Serialize)]
pub struct SeedOutput {
    pub inserted: usize,
    pub total: u64,
}

impl CommandOutput for SeedOutput {
    fn to_human(&self) -> String {
        if self.inserted == 0 {
            format!("Sample data already present ({} items), nothing inserted.", self.total)
        } else {
            format!("Inserted {} sample items.", self.inserted)
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let context = AppContext::build(config).await?;
    let inserted = context.seeder().seed_if_empty().await.context("Failed to seed sample data")?;
    let total = context.items.count().await.context("Failed to count sample data")?;

    output(&SeedOutput { inserted, total }, json_mode);
    context.pool.close().await;
    Ok(())
}
