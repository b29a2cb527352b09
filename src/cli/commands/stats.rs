//! Implementation of the `cacheperf stats` command.

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::Cell;

use crate::cli::output::{list_table, output, CommandOutput};
use crate::domain::models::{Config, PerformanceReport};
use crate::infrastructure::setup::AppContext;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Only report this API (e.g. getAllData); all recorded APIs otherwise
    #[arg(long, short)]
    pub api: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct StatsOutput {
    pub reports: Vec<PerformanceReport>,
}

impl CommandOutput for StatsOutput {
    fn to_human(&self) -> String {
        if self.reports.is_empty() {
            return "No measurements recorded yet.".to_string();
        }

        let mut table = list_table(&["api", "mode", "requests", "avg ms", "hits", "hit rate", "speedup"]);
        for report in &self.reports {
            let speedup = report.speedup.map_or_else(|| "-".to_string(), |s| format!("{s:.1}x"));
            table.add_row(vec![
                Cell::new(&report.api_name),
                Cell::new("with-cache"),
                Cell::new(report.with_cache.total_requests),
                Cell::new(format!("{:.1}", report.with_cache.avg_response_time)),
                Cell::new(report.with_cache.cache_hits),
                Cell::new(format!("{:.1}%", report.with_cache.cache_hit_rate)),
                Cell::new(speedup),
            ]);
            table.add_row(vec![
                Cell::new(""),
                Cell::new("without-cache"),
                Cell::new(report.without_cache.total_requests),
                Cell::new(format!("{:.1}", report.without_cache.avg_response_time)),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new(""),
            ]);
        }
        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.reports).unwrap_or_default()
    }
}

pub async fn execute(args: StatsArgs, config: &Config, json_mode: bool) -> Result<()> {
    let context = AppContext::build(config).await?;
    let statistics = &context.state.statistics;

    let reports = match args.api {
        Some(api) => vec![statistics.report(&api).await.context("Failed to build report")?],
        None => statistics.report_all().await.context("Failed to build reports")?,
    };

    output(&StatsOutput { reports }, json_mode);
    context.pool.close().await;
    Ok(())
}
