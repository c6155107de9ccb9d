use super::{parse_kinds, resolve_db_path};
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::reports::{OutputFormat, ReportEngine, ReportFormatter};
use crate::utils::time::now_timestamp;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct GenerateCommand {
    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Log family to report on: dungeon, rift or all
    #[arg(long, default_value = "all")]
    kind: String,

    /// Preferred window length in days (overrides config.toml)
    #[arg(long)]
    timespan_days: Option<u32>,

    /// Minimum number of logs per report (overrides config.toml)
    #[arg(long)]
    minimum_count: Option<usize>,

    /// Concurrent report builders; 1 builds sequentially (overrides config.toml)
    #[arg(long)]
    workers: Option<usize>,
}

impl GenerateCommand {
    pub async fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::get_defaults();

        // CLI arguments override config values
        let mut reporting = app_config.reporting.clone();
        if let Some(days) = self.timespan_days {
            reporting.timespan_days = days;
        }
        if let Some(minimum) = self.minimum_count {
            reporting.minimum_count = minimum;
        }
        if let Some(workers) = self.workers {
            reporting.workers = workers;
        }
        reporting.validate().map_err(AppError::Config)?;

        let db_path = resolve_db_path(&self.database_path, &app_config);
        let log_types = parse_kinds(&self.kind)?;

        info!("Configuration:");
        info!("  Database: {}", db_path);
        info!("  Timespan: {} days", reporting.timespan_days);
        info!("  Minimum count: {}", reporting.minimum_count);
        info!("  Workers: {}", reporting.workers);

        let mut engine = ReportEngine::new(&db_path, reporting.window_settings())?;
        let stats = engine
            .generate_families(&log_types, now_timestamp(), reporting.workers)
            .await?;

        print!(
            "{}",
            ReportFormatter::format_generation_stats(&stats, &OutputFormat::Console)?
        );
        Ok(())
    }
}
