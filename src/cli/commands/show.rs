use super::{parse_format, parse_single_kind, resolve_db_path};
use crate::config::AppConfig;
use crate::database::{Database, ReportOperations};
use crate::errors::{AppError, AppResult};
use crate::reports::ReportFormatter;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ShowCommand {
    /// Level id
    #[arg(long)]
    level: i64,

    /// Log family: dungeon or rift
    #[arg(long, default_value = "dungeon")]
    kind: String,

    /// Output format: console or json
    #[arg(long, default_value = "console")]
    format: String,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,
}

impl ShowCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::get_defaults();
        let db_path = resolve_db_path(&self.database_path, &app_config);
        let log_type = parse_single_kind(&self.kind)?;

        let db = Database::new(&db_path)?;
        let report = db.latest_report(self.level, log_type)?.ok_or_else(|| {
            AppError::InvalidData(format!(
                "No {} report found for level {}",
                log_type, self.level
            ))
        })?;

        print!(
            "{}",
            ReportFormatter::format_report(&report, &parse_format(&self.format))?
        );
        Ok(())
    }
}
