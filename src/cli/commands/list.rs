use super::{parse_format, resolve_db_path};
use crate::config::AppConfig;
use crate::database::{Database, ReportOperations};
use crate::errors::AppResult;
use crate::reports::ReportFormatter;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ListCommand {
    /// Only list reports for this level
    #[arg(long)]
    level: Option<i64>,

    /// Output format: console or json
    #[arg(long, default_value = "console")]
    format: String,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,
}

impl ListCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::get_defaults();
        let db = Database::new(&resolve_db_path(&self.database_path, &app_config))?;
        let headers = db.list_report_headers(self.level)?;
        print!(
            "{}",
            ReportFormatter::format_headers(&headers, &parse_format(&self.format))?
        );
        Ok(())
    }
}
