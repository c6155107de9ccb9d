pub mod config;
pub mod generate;
pub mod list;
pub mod show;

use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::reports::OutputFormat;
use crate::types::LogType;
use std::path::PathBuf;

// ===== Helper Functions =====

/// Database path from the CLI argument, falling back to configuration
pub(crate) fn resolve_db_path(cli_path: &Option<PathBuf>, app_config: &AppConfig) -> String {
    cli_path
        .as_ref()
        .unwrap_or(&app_config.database.default_path)
        .to_string_lossy()
        .to_string()
}

/// Parse output format string to OutputFormat enum
pub(crate) fn parse_format(format_str: &str) -> OutputFormat {
    match format_str.to_lowercase().as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Console,
    }
}

/// Parse a `--kind` value: `dungeon`, `rift` or `all`
pub(crate) fn parse_kinds(kind: &str) -> AppResult<Vec<LogType>> {
    match kind.to_lowercase().as_str() {
        "dungeon" => Ok(vec![LogType::Dungeon]),
        "rift" | "rift_dungeon" => Ok(vec![LogType::RiftDungeon]),
        "all" => Ok(LogType::ALL.to_vec()),
        other => Err(AppError::Config(format!(
            "Unknown report kind '{}': expected dungeon, rift or all",
            other
        ))),
    }
}

/// Parse a `--kind` value naming exactly one log family
pub(crate) fn parse_single_kind(kind: &str) -> AppResult<LogType> {
    match parse_kinds(kind)?.as_slice() {
        [log_type] => Ok(*log_type),
        _ => Err(AppError::Config(
            "Expected a single report kind: dungeon or rift".to_string(),
        )),
    }
}
