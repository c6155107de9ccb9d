//! Log record families and the records ingestion writes for them

use super::choices::RiftGrade;
use super::drops::DropRecord;
use crate::errors::AppError;
use serde::{Deserialize, Serialize};

/// Family of log records a report is generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogType {
    Dungeon,
    RiftDungeon,
}

impl LogType {
    pub const ALL: &'static [LogType] = &[LogType::Dungeon, LogType::RiftDungeon];

    /// Tag stored on drop rows and report rows
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Dungeon => "dungeon",
            LogType::RiftDungeon => "rift_dungeon",
        }
    }

    /// Table holding this family's log records
    pub fn log_table(&self) -> &'static str {
        match self {
            LogType::Dungeon => "dungeon_logs",
            LogType::RiftDungeon => "rift_dungeon_logs",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LogType::Dungeon => "Dungeon",
            LogType::RiftDungeon => "Rift Dungeon",
        }
    }
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LogType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dungeon" => Ok(LogType::Dungeon),
            "rift_dungeon" => Ok(LogType::RiftDungeon),
            other => Err(AppError::InvalidData(format!("Unknown log type: {}", other))),
        }
    }
}

/// A completed dungeon run, as written by ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDungeonLog {
    pub wizard_id: i64,
    pub timestamp: i64,
    pub level_id: i64,
    pub success: bool,
    pub drops: Vec<DropRecord>,
}

/// A completed rift dungeon run, as written by ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRiftDungeonLog {
    pub wizard_id: i64,
    pub timestamp: i64,
    pub level_id: i64,
    pub grade: RiftGrade,
    pub drops: Vec<DropRecord>,
}

/// The columns of a log record the reporting engine reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,
    pub wizard_id: i64,
    pub timestamp: i64,
}
