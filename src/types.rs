//! Drop-Log Report Engine - Type System
//!
//! - `choices`: Coded game fields (rune set, quality, stats, grades) and labels
//! - `catalog`: Static catalog entities (monsters, items, levels)
//! - `logs`: Log record families and ingestion records
//! - `drops`: Drop categories and drop record schemas
//! - `report`: Report payloads and persisted report rows

pub mod catalog;
pub mod choices;
pub mod drops;
pub mod logs;
pub mod report;

pub use catalog::{Dungeon, GameItem, Level, Monster, SecretDungeon};
pub use choices::{CraftType, Element, ItemCategory, RiftGrade, RuneQuality, RuneStat, RuneType};
pub use drops::{
    DropCategory, DropRecord, ItemDrop, MonsterDrop, MonsterPieceDrop, RuneCraftDrop, RuneDrop,
    SecretDungeonDrop,
};
pub use logs::{LogRecord, LogType, NewDungeonLog, NewRiftDungeonLog};
pub use report::{
    CategoryReport, GenerationStats, LevelDropReport, LevelReport, NewLevelReport,
    ReportHeader, ReportPayload, ReportSummary, RiftReportEntry, SummaryTableEntry,
};
