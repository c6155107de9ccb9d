//! Database trait abstractions grouping the store's operations.

use crate::errors::AppResult;
use crate::types::{
    Dungeon, GameItem, Level, LevelReport, LogType, Monster, NewDungeonLog, NewLevelReport,
    NewRiftDungeonLog, ReportHeader, SecretDungeon,
};

/// Catalog storage and lookup
///
/// Writes exist for the catalog importer and test fixtures; the report
/// engine only reads.
pub trait CatalogOperations {
    fn insert_dungeon(&mut self, dungeon: &Dungeon) -> AppResult<()>;

    fn insert_level(&mut self, level: &Level) -> AppResult<()>;

    fn insert_monster(&mut self, monster: &Monster) -> AppResult<()>;

    fn insert_game_item(&mut self, item: &GameItem) -> AppResult<()>;

    fn insert_secret_dungeon(&mut self, secret_dungeon: &SecretDungeon) -> AppResult<()>;

    fn get_monster(&self, id: i64) -> AppResult<Option<Monster>>;

    fn get_game_item(&self, id: i64) -> AppResult<Option<GameItem>>;

    fn get_level(&self, id: i64) -> AppResult<Option<Level>>;
}

/// Log and drop record ingestion, and discovery of reporting targets
pub trait LogOperations {
    /// Insert a dungeon log and its drops atomically, returning the log id
    fn insert_dungeon_log(&mut self, log: &NewDungeonLog) -> AppResult<i64>;

    /// Insert a rift dungeon log and its drops atomically, returning the log id
    fn insert_rift_dungeon_log(&mut self, log: &NewRiftDungeonLog) -> AppResult<i64>;

    /// Insert many dungeon logs in a single transaction
    fn insert_dungeon_logs_batch(&mut self, logs: &[NewDungeonLog]) -> AppResult<usize>;

    /// Insert many rift dungeon logs in a single transaction
    fn insert_rift_dungeon_logs_batch(&mut self, logs: &[NewRiftDungeonLog]) -> AppResult<usize>;

    /// Levels with at least one log of the given family, ascending
    fn levels_with_logs(&self, log_type: LogType) -> AppResult<Vec<i64>>;

    /// Total logs of a family recorded for a level
    fn count_logs(&self, log_type: LogType, level_id: i64) -> AppResult<usize>;
}

/// Report persistence
pub trait ReportOperations {
    /// Persist a report in one atomic insert, returning its id
    fn insert_report(&mut self, report: &NewLevelReport, generated_on: i64) -> AppResult<i64>;

    /// Most recently generated report for a level and family
    fn latest_report(&self, level_id: i64, log_type: LogType) -> AppResult<Option<LevelReport>>;

    /// Report headers, newest first, optionally for one level
    fn list_report_headers(&self, level_id: Option<i64>) -> AppResult<Vec<ReportHeader>>;

    fn count_reports(&self, level_id: i64, log_type: LogType) -> AppResult<usize>;
}
