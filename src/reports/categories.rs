//! Drop category resolution
//!
//! Maps a log family to the ordered drop categories it can carry, and scopes
//! each category's drop table to a log set. The mapping is closed: adding a
//! category means adding it here and to the aggregator dispatch table, which
//! `validate_dispatch_table` checks at engine start-up.

use super::window::LogSet;
use crate::database::QueryHelper;
use crate::errors::AppResult;
use crate::types::{DropCategory, LogType};
use rusqlite::Connection;

const DUNGEON_CATEGORIES: &[DropCategory] = &[
    DropCategory::Item,
    DropCategory::Monster,
    DropCategory::MonsterPiece,
    DropCategory::Rune,
    DropCategory::RuneCraft,
    DropCategory::SecretDungeon,
];

const RIFT_DUNGEON_CATEGORIES: &[DropCategory] = &[
    DropCategory::Item,
    DropCategory::Monster,
    DropCategory::Rune,
    DropCategory::RuneCraft,
];

/// Categories a log family carries, in report order
pub fn supported_categories(log_type: LogType) -> &'static [DropCategory] {
    match log_type {
        LogType::Dungeon => DUNGEON_CATEGORIES,
        LogType::RiftDungeon => RIFT_DUNGEON_CATEGORIES,
    }
}

/// Alias every drop query uses for its category table
pub const DROP_ALIAS: &str = "d";

/// A category's drop records restricted to a log set
#[derive(Debug, Clone, Copy)]
pub struct DropQuery<'a> {
    conn: &'a Connection,
    category: DropCategory,
    log_set: &'a LogSet,
}

impl<'a> DropQuery<'a> {
    pub fn new(conn: &'a Connection, category: DropCategory, log_set: &'a LogSet) -> Self {
        Self {
            conn,
            category,
            log_set,
        }
    }

    pub fn category(&self) -> DropCategory {
        self.category
    }

    pub fn conn(&self) -> &'a Connection {
        self.conn
    }

    pub fn log_set(&self) -> &'a LogSet {
        self.log_set
    }

    /// Category table, aliased as `d`
    pub fn from_clause(&self) -> String {
        format!("{} {}", self.category.table(), DROP_ALIAS)
    }

    /// Condition restricting `d` to the log set
    pub fn where_clause(&self) -> String {
        self.log_set.drop_filter(DROP_ALIAS)
    }

    /// Build `SELECT {columns} FROM <table> d {joins} WHERE <scope> {tail}`
    pub fn select(&self, columns: &str, joins: &str, tail: &str) -> String {
        format!(
            "SELECT {} FROM {} {} WHERE {} {}",
            columns,
            self.from_clause(),
            joins,
            self.where_clause(),
            tail
        )
    }

    /// Number of drop records in scope
    pub fn count(&self) -> AppResult<usize> {
        let count = self
            .conn
            .count_rows(&self.from_clause(), Some(&self.where_clause()))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.count()? == 0)
    }
}

/// One drop query per category the log set's family supports, in order
pub fn resolve_drop_queries<'a>(conn: &'a Connection, log_set: &'a LogSet) -> Vec<DropQuery<'a>> {
    supported_categories(log_set.log_type())
        .iter()
        .map(|category| DropQuery::new(conn, *category, log_set))
        .collect()
}
