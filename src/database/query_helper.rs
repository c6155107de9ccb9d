//! Query helper utilities for common database patterns
//!
//! Consolidates the query shapes repeated across the aggregators:
//! - Row counting over a table (or aliased table expression) with a filter
//! - Single aggregate queries (SUM, AVG, MIN, MAX) with NULL defaults
//! - Query collection with mapping

use crate::errors::AppResult;
use rusqlite::{Connection, Row};

/// Helper trait for common database query patterns
///
/// Implemented for `rusqlite::Connection`.
///
/// ## Usage Examples
///
/// ```ignore
/// use crate::database::QueryHelper;
///
/// // Count rows
/// let total = conn.count_rows("item_drops", None)?;
/// let scoped = conn.count_rows("item_drops d", Some("d.log_type = 'dungeon'"))?;
///
/// // Safe aggregates (NULL becomes default)
/// let quantity = conn.safe_aggregate::<i64>("SELECT SUM(quantity) FROM item_drops", 0i64)?;
///
/// // Collect multiple rows
/// let per_item = conn.query_collect(
///     "SELECT item_id, COUNT(*) FROM item_drops GROUP BY item_id",
///     |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
/// )?;
/// ```
pub trait QueryHelper {
    // ============================================================
    // PATTERN 1: Row Counting
    // ============================================================

    /// Query a COUNT(*) result
    ///
    /// # Arguments
    /// * `table` - Table name, optionally aliased (e.g., "rune_drops d")
    /// * `where_clause` - Optional WHERE condition
    fn count_rows(&self, table: &str, where_clause: Option<&str>) -> AppResult<i64>;

    // ============================================================
    // PATTERN 2: Safe Aggregates with Defaults
    // ============================================================

    /// Execute aggregate query returning optional value, NULL becomes `default`
    ///
    /// For SUM, AVG, MIN, MAX which return NULL on empty input.
    fn safe_aggregate<T>(&self, sql: &str, default: T) -> AppResult<T>
    where
        T: rusqlite::types::FromSql + Copy;

    // ============================================================
    // PATTERN 3: Multi-Row Collection with Mapping
    // ============================================================

    /// Execute query returning multiple rows, collecting into Vec
    fn query_collect<T, F>(&self, sql: &str, mapper: F) -> AppResult<Vec<T>>
    where
        F: FnMut(&Row) -> rusqlite::Result<T>;
}

impl QueryHelper for Connection {
    fn count_rows(&self, table: &str, where_clause: Option<&str>) -> AppResult<i64> {
        let sql = if let Some(where_part) = where_clause {
            format!("SELECT COUNT(*) FROM {} WHERE {}", table, where_part)
        } else {
            format!("SELECT COUNT(*) FROM {}", table)
        };

        self.query_row(&sql, [], |row| row.get(0))
            .map_err(Into::into)
    }

    fn safe_aggregate<T>(&self, sql: &str, default: T) -> AppResult<T>
    where
        T: rusqlite::types::FromSql + Copy,
    {
        let result: Option<T> = self.query_row(sql, [], |row| row.get(0))?;
        Ok(result.unwrap_or(default))
    }

    fn query_collect<T, F>(&self, sql: &str, mut mapper: F) -> AppResult<Vec<T>>
    where
        F: FnMut(&Row) -> rusqlite::Result<T>,
    {
        let mut stmt = self.prepare(sql)?;
        let results = stmt
            .query_map([], &mut mapper)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(results)
    }
}
