//! Sampling window selection
//!
//! A window is the slice of one target's log records a report is computed
//! over. Records are ranked most recent first by `(timestamp DESC, id DESC)`,
//! which is a total order, so a count-bounded window is exact even when many
//! records share a timestamp.
//!
//! The window is never materialised as an id list: it is kept as a filter plus
//! a bound and rendered into an SQL subquery that downstream drop queries embed.

use crate::database::QueryHelper;
use crate::errors::AppResult;
use crate::types::{LogType, RiftGrade};
use crate::utils::time::days_to_seconds;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default lookback for time-bounded windows
pub const DEFAULT_TIMESPAN_DAYS: u32 = 14;

/// Default number of records a report should cover
pub const DEFAULT_MINIMUM_COUNT: usize = 2500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettings {
    pub timespan_secs: i64,
    pub minimum_count: usize,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            timespan_secs: days_to_seconds(DEFAULT_TIMESPAN_DAYS),
            minimum_count: DEFAULT_MINIMUM_COUNT,
        }
    }
}

/// The log records of one reporting target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFilter {
    pub log_type: LogType,
    pub level_id: i64,
    pub grade: Option<RiftGrade>,
    pub success_only: bool,
}

impl LogFilter {
    /// Successful attempts at a dungeon level
    pub fn dungeon(level_id: i64) -> Self {
        Self {
            log_type: LogType::Dungeon,
            level_id,
            grade: None,
            success_only: true,
        }
    }

    /// Rift attempts at a level that achieved one grade
    pub fn rift(level_id: i64, grade: RiftGrade) -> Self {
        Self {
            log_type: LogType::RiftDungeon,
            level_id,
            grade: Some(grade),
            success_only: false,
        }
    }

    /// WHERE fragment selecting the target's records up to `now`
    fn where_clause(&self, now: i64) -> String {
        let mut clause = format!("level_id = {} AND timestamp <= {}", self.level_id, now);
        if self.success_only {
            clause.push_str(" AND success = 1");
        }
        if let Some(grade) = self.grade {
            clause.push_str(&format!(" AND grade = {}", grade.code()));
        }
        clause
    }
}

/// How a window was bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBound {
    /// Every record at or after the cutoff timestamp
    Since(i64),
    /// The N most recent records
    MostRecent(usize),
}

/// A selected, non-empty window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogWindow {
    pub filter: LogFilter,
    pub bound: WindowBound,
    pub now: i64,
    pub log_count: usize,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub unique_contributors: usize,
}

impl LogWindow {
    /// Subquery yielding the ids of the window's log records
    pub fn ids_sql(&self) -> String {
        window_ids_sql(&self.filter, self.bound, self.now)
    }
}

fn window_ids_sql(filter: &LogFilter, bound: WindowBound, now: i64) -> String {
    let table = filter.log_type.log_table();
    let where_clause = filter.where_clause(now);
    match bound {
        WindowBound::Since(cutoff) => format!(
            "SELECT id FROM {} WHERE {} AND timestamp >= {}",
            table, where_clause, cutoff
        ),
        WindowBound::MostRecent(limit) => format!(
            "SELECT id FROM (SELECT id FROM {} WHERE {} ORDER BY timestamp DESC, id DESC LIMIT {})",
            table, where_clause, limit
        ),
    }
}

/// Select the window for one target
///
/// Time-bounded when the lookback already holds at least `minimum_count`
/// records, otherwise the `minimum_count` most recent records (all of them
/// when fewer exist). Returns `None` when the target has no records.
pub fn select_window(
    conn: &Connection,
    filter: &LogFilter,
    settings: &WindowSettings,
    now: i64,
) -> AppResult<Option<LogWindow>> {
    let table = filter.log_type.log_table();
    let cutoff = now - settings.timespan_secs;

    let recent = conn.count_rows(
        table,
        Some(&format!("{} AND timestamp >= {}", filter.where_clause(now), cutoff)),
    )? as usize;

    let bound = if recent > 0 && recent >= settings.minimum_count {
        WindowBound::Since(cutoff)
    } else {
        WindowBound::MostRecent(settings.minimum_count)
    };

    let ids = window_ids_sql(filter, bound, now);
    let (log_count, start, end, contributors): (i64, Option<i64>, Option<i64>, i64) = conn
        .query_row(
            &format!(
                "SELECT COUNT(*), MIN(timestamp), MAX(timestamp), COUNT(DISTINCT wizard_id)
                 FROM {} WHERE id IN ({})",
                table, ids
            ),
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

    let (start_timestamp, end_timestamp) = match (start, end) {
        (Some(start), Some(end)) if log_count > 0 => (start, end),
        _ => {
            debug!(
                "Empty window for {} level {} (grade {:?})",
                filter.log_type, filter.level_id, filter.grade
            );
            return Ok(None);
        }
    };

    debug!(
        "Window for {} level {}: {:?}, {} records",
        filter.log_type, filter.level_id, bound, log_count
    );

    Ok(Some(LogWindow {
        filter: *filter,
        bound,
        now,
        log_count: log_count as usize,
        start_timestamp,
        end_timestamp,
        unique_contributors: contributors as usize,
    }))
}

/// One or more windows of the same log family, aggregated together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSet {
    log_type: LogType,
    windows: Vec<LogWindow>,
}

impl LogSet {
    pub fn single(window: LogWindow) -> Self {
        Self {
            log_type: window.filter.log_type,
            windows: vec![window],
        }
    }

    /// Union of disjoint windows; `None` when empty or the families differ
    pub fn union(windows: Vec<LogWindow>) -> Option<Self> {
        let log_type = windows.first()?.filter.log_type;
        if windows.iter().any(|w| w.filter.log_type != log_type) {
            return None;
        }
        Some(Self { log_type, windows })
    }

    pub fn log_type(&self) -> LogType {
        self.log_type
    }

    pub fn windows(&self) -> &[LogWindow] {
        &self.windows
    }

    pub fn log_count(&self) -> usize {
        self.windows.iter().map(|w| w.log_count).sum()
    }

    pub fn start_timestamp(&self) -> i64 {
        self.windows
            .iter()
            .map(|w| w.start_timestamp)
            .min()
            .unwrap_or_default()
    }

    pub fn end_timestamp(&self) -> i64 {
        self.windows
            .iter()
            .map(|w| w.end_timestamp)
            .max()
            .unwrap_or_default()
    }

    /// Subquery yielding every log id in the set
    pub fn ids_sql(&self) -> String {
        self.windows
            .iter()
            .map(|w| w.ids_sql())
            .collect::<Vec<_>>()
            .join(" UNION ALL ")
    }

    /// WHERE fragment scoping a drop table (aliased `alias`) to this set
    pub fn drop_filter(&self, alias: &str) -> String {
        format!(
            "{alias}.log_type = '{}' AND {alias}.log_id IN ({})",
            self.log_type.as_str(),
            self.ids_sql(),
            alias = alias
        )
    }

    /// Distinct contributors across every window of the set
    pub fn unique_contributors(&self, conn: &Connection) -> AppResult<usize> {
        if let [window] = self.windows.as_slice() {
            return Ok(window.unique_contributors);
        }
        let count = conn.safe_aggregate::<i64>(
            &format!(
                "SELECT COUNT(DISTINCT wizard_id) FROM {} WHERE id IN ({})",
                self.log_type.log_table(),
                self.ids_sql()
            ),
            0,
        )?;
        Ok(count as usize)
    }
}
