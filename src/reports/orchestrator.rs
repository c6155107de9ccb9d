//! Report orchestration per reporting target
//!
//! Building a report is read-only and depends only on the store snapshot,
//! the window settings and `now`, so the same target always yields the same
//! statistics. Persistence is left to the caller.

use super::aggregators::aggregate;
use super::categories::resolve_drop_queries;
use super::summary::{compose_summary, grade_breakdown};
use super::window::{select_window, LogFilter, LogSet, WindowSettings};
use crate::errors::AppResult;
use crate::types::report::{RiftSummaryReport, SUMMARY_GRADE_LABEL};
use crate::types::{
    LevelDropReport, LogType, NewLevelReport, ReportPayload, RiftGrade, RiftReportEntry,
};
use rusqlite::Connection;
use tracing::debug;

/// Summary plus every supported category's statistics for one log set
pub fn level_drop_report(conn: &Connection, log_set: &LogSet) -> AppResult<LevelDropReport> {
    let log_count = log_set.log_count();
    let queries = resolve_drop_queries(conn, log_set);

    let summary = compose_summary(&queries, log_count)?;
    let mut report = LevelDropReport::new(summary);

    for query in &queries {
        if let Some(category_report) = aggregate(query, log_count)? {
            report.insert(category_report);
        }
    }

    Ok(report)
}

/// Report over a dungeon level's successful runs
pub fn build_dungeon_report(
    conn: &Connection,
    level_id: i64,
    settings: &WindowSettings,
    now: i64,
) -> AppResult<Option<NewLevelReport>> {
    let window = match select_window(conn, &LogFilter::dungeon(level_id), settings, now)? {
        Some(window) => window,
        None => {
            debug!("Skipping dungeon level {}: no successful runs", level_id);
            return Ok(None);
        }
    };

    let log_set = LogSet::single(window);
    let report = level_drop_report(conn, &log_set)?;

    Ok(Some(NewLevelReport {
        level_id,
        log_type: LogType::Dungeon,
        start_timestamp: log_set.start_timestamp(),
        end_timestamp: log_set.end_timestamp(),
        log_count: log_set.log_count(),
        unique_contributors: log_set.unique_contributors(conn)?,
        report: ReportPayload::Level(report),
    }))
}

/// Per-grade reports for a rift level, followed by the cross-grade summary
///
/// Grades without records are left out of the sequence. The report header
/// covers the union of every grade's window.
pub fn build_rift_report(
    conn: &Connection,
    level_id: i64,
    settings: &WindowSettings,
    now: i64,
) -> AppResult<Option<NewLevelReport>> {
    let mut grade_windows = Vec::new();
    for grade in RiftGrade::ALL {
        if let Some(window) = select_window(conn, &LogFilter::rift(level_id, *grade), settings, now)? {
            grade_windows.push((*grade, window));
        }
    }

    let union = match LogSet::union(grade_windows.iter().map(|(_, w)| w.clone()).collect()) {
        Some(union) => union,
        None => {
            debug!("Skipping rift level {}: no runs at any grade", level_id);
            return Ok(None);
        }
    };

    let mut entries = Vec::with_capacity(grade_windows.len() + 1);
    for (grade, window) in &grade_windows {
        let grade_set = LogSet::single(window.clone());
        entries.push(RiftReportEntry::Grade {
            grade: grade.label().to_string(),
            report: level_drop_report(conn, &grade_set)?,
        });
    }

    let union_queries = resolve_drop_queries(conn, &union);
    entries.push(RiftReportEntry::Summary {
        grade: SUMMARY_GRADE_LABEL.to_string(),
        report: RiftSummaryReport {
            summary: compose_summary(&union_queries, union.log_count())?,
            grades: grade_breakdown(conn, &union, &grade_windows)?,
        },
    });

    Ok(Some(NewLevelReport {
        level_id,
        log_type: LogType::RiftDungeon,
        start_timestamp: union.start_timestamp(),
        end_timestamp: union.end_timestamp(),
        log_count: union.log_count(),
        unique_contributors: union.unique_contributors(conn)?,
        report: ReportPayload::Rift(entries),
    }))
}

/// Build the report for one target of a log family
pub fn build_report(
    conn: &Connection,
    log_type: LogType,
    level_id: i64,
    settings: &WindowSettings,
    now: i64,
) -> AppResult<Option<NewLevelReport>> {
    match log_type {
        LogType::Dungeon => build_dungeon_report(conn, level_id, settings, now),
        LogType::RiftDungeon => build_rift_report(conn, level_id, settings, now),
    }
}
