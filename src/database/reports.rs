//! Report operations - persistence and retrieval of generated reports.

use crate::database::traits::ReportOperations;
use crate::database::Database;
use crate::errors::AppResult;
use crate::types::{LevelReport, LogType, NewLevelReport, ReportHeader, ReportPayload};
use rusqlite::{params, OptionalExtension, Row};
use std::str::FromStr;

const HEADER_COLUMNS: &str = "id, level_id, log_type, generated_on, start_timestamp, \
                              end_timestamp, log_count, unique_contributors";

/// Raw header columns; the log type is parsed outside the row mapper
type RawHeader = (i64, i64, String, i64, i64, i64, i64, i64);

fn read_raw_header(row: &Row) -> rusqlite::Result<RawHeader> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn into_header(raw: RawHeader) -> AppResult<ReportHeader> {
    let (id, level_id, log_type, generated_on, start_timestamp, end_timestamp, log_count, unique_contributors) =
        raw;
    Ok(ReportHeader {
        id,
        level_id,
        log_type: LogType::from_str(&log_type)?,
        generated_on,
        start_timestamp,
        end_timestamp,
        log_count: log_count as usize,
        unique_contributors: unique_contributors as usize,
    })
}

impl ReportOperations for Database {
    fn insert_report(&mut self, report: &NewLevelReport, generated_on: i64) -> AppResult<i64> {
        let payload = serde_json::to_string(&report.report)?;

        self.execute_transaction(|tx| {
            tx.execute(
                r#"
                INSERT INTO level_reports (
                    level_id, log_type, generated_on, start_timestamp, end_timestamp,
                    log_count, unique_contributors, report
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    report.level_id,
                    report.log_type.as_str(),
                    generated_on,
                    report.start_timestamp,
                    report.end_timestamp,
                    report.log_count as i64,
                    report.unique_contributors as i64,
                    payload,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn latest_report(&self, level_id: i64, log_type: LogType) -> AppResult<Option<LevelReport>> {
        let row = self
            .connection()
            .query_row(
                &format!(
                    r#"
                    SELECT {}, report FROM level_reports
                    WHERE level_id = ?1 AND log_type = ?2
                    ORDER BY generated_on DESC, id DESC
                    LIMIT 1
                    "#,
                    HEADER_COLUMNS
                ),
                params![level_id, log_type.as_str()],
                |row| Ok((read_raw_header(row)?, row.get::<_, String>(8)?)),
            )
            .optional()?;

        row.map(|(raw, payload)| {
            Ok(LevelReport {
                header: into_header(raw)?,
                report: serde_json::from_str::<ReportPayload>(&payload)?,
            })
        })
        .transpose()
    }

    fn list_report_headers(&self, level_id: Option<i64>) -> AppResult<Vec<ReportHeader>> {
        let filter = match level_id {
            Some(level_id) => format!("WHERE level_id = {}", level_id),
            None => String::new(),
        };
        let mut stmt = self.connection().prepare(&format!(
            "SELECT {} FROM level_reports {} ORDER BY generated_on DESC, id DESC",
            HEADER_COLUMNS, filter
        ))?;
        let raw = stmt
            .query_map([], read_raw_header)?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter().map(into_header).collect()
    }

    fn count_reports(&self, level_id: i64, log_type: LogType) -> AppResult<usize> {
        let count: i64 = self.connection().query_row(
            "SELECT COUNT(*) FROM level_reports WHERE level_id = ?1 AND log_type = ?2",
            params![level_id, log_type.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
