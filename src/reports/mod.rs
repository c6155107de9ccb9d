//! Drop-log report generation engine
//!
//! ## Overview
//!
//! Reports are built in five steps, leaves first:
//!
//! - **Window selection** (`window`) - which recent logs a target is reported on
//! - **Category resolution** (`categories`) - one scoped drop query per supported category
//! - **Aggregation** (`aggregators`) - per-category statistics through a closed dispatch table
//! - **Summary composition** (`summary`) - chart and table views, plus the cross-grade breakdown
//! - **Orchestration** (`orchestrator`) - per-level and per-grade reports for one target
//!
//! `ReportEngine` drives a full generation pass over every target of a log
//! family and persists one report per non-empty target.
//!
//! ## Usage
//!
//! ```rust
//! use droplog_reports::errors::AppResult;
//! use droplog_reports::reports::{ReportEngine, WindowSettings};
//! use droplog_reports::types::LogType;
//! use droplog_reports::utils::time::now_timestamp;
//!
//! fn example() -> AppResult<()> {
//!     let mut engine = ReportEngine::new(":memory:", WindowSettings::default())?;
//!     let stats = engine.generate(LogType::Dungeon, now_timestamp())?;
//!     assert_eq!(stats.reports_created, 0);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

mod aggregators;
pub mod categories;
pub mod formatter;
pub mod histogram;
pub mod orchestrator;
pub mod summary;
pub mod window;

pub use aggregators::{aggregate, validate_dispatch_table};
pub use categories::{resolve_drop_queries, supported_categories, DropQuery};
pub use formatter::{OutputFormat, ReportFormatter};
pub use orchestrator::{build_report, level_drop_report};
pub use summary::compose_summary;
pub use window::{select_window, LogFilter, LogSet, LogWindow, WindowBound, WindowSettings};

use crate::database::{Database, LogOperations, ReportOperations};
use crate::errors::{AppError, AppResult};
use crate::types::{GenerationStats, LogType, NewLevelReport};
use crate::utils::time::now_timestamp;
use futures::stream::StreamExt;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Main report engine: generates and persists reports for every target
pub struct ReportEngine {
    database: Database,
    database_path: String,
    settings: WindowSettings,
}

impl ReportEngine {
    /// Open the store and check the category dispatch tables
    pub fn new(database_path: &str, settings: WindowSettings) -> AppResult<Self> {
        validate_dispatch_table()?;
        let database = Database::new(database_path)?;
        Ok(Self {
            database,
            database_path: database_path.to_string(),
            settings,
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.database
    }

    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    fn persist(&mut self, report: &NewLevelReport) -> AppResult<i64> {
        let id = self.database.insert_report(report, now_timestamp())?;
        info!(
            "Created {} report {} for level {} ({} logs, {} contributors)",
            report.log_type, id, report.level_id, report.log_count, report.unique_contributors
        );
        Ok(id)
    }

    /// Generate reports for every target of a log family, one at a time
    pub fn generate(&mut self, log_type: LogType, now: i64) -> AppResult<GenerationStats> {
        let levels = self.database.levels_with_logs(log_type)?;
        let mut stats = GenerationStats {
            levels_considered: levels.len(),
            ..Default::default()
        };

        for level_id in levels {
            let built = build_report(
                self.database.connection(),
                log_type,
                level_id,
                &self.settings,
                now,
            )?;
            match built {
                Some(report) => {
                    self.persist(&report)?;
                    stats.reports_created += 1;
                }
                None => stats.levels_skipped += 1,
            }
        }

        Ok(stats)
    }

    /// Generate reports with `workers` concurrent builders
    ///
    /// Each builder opens its own read-only handle; reports are persisted
    /// afterwards on the engine's handle, in level order. When a builder
    /// fails, every report that was built is persisted before the first
    /// error is returned.
    pub async fn generate_parallel(
        &mut self,
        log_type: LogType,
        now: i64,
        workers: usize,
    ) -> AppResult<GenerationStats> {
        if self.database_path == ":memory:" {
            return Err(AppError::Config(
                "parallel generation requires an on-disk database".to_string(),
            ));
        }

        let levels = self.database.levels_with_logs(log_type)?;
        let mut stats = GenerationStats {
            levels_considered: levels.len(),
            ..Default::default()
        };

        debug!(
            "Building {} {} reports with {} workers",
            levels.len(),
            log_type,
            workers
        );

        let path = PathBuf::from(&self.database_path);
        let settings = self.settings;
        let results: Vec<AppResult<Option<NewLevelReport>>> = futures::stream::iter(levels)
            .map(|level_id| {
                let path = path.clone();
                async move {
                    tokio::task::spawn_blocking(move || {
                        let reader = Database::open_read_only(&path)?;
                        build_report(reader.connection(), log_type, level_id, &settings, now)
                    })
                    .await?
                }
            })
            .buffer_unordered(workers.max(1))
            .collect()
            .await;

        let mut built = Vec::with_capacity(results.len());
        let mut first_error = None;
        for result in results {
            match result {
                Ok(Some(report)) => built.push(report),
                Ok(None) => stats.levels_skipped += 1,
                Err(e) => {
                    error!("Report worker failed: {}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        // Reports built before a failure are still persisted
        built.sort_by_key(|report| report.level_id);
        for report in &built {
            self.persist(report)?;
            stats.reports_created += 1;
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(stats),
        }
    }

    /// Generate every requested family, sequentially or in parallel
    pub async fn generate_families(
        &mut self,
        log_types: &[LogType],
        now: i64,
        workers: usize,
    ) -> AppResult<GenerationStats> {
        let mut total = GenerationStats::default();
        for log_type in log_types {
            let stats = if workers > 1 {
                self.generate_parallel(*log_type, now, workers).await?
            } else {
                self.generate(*log_type, now)?
            };
            info!(
                "{}: {} reports created, {} levels skipped",
                log_type.display_name(),
                stats.reports_created,
                stats.levels_skipped
            );
            total.merge(&stats);
        }
        Ok(total)
    }
}
