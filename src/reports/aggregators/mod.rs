//! Category aggregators
//!
//! One aggregation strategy per drop category, selected through the closed
//! `AGGREGATORS` dispatch table. Every aggregator takes a scoped drop query
//! plus the window's log count, returns `None` for an empty query, and
//! computes every rate against the log count.

mod items;
mod monster_pieces;
mod monsters;
mod rune_crafts;
mod runes;
mod secret_dungeons;

use super::categories::{supported_categories, DropQuery};
use super::summary::SUMMARY_TABLE_BUILDERS;
use crate::errors::{AppError, AppResult};
use crate::types::{CategoryReport, DropCategory, LogType};
use tracing::warn;

pub type AggregateFn = fn(&DropQuery<'_>, usize) -> AppResult<Option<CategoryReport>>;

/// Aggregator per drop category
pub const AGGREGATORS: &[(DropCategory, AggregateFn)] = &[
    (DropCategory::Item, items::aggregate),
    (DropCategory::Monster, monsters::aggregate),
    (DropCategory::MonsterPiece, monster_pieces::aggregate),
    (DropCategory::Rune, runes::aggregate),
    (DropCategory::RuneCraft, rune_crafts::aggregate),
    (DropCategory::SecretDungeon, secret_dungeons::aggregate),
];

pub fn aggregator_for(category: DropCategory) -> AppResult<AggregateFn> {
    AGGREGATORS
        .iter()
        .find(|(entry, _)| *entry == category)
        .map(|(_, aggregate)| *aggregate)
        .ok_or_else(|| AppError::UnknownDropCategory(category.key().to_string()))
}

/// Run the category's aggregator over a drop query
pub fn aggregate(query: &DropQuery<'_>, log_count: usize) -> AppResult<Option<CategoryReport>> {
    let aggregate = aggregator_for(query.category())?;
    let report = aggregate(query, log_count)?;

    if let Some(report) = &report {
        if report.category() != query.category() {
            return Err(AppError::DispatchTable(format!(
                "aggregator for {} produced a {} report",
                query.category(),
                report.category()
            )));
        }
    }
    Ok(report)
}

/// Check every supported category has exactly one aggregator and one summary builder
pub fn validate_dispatch_table() -> AppResult<()> {
    for log_type in LogType::ALL {
        for category in supported_categories(*log_type) {
            let aggregators = AGGREGATORS.iter().filter(|(c, _)| c == category).count();
            let builders = SUMMARY_TABLE_BUILDERS
                .iter()
                .filter(|(c, _)| c == category)
                .count();

            if aggregators != 1 || builders != 1 {
                return Err(AppError::DispatchTable(format!(
                    "{} category {} has {} aggregators and {} summary builders (expected one each)",
                    log_type, category, aggregators, builders
                )));
            }
        }
    }
    Ok(())
}

/// Resolve a catalog reference read through a LEFT JOIN
pub(crate) fn lookup<T>(value: Option<T>, entity: &'static str, id: i64) -> AppResult<T> {
    value.ok_or(AppError::CatalogLookup { entity, id })
}

/// Per-entity counts must not exceed the category's drop records in scope
pub(crate) fn reconcile_counts(
    category: DropCategory,
    entity_counts: impl IntoIterator<Item = usize>,
    drop_count: usize,
) -> AppResult<()> {
    let total: usize = entity_counts.into_iter().sum();
    if total > drop_count {
        warn!(
            "{} counts sum to {} but only {} drops are in scope",
            category, total, drop_count
        );
        return Err(AppError::InvalidData(format!(
            "{} counts ({}) exceed drop records in window ({})",
            category, total, drop_count
        )));
    }
    Ok(())
}

/// Drop chance must be a percentage
pub(crate) fn check_drop_chance(category: DropCategory, drop_chance: f64) -> AppResult<()> {
    if !(0.0..=100.0).contains(&drop_chance) {
        warn!("{} drop chance out of range: {}", category, drop_chance);
        return Err(AppError::InvalidData(format!(
            "{} drop chance {} outside [0, 100]",
            category, drop_chance
        )));
    }
    Ok(())
}
