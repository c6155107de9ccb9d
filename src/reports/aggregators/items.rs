//! Item drop statistics: per item quantity range, drop chance and yield per run.

use super::{check_drop_chance, lookup, reconcile_counts};
use crate::database::QueryHelper;
use crate::errors::AppResult;
use crate::reports::categories::DropQuery;
use crate::types::report::ItemDropStats;
use crate::types::{CategoryReport, DropCategory};
use crate::utils::math::{drop_chance, per_run};

struct ItemRow {
    item_id: i64,
    name: Option<String>,
    icon: Option<String>,
    count: i64,
    min: i64,
    max: i64,
    avg: f64,
    total_quantity: i64,
    runs: i64,
}

pub fn aggregate(query: &DropQuery<'_>, log_count: usize) -> AppResult<Option<CategoryReport>> {
    let sql = query.select(
        "d.item_id, i.name, i.icon, COUNT(*), MIN(d.quantity), MAX(d.quantity), \
         AVG(d.quantity), SUM(d.quantity), COUNT(DISTINCT d.log_id)",
        "LEFT JOIN game_items i ON i.id = d.item_id",
        "GROUP BY d.item_id ORDER BY COUNT(*) DESC, d.item_id",
    );
    let rows = query.conn().query_collect(&sql, |row| {
        Ok(ItemRow {
            item_id: row.get(0)?,
            name: row.get(1)?,
            icon: row.get(2)?,
            count: row.get(3)?,
            min: row.get(4)?,
            max: row.get(5)?,
            avg: row.get(6)?,
            total_quantity: row.get(7)?,
            runs: row.get(8)?,
        })
    })?;

    if rows.is_empty() {
        return Ok(None);
    }

    let mut stats = Vec::with_capacity(rows.len());
    for row in rows {
        let count = row.count as usize;
        let chance = drop_chance(row.runs as usize, log_count);
        check_drop_chance(DropCategory::Item, chance)?;

        stats.push(ItemDropStats {
            item_id: row.item_id,
            name: lookup(row.name, "item", row.item_id)?,
            icon: lookup(row.icon, "item", row.item_id)?,
            count,
            min: row.min,
            max: row.max,
            avg: row.avg,
            drop_chance: chance,
            avg_per_run: per_run(row.total_quantity, log_count),
        });
    }

    reconcile_counts(
        DropCategory::Item,
        stats.iter().map(|s| s.count),
        query.count()?,
    )?;

    Ok(Some(CategoryReport::Items(stats)))
}
