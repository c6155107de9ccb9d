//! Summary composition
//!
//! The summary is a chart-ready list plus a per-category table. The table is
//! computed separately from the category aggregators: its row shapes differ
//! (icons on items, nested rune lists, secret dungeons by monster), so it is
//! not derived from their output.

use super::aggregators::{check_drop_chance, lookup, reconcile_counts};
use super::categories::{supported_categories, DropQuery};
use super::window::{LogSet, LogWindow};
use crate::database::QueryHelper;
use crate::errors::{AppError, AppResult};
use crate::types::report::{
    ChartEntry, GradeDropEntry, GradeDrops, GradeItemStats, GradeMonsterStats, LabelCount,
    SlotCount, SummaryItemRow, SummaryMonsterPieceRow, SummaryMonsterRow, SummaryRuneCraftRow,
    SummaryRuneTable, SummarySecretDungeonRow,
};
use crate::types::{
    CraftType, DropCategory, Element, ItemCategory, ReportSummary, RiftGrade, RuneQuality,
    RuneType, SummaryTableEntry,
};
use crate::utils::math::{drop_chance, per_run};
use rusqlite::Connection;
use std::collections::HashMap;
use tracing::debug;

pub type SummaryTableFn = fn(&DropQuery<'_>, usize) -> AppResult<Option<SummaryTableEntry>>;

/// Summary table builder per drop category
pub const SUMMARY_TABLE_BUILDERS: &[(DropCategory, SummaryTableFn)] = &[
    (DropCategory::Item, item_table),
    (DropCategory::Monster, monster_table),
    (DropCategory::MonsterPiece, monster_piece_table),
    (DropCategory::Rune, rune_table),
    (DropCategory::RuneCraft, rune_craft_table),
    (DropCategory::SecretDungeon, secret_dungeon_table),
];

fn summary_table_builder(category: DropCategory) -> AppResult<SummaryTableFn> {
    SUMMARY_TABLE_BUILDERS
        .iter()
        .find(|(entry, _)| *entry == category)
        .map(|(_, build)| *build)
        .ok_or_else(|| AppError::UnknownDropCategory(category.key().to_string()))
}

/// Compose `{chart, table}` over the resolved drop queries
pub fn compose_summary(queries: &[DropQuery<'_>], log_count: usize) -> AppResult<ReportSummary> {
    let mut summary = ReportSummary::default();

    for query in queries {
        let build_table = summary_table_builder(query.category())?;

        summary.chart.extend(chart_entries(query)?);

        if let Some(entry) = build_table(query, log_count)? {
            if entry.category() != query.category() {
                return Err(AppError::UnknownDropCategory(entry.category().key().to_string()));
            }
            summary.table.insert(entry);
        }
    }

    Ok(summary)
}

// ============================================================
// Chart
// ============================================================

fn chart_entries(query: &DropQuery<'_>) -> AppResult<Vec<ChartEntry>> {
    let conn = query.conn();
    match query.category() {
        DropCategory::Item => item_chart(query),
        DropCategory::Monster => conn.query_collect(
            &query.select(
                "d.grade, COUNT(*)",
                "",
                "GROUP BY d.grade ORDER BY COUNT(*) DESC, d.grade",
            ),
            |row| {
                Ok(ChartEntry {
                    name: format!("{}⭐ Monster", row.get::<_, i64>(0)?),
                    count: row.get::<_, i64>(1)? as usize,
                })
            },
        ),
        other => {
            let count = query.count()?;
            if count == 0 {
                return Ok(Vec::new());
            }
            Ok(vec![ChartEntry {
                name: other.display_name(),
                count,
            }])
        }
    }
}

/// Non-currency items by name, most dropped first
fn item_chart(query: &DropQuery<'_>) -> AppResult<Vec<ChartEntry>> {
    let rows = query.conn().query_collect(
        &query.select(
            "d.item_id, i.name, i.category, COUNT(*)",
            "LEFT JOIN game_items i ON i.id = d.item_id",
            "GROUP BY d.item_id",
        ),
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<i64>>(2)?,
                row.get::<_, i64>(3)? as usize,
            ))
        },
    )?;

    let mut by_name: HashMap<String, usize> = HashMap::new();
    for (item_id, name, category, count) in rows {
        let name = lookup(name, "item", item_id)?;
        if lookup(category, "item", item_id)? == ItemCategory::Currency.code() {
            continue;
        }
        *by_name.entry(name).or_default() += count;
    }

    let mut chart: Vec<ChartEntry> = by_name
        .into_iter()
        .map(|(name, count)| ChartEntry { name, count })
        .collect();
    chart.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    Ok(chart)
}

// ============================================================
// Table builders
// ============================================================

struct ItemTableRow {
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

fn item_table(query: &DropQuery<'_>, log_count: usize) -> AppResult<Option<SummaryTableEntry>> {
    let rows = query.conn().query_collect(
        &query.select(
            "d.item_id, i.name, i.icon, COUNT(*), MIN(d.quantity), MAX(d.quantity), \
             AVG(d.quantity), SUM(d.quantity), COUNT(DISTINCT d.log_id)",
            "LEFT JOIN game_items i ON i.id = d.item_id",
            "GROUP BY d.item_id ORDER BY i.category, COUNT(*) DESC, d.item_id",
        ),
        |row| {
            Ok(ItemTableRow {
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
        },
    )?;

    if rows.is_empty() {
        return Ok(None);
    }

    let mut table = Vec::with_capacity(rows.len());
    for row in rows {
        let count = row.count as usize;
        let chance = drop_chance(row.runs as usize, log_count);
        check_drop_chance(DropCategory::Item, chance)?;
        table.push(SummaryItemRow {
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

    reconcile_counts(DropCategory::Item, table.iter().map(|r| r.count), query.count()?)?;
    Ok(Some(SummaryTableEntry::Items(table)))
}

struct MonsterTableRow {
    monster_id: i64,
    name: Option<String>,
    slug: Option<String>,
    icon: Option<String>,
    element: Option<String>,
    can_awaken: Option<bool>,
    is_awakened: Option<bool>,
    stars: Option<i64>,
    count: i64,
    runs: i64,
}

fn monster_table(query: &DropQuery<'_>, log_count: usize) -> AppResult<Option<SummaryTableEntry>> {
    let rows = query.conn().query_collect(
        &query.select(
            "d.monster_id, m.name, m.bestiary_slug, m.image_filename, m.element, \
             m.can_awaken, m.is_awakened, m.base_stars, COUNT(*), COUNT(DISTINCT d.log_id)",
            "LEFT JOIN monsters m ON m.id = d.monster_id",
            "GROUP BY d.monster_id ORDER BY COUNT(*) DESC, d.monster_id",
        ),
        |row| {
            Ok(MonsterTableRow {
                monster_id: row.get(0)?,
                name: row.get(1)?,
                slug: row.get(2)?,
                icon: row.get(3)?,
                element: row.get(4)?,
                can_awaken: row.get(5)?,
                is_awakened: row.get(6)?,
                stars: row.get(7)?,
                count: row.get(8)?,
                runs: row.get(9)?,
            })
        },
    )?;

    if rows.is_empty() {
        return Ok(None);
    }

    let mut table = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.monster_id;
        let count = row.count as usize;
        let chance = drop_chance(row.runs as usize, log_count);
        check_drop_chance(DropCategory::Monster, chance)?;
        table.push(SummaryMonsterRow {
            name: lookup(row.name, "monster", id)?,
            slug: lookup(row.slug, "monster", id)?,
            icon: lookup(row.icon, "monster", id)?,
            element: Element::label_for(&lookup(row.element, "monster", id)?),
            can_awaken: lookup(row.can_awaken, "monster", id)?,
            is_awakened: lookup(row.is_awakened, "monster", id)?,
            stars: lookup(row.stars, "monster", id)?,
            count,
            drop_chance: chance,
        });
    }

    reconcile_counts(DropCategory::Monster, table.iter().map(|r| r.count), query.count()?)?;
    Ok(Some(SummaryTableEntry::Monsters(table)))
}

struct PieceTableRow {
    monster_id: i64,
    name: Option<String>,
    icon: Option<String>,
    element: Option<String>,
    count: i64,
    min: i64,
    max: i64,
    avg: f64,
}

fn monster_piece_table(query: &DropQuery<'_>, _log_count: usize) -> AppResult<Option<SummaryTableEntry>> {
    let rows = query.conn().query_collect(
        &query.select(
            "d.monster_id, m.name, m.image_filename, m.element, COUNT(*), \
             MIN(d.quantity), MAX(d.quantity), AVG(d.quantity)",
            "LEFT JOIN monsters m ON m.id = d.monster_id",
            "GROUP BY d.monster_id ORDER BY COUNT(*) DESC, d.monster_id",
        ),
        |row| {
            Ok(PieceTableRow {
                monster_id: row.get(0)?,
                name: row.get(1)?,
                icon: row.get(2)?,
                element: row.get(3)?,
                count: row.get(4)?,
                min: row.get(5)?,
                max: row.get(6)?,
                avg: row.get(7)?,
            })
        },
    )?;

    if rows.is_empty() {
        return Ok(None);
    }

    let table = rows
        .into_iter()
        .map(|row| {
            let id = row.monster_id;
            Ok(SummaryMonsterPieceRow {
                name: lookup(row.name, "monster", id)?,
                icon: lookup(row.icon, "monster", id)?,
                element: Element::label_for(&lookup(row.element, "monster", id)?),
                count: row.count as usize,
                min: row.min,
                max: row.max,
                avg: row.avg,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    reconcile_counts(
        DropCategory::MonsterPiece,
        table.iter().map(|r| r.count),
        query.count()?,
    )?;
    Ok(Some(SummaryTableEntry::MonsterPieces(table)))
}

fn counts_by(query: &DropQuery<'_>, column: &str) -> AppResult<Vec<(i64, usize)>> {
    query.conn().query_collect(
        &query.select(
            &format!("{}, COUNT(*)", column),
            "",
            &format!("GROUP BY {col} ORDER BY {col}", col = column),
        ),
        |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)? as usize)),
    )
}

fn rune_table(query: &DropQuery<'_>, _log_count: usize) -> AppResult<Option<SummaryTableEntry>> {
    let sets = counts_by(query, "d.rune_type")?;
    if sets.is_empty() {
        return Ok(None);
    }

    let slots = counts_by(query, "d.slot")?;
    let quality = counts_by(query, "d.quality")?;

    Ok(Some(SummaryTableEntry::Runes(SummaryRuneTable {
        sets: sets
            .into_iter()
            .map(|(code, count)| LabelCount::new(RuneType::label_for(code), count))
            .collect(),
        slots: slots
            .into_iter()
            .map(|(slot, count)| SlotCount { slot, count })
            .collect(),
        quality: quality
            .into_iter()
            .map(|(code, count)| LabelCount::new(RuneQuality::label_for(code), count))
            .collect(),
    })))
}

fn rune_craft_table(query: &DropQuery<'_>, _log_count: usize) -> AppResult<Option<SummaryTableEntry>> {
    let rows = query.conn().query_collect(
        &query.select(
            "d.craft_type, d.rune_type, d.quality, COUNT(*)",
            "",
            "GROUP BY d.craft_type, d.rune_type, d.quality \
             ORDER BY d.craft_type, d.rune_type, d.quality",
        ),
        |row| {
            Ok(SummaryRuneCraftRow {
                craft_type: CraftType::label_for(row.get(0)?),
                rune_type: RuneType::label_for(row.get(1)?),
                quality: RuneQuality::label_for(row.get(2)?),
                count: row.get::<_, i64>(3)? as usize,
            })
        },
    )?;

    if rows.is_empty() {
        return Ok(None);
    }
    Ok(Some(SummaryTableEntry::RuneCrafts(rows)))
}

fn secret_dungeon_table(query: &DropQuery<'_>, _log_count: usize) -> AppResult<Option<SummaryTableEntry>> {
    let rows = query.conn().query_collect(
        &query.select(
            "d.secret_dungeon_id, s.monster_id, m.name, m.element, m.image_filename, COUNT(*)",
            "LEFT JOIN secret_dungeons s ON s.id = d.secret_dungeon_id \
             LEFT JOIN monsters m ON m.id = s.monster_id",
            "GROUP BY d.secret_dungeon_id ORDER BY COUNT(*) DESC, d.secret_dungeon_id",
        ),
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<i64>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, i64>(5)? as usize,
            ))
        },
    )?;

    if rows.is_empty() {
        return Ok(None);
    }

    let table = rows
        .into_iter()
        .map(|(secret_dungeon_id, monster_id, name, element, icon, count)| {
            let monster_id = lookup(monster_id, "secret dungeon", secret_dungeon_id)?;
            Ok(SummarySecretDungeonRow {
                name: lookup(name, "monster", monster_id)?,
                element: Element::label_for(&lookup(element, "monster", monster_id)?),
                icon: lookup(icon, "monster", monster_id)?,
                count,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Some(SummaryTableEntry::SecretDungeons(table)))
}

// ============================================================
// Cross-grade breakdown
// ============================================================

struct ItemIdentity {
    id: i64,
    name: String,
    icon: String,
}

struct MonsterIdentity {
    id: i64,
    name: String,
    icon: String,
    stars: i64,
}

struct ItemGradeRow {
    count: usize,
    runs: usize,
    min: i64,
    max: i64,
    avg: f64,
    total_quantity: i64,
}

fn items_seen(conn: &Connection, union: &LogSet) -> AppResult<Vec<ItemIdentity>> {
    let query = DropQuery::new(conn, DropCategory::Item, union);
    let rows = conn.query_collect(
        &query.select(
            "DISTINCT d.item_id, i.name, i.icon",
            "LEFT JOIN game_items i ON i.id = d.item_id",
            "ORDER BY d.item_id",
        ),
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        },
    )?;

    rows.into_iter()
        .map(|(id, name, icon)| {
            Ok(ItemIdentity {
                id,
                name: lookup(name, "item", id)?,
                icon: lookup(icon, "item", id)?,
            })
        })
        .collect()
}

fn monsters_seen(conn: &Connection, union: &LogSet) -> AppResult<Vec<MonsterIdentity>> {
    let query = DropQuery::new(conn, DropCategory::Monster, union);
    let rows = conn.query_collect(
        &query.select(
            "DISTINCT d.monster_id, m.name, m.image_filename, m.base_stars",
            "LEFT JOIN monsters m ON m.id = d.monster_id",
            "ORDER BY d.monster_id",
        ),
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<i64>>(3)?,
            ))
        },
    )?;

    rows.into_iter()
        .map(|(id, name, icon, stars)| {
            Ok(MonsterIdentity {
                id,
                name: lookup(name, "monster", id)?,
                icon: lookup(icon, "monster", id)?,
                stars: lookup(stars, "monster", id)?,
            })
        })
        .collect()
}

fn item_stats_for(conn: &Connection, grade_set: &LogSet) -> AppResult<HashMap<i64, ItemGradeRow>> {
    let query = DropQuery::new(conn, DropCategory::Item, grade_set);
    let rows = conn.query_collect(
        &query.select(
            "d.item_id, COUNT(*), MIN(d.quantity), MAX(d.quantity), AVG(d.quantity), \
             SUM(d.quantity), COUNT(DISTINCT d.log_id)",
            "",
            "GROUP BY d.item_id",
        ),
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                ItemGradeRow {
                    count: row.get::<_, i64>(1)? as usize,
                    min: row.get(2)?,
                    max: row.get(3)?,
                    avg: row.get(4)?,
                    total_quantity: row.get(5)?,
                    runs: row.get::<_, i64>(6)? as usize,
                },
            ))
        },
    )?;
    Ok(rows.into_iter().collect())
}

/// Drop records and distinct runs per monster
fn monster_counts_for(conn: &Connection, grade_set: &LogSet) -> AppResult<HashMap<i64, (usize, usize)>> {
    let query = DropQuery::new(conn, DropCategory::Monster, grade_set);
    let rows = conn.query_collect(
        &query.select(
            "d.monster_id, COUNT(*), COUNT(DISTINCT d.log_id)",
            "",
            "GROUP BY d.monster_id",
        ),
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                (row.get::<_, i64>(1)? as usize, row.get::<_, i64>(2)? as usize),
            ))
        },
    )?;
    Ok(rows.into_iter().collect())
}

/// Per-grade statistics for every item and monster seen in any grade
///
/// Drop chance and per-run yield are relative to the grade's own window.
pub fn grade_breakdown(
    conn: &Connection,
    union: &LogSet,
    grade_windows: &[(RiftGrade, LogWindow)],
) -> AppResult<Vec<GradeDrops>> {
    let categories = supported_categories(union.log_type());
    let items = if categories.contains(&DropCategory::Item) {
        items_seen(conn, union)?
    } else {
        Vec::new()
    };
    let monsters = if categories.contains(&DropCategory::Monster) {
        monsters_seen(conn, union)?
    } else {
        Vec::new()
    };

    let mut breakdown = Vec::with_capacity(grade_windows.len());
    for (grade, window) in grade_windows {
        let grade_set = LogSet::single(window.clone());
        let log_count = window.log_count;
        let mut drops = Vec::with_capacity(items.len() + monsters.len());

        let item_stats = if items.is_empty() {
            HashMap::new()
        } else {
            item_stats_for(conn, &grade_set)?
        };
        for item in &items {
            let stats = item_stats.get(&item.id);
            let count = stats.map(|s| s.count).unwrap_or(0);
            let runs = stats.map(|s| s.runs).unwrap_or(0);
            drops.push(GradeDropEntry::Item(GradeItemStats {
                item_id: item.id,
                name: item.name.clone(),
                icon: item.icon.clone(),
                count,
                min: stats.map(|s| s.min),
                max: stats.map(|s| s.max),
                avg: stats.map(|s| s.avg),
                drop_chance: drop_chance(runs, log_count),
                avg_per_run: per_run(stats.map(|s| s.total_quantity).unwrap_or(0), log_count),
            }));
        }

        let monster_counts = if monsters.is_empty() {
            HashMap::new()
        } else {
            monster_counts_for(conn, &grade_set)?
        };
        for monster in &monsters {
            let (count, runs) = monster_counts.get(&monster.id).copied().unwrap_or((0, 0));
            drops.push(GradeDropEntry::Monster(GradeMonsterStats {
                monster_id: monster.id,
                name: monster.name.clone(),
                icon: monster.icon.clone(),
                stars: monster.stars,
                count,
                drop_chance: drop_chance(runs, log_count),
            }));
        }

        debug!("Grade {} breakdown: {} entries", grade, drops.len());
        breakdown.push(GradeDrops {
            grade: grade.label().to_string(),
            log_count,
            drops,
        });
    }

    Ok(breakdown)
}
