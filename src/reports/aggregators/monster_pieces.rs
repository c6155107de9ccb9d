//! Monster piece statistics per monster.

use super::{lookup, reconcile_counts};
use crate::database::QueryHelper;
use crate::errors::AppResult;
use crate::reports::categories::DropQuery;
use crate::types::report::MonsterPieceStats;
use crate::types::{CategoryReport, DropCategory};

struct PieceRow {
    monster_id: i64,
    name: Option<String>,
    icon: Option<String>,
    count: i64,
    min: i64,
    max: i64,
    avg: f64,
}

pub fn aggregate(query: &DropQuery<'_>, _log_count: usize) -> AppResult<Option<CategoryReport>> {
    let sql = query.select(
        "d.monster_id, m.name, m.image_filename, COUNT(*), MIN(d.quantity), MAX(d.quantity), AVG(d.quantity)",
        "LEFT JOIN monsters m ON m.id = d.monster_id",
        "GROUP BY d.monster_id ORDER BY COUNT(*) DESC, d.monster_id",
    );
    let rows = query.conn().query_collect(&sql, |row| {
        Ok(PieceRow {
            monster_id: row.get(0)?,
            name: row.get(1)?,
            icon: row.get(2)?,
            count: row.get(3)?,
            min: row.get(4)?,
            max: row.get(5)?,
            avg: row.get(6)?,
        })
    })?;

    if rows.is_empty() {
        return Ok(None);
    }

    let stats = rows
        .into_iter()
        .map(|row| {
            Ok(MonsterPieceStats {
                monster_id: row.monster_id,
                name: lookup(row.name, "monster", row.monster_id)?,
                icon: lookup(row.icon, "monster", row.monster_id)?,
                count: row.count as usize,
                min: row.min,
                max: row.max,
                avg: row.avg,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    reconcile_counts(
        DropCategory::MonsterPiece,
        stats.iter().map(|s| s.count),
        query.count()?,
    )?;

    Ok(Some(CategoryReport::MonsterPieces(stats)))
}
