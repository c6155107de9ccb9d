//! Rune crafting material counts by (craft type, rune set, quality).

use super::reconcile_counts;
use crate::database::QueryHelper;
use crate::errors::AppResult;
use crate::reports::categories::DropQuery;
use crate::types::report::RuneCraftStats;
use crate::types::{CategoryReport, CraftType, DropCategory, RuneQuality, RuneType};

pub fn aggregate(query: &DropQuery<'_>, _log_count: usize) -> AppResult<Option<CategoryReport>> {
    let rows = query.conn().query_collect(
        &query.select(
            "d.craft_type, d.rune_type, d.quality, COUNT(*)",
            "",
            "GROUP BY d.craft_type, d.rune_type, d.quality \
             ORDER BY COUNT(*) DESC, d.craft_type, d.rune_type, d.quality",
        ),
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)? as usize,
            ))
        },
    )?;

    if rows.is_empty() {
        return Ok(None);
    }

    let stats: Vec<RuneCraftStats> = rows
        .into_iter()
        .map(|(craft_type, rune_type, quality, count)| RuneCraftStats {
            craft_type: CraftType::label_for(craft_type),
            rune_type: RuneType::label_for(rune_type),
            quality: RuneQuality::label_for(quality),
            count,
        })
        .collect();

    reconcile_counts(
        DropCategory::RuneCraft,
        stats.iter().map(|s| s.count),
        query.count()?,
    )?;

    Ok(Some(CategoryReport::RuneCrafts(stats)))
}
