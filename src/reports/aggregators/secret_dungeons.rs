//! Secret dungeon unlock counts, keyed by the monster each dungeon awards.

use super::{lookup, reconcile_counts};
use crate::database::QueryHelper;
use crate::errors::AppResult;
use crate::reports::categories::DropQuery;
use crate::types::report::SecretDungeonStats;
use crate::types::{CategoryReport, DropCategory};

pub fn aggregate(query: &DropQuery<'_>, _log_count: usize) -> AppResult<Option<CategoryReport>> {
    let rows = query.conn().query_collect(
        &query.select(
            "d.secret_dungeon_id, s.monster_id, m.name, COUNT(*)",
            "LEFT JOIN secret_dungeons s ON s.id = d.secret_dungeon_id \
             LEFT JOIN monsters m ON m.id = s.monster_id",
            "GROUP BY d.secret_dungeon_id ORDER BY COUNT(*) DESC, d.secret_dungeon_id",
        ),
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<i64>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, i64>(3)? as usize,
            ))
        },
    )?;

    if rows.is_empty() {
        return Ok(None);
    }

    let stats = rows
        .into_iter()
        .map(|(secret_dungeon_id, monster_id, name, count)| {
            let monster_id = lookup(monster_id, "secret dungeon", secret_dungeon_id)?;
            Ok(SecretDungeonStats {
                secret_dungeon_id,
                monster_id,
                name: lookup(name, "monster", monster_id)?,
                count,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    reconcile_counts(
        DropCategory::SecretDungeon,
        stats.iter().map(|s| s.count),
        query.count()?,
    )?;

    Ok(Some(CategoryReport::SecretDungeons(stats)))
}
