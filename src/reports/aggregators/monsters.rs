//! Monster drop breakdowns: by monster, family, natural stars, element and
//! awakened state.

use super::{check_drop_chance, lookup, reconcile_counts};
use crate::database::QueryHelper;
use crate::errors::AppResult;
use crate::reports::categories::DropQuery;
use crate::types::report::{
    AwakenedOccurrence, FamilyOccurrence, LabelCount, MonsterDropReport, MonsterOccurrence,
    NatStarsOccurrence, Occurrences,
};
use crate::types::{CategoryReport, DropCategory, Element};
use crate::utils::math::drop_chance;

const MONSTER_JOIN: &str = "LEFT JOIN monsters m ON m.id = d.monster_id";

struct MonsterRow {
    monster_id: i64,
    name: Option<String>,
    element: Option<String>,
    com2us_id: Option<i64>,
    icon: Option<String>,
    count: i64,
}

fn by_monster(query: &DropQuery<'_>) -> AppResult<Vec<MonsterOccurrence>> {
    let sql = query.select(
        "d.monster_id, m.name, m.element, m.com2us_id, m.image_filename, COUNT(*)",
        MONSTER_JOIN,
        "GROUP BY d.monster_id ORDER BY COUNT(*) DESC, d.monster_id",
    );
    let rows = query.conn().query_collect(&sql, |row| {
        Ok(MonsterRow {
            monster_id: row.get(0)?,
            name: row.get(1)?,
            element: row.get(2)?,
            com2us_id: row.get(3)?,
            icon: row.get(4)?,
            count: row.get(5)?,
        })
    })?;

    rows.into_iter()
        .map(|row| {
            let element = lookup(row.element, "monster", row.monster_id)?;
            Ok(MonsterOccurrence {
                monster_id: row.monster_id,
                name: lookup(row.name, "monster", row.monster_id)?,
                element: Element::label_for(&element),
                com2us_id: lookup(row.com2us_id, "monster", row.monster_id)?,
                icon: lookup(row.icon, "monster", row.monster_id)?,
                count: row.count as usize,
            })
        })
        .collect()
}

pub fn aggregate(query: &DropQuery<'_>, log_count: usize) -> AppResult<Option<CategoryReport>> {
    // Resolves every monster reference before the catalog-grouped views run
    let monsters = by_monster(query)?;
    if monsters.is_empty() {
        return Ok(None);
    }

    let total = query.count()?;
    reconcile_counts(DropCategory::Monster, monsters.iter().map(|m| m.count), total)?;

    let conn = query.conn();

    // Families are labelled by their alphabetically first member
    let family = conn.query_collect(
        &query.select(
            "m.family_id, MIN(m.name), COUNT(*)",
            MONSTER_JOIN,
            "GROUP BY m.family_id ORDER BY COUNT(*) DESC, m.family_id",
        ),
        |row| {
            Ok(FamilyOccurrence {
                family_id: row.get(0)?,
                name: row.get(1)?,
                count: row.get::<_, i64>(2)? as usize,
            })
        },
    )?;

    let nat_stars = conn.query_collect(
        &query.select(
            "m.base_stars, COUNT(*), COUNT(DISTINCT d.log_id)",
            MONSTER_JOIN,
            "GROUP BY m.base_stars ORDER BY m.base_stars",
        ),
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)? as usize,
                row.get::<_, i64>(2)? as usize,
            ))
        },
    )?;
    let nat_stars = nat_stars
        .into_iter()
        .map(|(stars, count, runs)| {
            let chance = drop_chance(runs, log_count);
            check_drop_chance(DropCategory::Monster, chance)?;
            Ok(NatStarsOccurrence {
                nat_stars: stars,
                count,
                drop_chance: chance,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let element = conn
        .query_collect(
            &query.select(
                "m.element, COUNT(*)",
                MONSTER_JOIN,
                "GROUP BY m.element ORDER BY COUNT(*) DESC, m.element",
            ),
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize)),
        )?
        .into_iter()
        .map(|(code, count)| LabelCount::new(Element::label_for(&code), count))
        .collect();

    let awakened = conn.query_collect(
        &query.select(
            "m.is_awakened, COUNT(*)",
            MONSTER_JOIN,
            "GROUP BY m.is_awakened ORDER BY m.is_awakened",
        ),
        |row| {
            Ok(AwakenedOccurrence {
                awakened: row.get(0)?,
                count: row.get::<_, i64>(1)? as usize,
            })
        },
    )?;

    Ok(Some(CategoryReport::Monsters(MonsterDropReport {
        monsters: Occurrences::new(total, monsters),
        family: Occurrences::new(total, family),
        nat_stars: Occurrences::new(total, nat_stars),
        element: Occurrences::new(total, element),
        awakened: Occurrences::new(total, awakened),
    })))
}
