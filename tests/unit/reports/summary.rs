//! Summary composition against a seeded in-memory store

use crate::common::builders::{dungeon_run, item, monster, rune};
use crate::common::database::seeded_memory_db;
use crate::common::fixtures::*;
use crate::common::NOW;
use droplog_reports::database::{Database, LogOperations};
use droplog_reports::reports::{
    compose_summary, resolve_drop_queries, select_window, LogFilter, LogSet, WindowSettings,
};
use droplog_reports::types::ReportSummary;

fn summarise(db: &Database) -> anyhow::Result<ReportSummary> {
    let window = select_window(
        db.connection(),
        &LogFilter::dungeon(DUNGEON_LEVEL),
        &WindowSettings::default(),
        NOW,
    )?
    .expect("window has records");
    let log_set = LogSet::single(window);
    let queries = resolve_drop_queries(db.connection(), &log_set);
    Ok(compose_summary(&queries, log_set.log_count())?)
}

#[test]
fn test_item_table_orders_by_category_then_count() -> anyhow::Result<()> {
    let mut db = seeded_memory_db()?;
    db.insert_dungeon_logs_batch(&[
        dungeon_run(1, NOW, DUNGEON_LEVEL, vec![item(MYSTICAL_SCROLL, 1), item(MANA_STONES, 500)]),
        dungeon_run(2, NOW - 1, DUNGEON_LEVEL, vec![item(CRYSTALS, 3), item(FIRE_ESSENCE, 2)]),
        dungeon_run(3, NOW - 2, DUNGEON_LEVEL, vec![item(CRYSTALS, 5), item(FIRE_ESSENCE, 4)]),
        dungeon_run(4, NOW - 3, DUNGEON_LEVEL, vec![item(FIRE_ESSENCE, 6)]),
    ])?;

    let summary = summarise(&db)?;
    let items = summary.table.items.expect("item table");
    let names: Vec<&str> = items.iter().map(|row| row.name.as_str()).collect();
    // Currency (6) before summon scrolls (9) before essences (11)
    assert_eq!(
        names,
        vec!["Crystals", "Mana Stones", "Mystical Scroll", "Mid Fire Essence"]
    );

    let essence = &items[3];
    assert_eq!(essence.count, 3);
    assert_eq!(essence.min, 2);
    assert_eq!(essence.max, 6);
    assert_eq!(essence.avg, 4.0);
    assert_eq!(essence.drop_chance, 75.0);
    assert_eq!(essence.avg_per_run, 3.0);
    Ok(())
}

#[test]
fn test_chart_excludes_currency() -> anyhow::Result<()> {
    let mut db = seeded_memory_db()?;
    db.insert_dungeon_logs_batch(&[
        dungeon_run(1, NOW, DUNGEON_LEVEL, vec![item(MANA_STONES, 500), item(FIRE_ESSENCE, 2)]),
        dungeon_run(2, NOW - 1, DUNGEON_LEVEL, vec![item(CRYSTALS, 3), item(FIRE_ESSENCE, 1)]),
    ])?;

    let summary = summarise(&db)?;
    assert_eq!(summary.chart.len(), 1);
    assert_eq!(summary.chart[0].name, "Mid Fire Essence");
    assert_eq!(summary.chart[0].count, 2);
    Ok(())
}

#[test]
fn test_monster_and_rune_tables() -> anyhow::Result<()> {
    let mut db = seeded_memory_db()?;
    db.insert_dungeon_logs_batch(&[
        dungeon_run(
            1,
            NOW,
            DUNGEON_LEVEL,
            vec![monster(WATER_INUGAMI, 2), rune(13, 2, 4, 3000, vec![1])],
        ),
        dungeon_run(
            2,
            NOW - 1,
            DUNGEON_LEVEL,
            vec![monster(WATER_INUGAMI, 2), rune(13, 2, 2, 1000, vec![2])],
        ),
    ])?;

    let summary = summarise(&db)?;

    let monsters = summary.table.monsters.expect("monster table");
    assert_eq!(monsters.len(), 1);
    assert_eq!(monsters[0].name, "Water Inugami");
    assert_eq!(monsters[0].slug, "water-inugami");
    assert_eq!(monsters[0].element, "Water");
    assert_eq!(monsters[0].stars, 2);
    assert_eq!(monsters[0].drop_chance, 100.0);

    let runes = summary.table.runes.expect("rune table");
    assert_eq!(runes.sets.len(), 1);
    assert_eq!(runes.sets[0].label, "Violent");
    assert_eq!(runes.sets[0].count, 2);
    assert_eq!(runes.slots.len(), 1);
    assert_eq!(runes.slots[0].slot, 2);
    let qualities: Vec<&str> = runes.quality.iter().map(|q| q.label.as_str()).collect();
    assert_eq!(qualities, vec!["Rare", "Legend"]);
    Ok(())
}
