//! Category resolution and aggregator dispatch

use crate::common::builders::{dungeon_run, item, rift_run};
use crate::common::database::seeded_memory_db;
use crate::common::fixtures::*;
use crate::common::NOW;
use droplog_reports::database::LogOperations;
use droplog_reports::reports::{
    aggregate, resolve_drop_queries, select_window, supported_categories,
    validate_dispatch_table, LogFilter, LogSet, WindowSettings,
};
use droplog_reports::types::{CategoryReport, DropCategory, LogType, RiftGrade};

#[test]
fn test_dispatch_tables_are_complete() {
    assert!(validate_dispatch_table().is_ok());
}

#[test]
fn test_rift_dungeons_support_fewer_categories() {
    let dungeon = supported_categories(LogType::Dungeon);
    let rift = supported_categories(LogType::RiftDungeon);
    assert_eq!(dungeon.len(), DropCategory::ALL.len());
    assert!(rift.contains(&DropCategory::Item));
    assert!(rift.contains(&DropCategory::Monster));
    assert!(!rift.contains(&DropCategory::SecretDungeon));
    assert!(!rift.contains(&DropCategory::MonsterPiece));
}

#[test]
fn test_empty_categories_produce_no_report() -> anyhow::Result<()> {
    let mut db = seeded_memory_db()?;
    db.insert_dungeon_log(&dungeon_run(1, NOW, DUNGEON_LEVEL, vec![item(MYSTICAL_SCROLL, 2)]))?;

    let window = select_window(
        db.connection(),
        &LogFilter::dungeon(DUNGEON_LEVEL),
        &WindowSettings::default(),
        NOW,
    )?
    .expect("window has records");
    let log_set = LogSet::single(window);
    let queries = resolve_drop_queries(db.connection(), &log_set);
    assert_eq!(queries.len(), DropCategory::ALL.len());

    let mut produced = Vec::new();
    for query in &queries {
        if let Some(report) = aggregate(query, log_set.log_count())? {
            produced.push(report.category());
        }
    }
    assert_eq!(produced, vec![DropCategory::Item]);
    Ok(())
}

#[test]
fn test_drop_queries_stay_within_their_family() -> anyhow::Result<()> {
    let mut db = seeded_memory_db()?;
    // Same numeric log id in both families
    db.insert_dungeon_log(&dungeon_run(1, NOW, DUNGEON_LEVEL, vec![item(MYSTICAL_SCROLL, 1)]))?;
    db.insert_rift_dungeon_log(&rift_run(
        1,
        NOW,
        RIFT_LEVEL,
        RiftGrade::A,
        vec![item(MYSTICAL_SCROLL, 7)],
    ))?;

    let window = select_window(
        db.connection(),
        &LogFilter::rift(RIFT_LEVEL, RiftGrade::A),
        &WindowSettings::default(),
        NOW,
    )?
    .expect("window has records");
    let log_set = LogSet::single(window);
    let queries = resolve_drop_queries(db.connection(), &log_set);
    let item_query = queries
        .iter()
        .find(|query| query.category() == DropCategory::Item)
        .expect("items supported for rifts");

    match aggregate(item_query, log_set.log_count())? {
        Some(CategoryReport::Items(items)) => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].count, 1);
            assert_eq!(items[0].max, 7);
        }
        other => panic!("unexpected item report: {:?}", other),
    }
    Ok(())
}
