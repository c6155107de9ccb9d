//! Dungeon report generation over seeded logs
//!
//! Covers the full path from window selection to the persisted payload for
//! single-level (dungeon) reports.

use crate::common::builders::{
    awakened_monster, dungeon_run, dungeon_runs, failed_run, item, monster, monster_piece, rune,
    rune_craft, secret_dungeon,
};
use crate::common::database::seeded_memory_db;
use crate::common::fixtures::*;
use crate::common::NOW;
use droplog_reports::database::{LogOperations, ReportOperations};
use droplog_reports::errors::AppError;
use droplog_reports::reports::{build_report, ReportEngine, WindowSettings};
use droplog_reports::types::report::ChartEntry;
use droplog_reports::types::{LevelDropReport, LogType, NewLevelReport, ReportPayload};
use droplog_reports::utils::time::days_to_seconds;

fn level_payload(report: &NewLevelReport) -> &LevelDropReport {
    match &report.report {
        ReportPayload::Level(payload) => payload,
        ReportPayload::Rift(_) => panic!("expected a single-level payload"),
    }
}

#[test]
fn test_single_item_level_report() -> anyhow::Result<()> {
    let mut db = seeded_memory_db()?;
    db.insert_dungeon_logs_batch(&dungeon_runs(3000, NOW, DUNGEON_LEVEL, |_| {
        vec![item(MYSTICAL_SCROLL, 1)]
    }))?;

    let report = build_report(
        db.connection(),
        LogType::Dungeon,
        DUNGEON_LEVEL,
        &WindowSettings::default(),
        NOW,
    )?
    .expect("level has successful runs");

    assert_eq!(report.log_count, 3000);
    assert_eq!(report.start_timestamp, NOW - 2999);
    assert_eq!(report.end_timestamp, NOW);
    assert_eq!(report.unique_contributors, 7);

    let payload = level_payload(&report);
    let items = payload.items.as_ref().expect("items aggregated");
    assert_eq!(items.len(), 1);
    let scroll = &items[0];
    assert_eq!(scroll.item_id, MYSTICAL_SCROLL);
    assert_eq!(scroll.name, "Mystical Scroll");
    assert_eq!(scroll.count, 3000);
    assert_eq!(scroll.min, 1);
    assert_eq!(scroll.max, 1);
    assert_eq!(scroll.avg, 1.0);
    assert_eq!(scroll.drop_chance, 100.0);
    assert_eq!(scroll.avg_per_run, 1.0);

    assert_eq!(
        payload.summary.chart,
        vec![ChartEntry {
            name: "Mystical Scroll".to_string(),
            count: 3000,
        }]
    );
    assert!(payload.monsters.is_none());
    assert!(payload.runes.is_none());
    Ok(())
}

#[test]
fn test_small_level_uses_every_record() -> anyhow::Result<()> {
    let mut db = seeded_memory_db()?;
    db.insert_dungeon_logs_batch(&dungeon_runs(10, NOW, DUNGEON_LEVEL, |_| {
        vec![item(MANA_STONES, 1500)]
    }))?;

    let report = build_report(
        db.connection(),
        LogType::Dungeon,
        DUNGEON_LEVEL,
        &WindowSettings::default(),
        NOW,
    )?
    .expect("level has successful runs");

    assert_eq!(report.log_count, 10);
    // Currency stays out of the chart but is still reported
    let payload = level_payload(&report);
    assert!(payload.summary.chart.is_empty());
    assert_eq!(payload.items.as_ref().map(|items| items[0].count), Some(10));
    Ok(())
}

#[test]
fn test_minimum_count_reaches_past_timespan() -> anyhow::Result<()> {
    let mut db = seeded_memory_db()?;
    let old = NOW - days_to_seconds(30);
    let mut logs = dungeon_runs(5, NOW, DUNGEON_LEVEL, |_| vec![item(MYSTICAL_SCROLL, 1)]);
    logs.extend(dungeon_runs(5, old, DUNGEON_LEVEL, |_| vec![item(FIRE_ESSENCE, 2)]));
    db.insert_dungeon_logs_batch(&logs)?;

    let settings = WindowSettings {
        timespan_secs: days_to_seconds(14),
        minimum_count: 8,
    };
    let report = build_report(db.connection(), LogType::Dungeon, DUNGEON_LEVEL, &settings, NOW)?
        .expect("level has successful runs");

    assert_eq!(report.log_count, 8);
    assert_eq!(report.start_timestamp, old - 2);
    assert_eq!(report.end_timestamp, NOW);

    let items = level_payload(&report).items.clone().expect("items aggregated");
    let essence = items
        .iter()
        .find(|stats| stats.item_id == FIRE_ESSENCE)
        .expect("older runs included");
    assert_eq!(essence.count, 3);
    assert_eq!(essence.avg_per_run, 6.0 / 8.0);
    Ok(())
}

#[test]
fn test_engine_skips_levels_without_successful_runs() -> anyhow::Result<()> {
    let mut engine = ReportEngine::new(":memory:", WindowSettings::default())?;
    seed_catalog(engine.database_mut())?;

    let stats = engine.generate(LogType::Dungeon, NOW)?;
    assert_eq!(stats.levels_considered, 0);
    assert_eq!(stats.reports_created, 0);

    let mut logs = dungeon_runs(4, NOW, DUNGEON_LEVEL, |_| vec![item(MYSTICAL_SCROLL, 1)]);
    logs.push(failed_run(1, NOW, SPARE_DUNGEON_LEVEL));
    engine.database_mut().insert_dungeon_logs_batch(&logs)?;

    let stats = engine.generate(LogType::Dungeon, NOW)?;
    assert_eq!(stats.levels_considered, 2);
    assert_eq!(stats.reports_created, 1);
    assert_eq!(stats.levels_skipped, 1);

    let db = engine.database();
    assert_eq!(db.count_reports(DUNGEON_LEVEL, LogType::Dungeon)?, 1);
    assert!(db.latest_report(SPARE_DUNGEON_LEVEL, LogType::Dungeon)?.is_none());
    Ok(())
}

#[test]
fn test_generation_is_idempotent() -> anyhow::Result<()> {
    let mut engine = ReportEngine::new(":memory:", WindowSettings::default())?;
    seed_catalog(engine.database_mut())?;
    engine
        .database_mut()
        .insert_dungeon_logs_batch(&dungeon_runs(50, NOW, DUNGEON_LEVEL, |i| {
            let mut drops = vec![item(MANA_STONES, 1000 + i as i64)];
            if i % 5 == 0 {
                drops.push(monster(FIRE_INUGAMI, 2));
            }
            drops
        }))?;

    engine.generate(LogType::Dungeon, NOW)?;
    let first = engine
        .database()
        .latest_report(DUNGEON_LEVEL, LogType::Dungeon)?
        .expect("first report persisted");
    engine.generate(LogType::Dungeon, NOW)?;
    let second = engine
        .database()
        .latest_report(DUNGEON_LEVEL, LogType::Dungeon)?
        .expect("second report persisted");

    assert_ne!(first.header.id, second.header.id);
    assert_eq!(first.report, second.report);
    assert_eq!(first.header.log_count, second.header.log_count);
    assert_eq!(engine.database().count_reports(DUNGEON_LEVEL, LogType::Dungeon)?, 2);
    Ok(())
}

#[test]
fn test_missing_monster_aborts_report() -> anyhow::Result<()> {
    let mut db = seeded_memory_db()?;
    db.insert_dungeon_log(&dungeon_run(1, NOW, DUNGEON_LEVEL, vec![monster(999, 3)]))?;

    let result = build_report(
        db.connection(),
        LogType::Dungeon,
        DUNGEON_LEVEL,
        &WindowSettings::default(),
        NOW,
    );

    assert!(matches!(
        result,
        Err(AppError::CatalogLookup {
            entity: "monster",
            id: 999
        })
    ));
    Ok(())
}

#[test]
fn test_every_dungeon_category_reported() -> anyhow::Result<()> {
    let mut db = seeded_memory_db()?;
    db.insert_dungeon_logs_batch(&[
        dungeon_run(
            1,
            NOW,
            DUNGEON_LEVEL,
            vec![
                monster(FIRE_INUGAMI, 2),
                rune(13, 2, 2, 1200, vec![1, 2, 3]),
                secret_dungeon(INUGAMI_SECRET_DUNGEON),
            ],
        ),
        dungeon_run(
            2,
            NOW - 1,
            DUNGEON_LEVEL,
            vec![monster(FIRE_INUGAMI, 2), rune(13, 4, 3, 2600, vec![4])],
        ),
        dungeon_run(
            3,
            NOW - 2,
            DUNGEON_LEVEL,
            vec![
                monster(WATER_INUGAMI, 2),
                rune(3, 2, 3, 800, vec![]),
                rune_craft(0, 13, 4),
            ],
        ),
        dungeon_run(
            4,
            NOW - 3,
            DUNGEON_LEVEL,
            vec![awakened_monster(AWAKENED_PIXIE, 1), monster_piece(WIND_PIXIE, 10)],
        ),
    ])?;

    let report = build_report(
        db.connection(),
        LogType::Dungeon,
        DUNGEON_LEVEL,
        &WindowSettings::default(),
        NOW,
    )?
    .expect("level has successful runs");
    let payload = level_payload(&report);
    assert_eq!(report.log_count, 4);

    // Monsters
    let monsters = payload.monsters.as_ref().expect("monsters aggregated");
    assert_eq!(monsters.monsters.total, 4);
    assert_eq!(monsters.monsters.data[0].name, "Fire Inugami");
    assert_eq!(monsters.monsters.data[0].element, "Fire");
    assert_eq!(monsters.monsters.data[0].count, 2);
    assert_eq!(monsters.family.data[0].family_id, 1);
    assert_eq!(monsters.family.data[0].name, "Fire Inugami");
    assert_eq!(monsters.family.data[0].count, 3);
    assert_eq!(monsters.family.data[1].name, "Chamie");
    let two_star = monsters
        .nat_stars
        .data
        .iter()
        .find(|stars| stars.nat_stars == 2)
        .expect("2-star monsters dropped");
    assert_eq!(two_star.count, 3);
    assert_eq!(two_star.drop_chance, 75.0);
    let awakened: Vec<(bool, usize)> = monsters
        .awakened
        .data
        .iter()
        .map(|entry| (entry.awakened, entry.count))
        .collect();
    assert_eq!(awakened, vec![(false, 3), (true, 1)]);

    // Runes
    let runes = payload.runes.as_ref().expect("runes aggregated");
    assert_eq!(runes.stars.total, 3);
    assert_eq!(runes.stars.data[0].label, "6⭐");
    assert_eq!(runes.rune_type.data[0].label, "Violent");
    assert_eq!(runes.rune_type.data[0].count, 2);
    assert_eq!(runes.substats.total, 4);
    let value_total: usize = runes.value.data.iter().map(|bin| bin.total()).sum();
    assert_eq!(value_total, 3);
    assert!(runes.value.data.iter().all(|bin| bin.bin % 500 == 0));
    assert_eq!(runes.value.width, 500);
    let efficiency_total: usize = runes.max_efficiency.data.iter().map(|bin| bin.total()).sum();
    assert_eq!(efficiency_total, 3);

    // Pieces, crafts, unlocks
    let pieces = payload.monster_pieces.as_ref().expect("pieces aggregated");
    assert_eq!(pieces[0].name, "Wind Pixie");
    assert_eq!(pieces[0].avg, 10.0);
    let crafts = payload.rune_crafts.as_ref().expect("crafts aggregated");
    assert_eq!(crafts[0].craft_type, "Enchant Gem");
    assert_eq!(crafts[0].rune_type, "Violent");
    assert_eq!(crafts[0].quality, "Legend");
    let unlocks = payload.secret_dungeons.as_ref().expect("unlocks aggregated");
    assert_eq!(unlocks[0].monster_id, FIRE_INUGAMI);
    assert_eq!(unlocks[0].name, "Fire Inugami");

    // Chart: monsters by grade, then one entry per other category
    let chart: Vec<(&str, usize)> = payload
        .summary
        .chart
        .iter()
        .map(|entry| (entry.name.as_str(), entry.count))
        .collect();
    assert!(chart.contains(&("2⭐ Monster", 3)));
    assert!(chart.contains(&("1⭐ Monster", 1)));
    assert!(chart.contains(&("Monster Piece", 1)));
    assert!(chart.contains(&("Rune", 3)));
    assert!(chart.contains(&("Rune Craft", 1)));
    assert!(chart.contains(&("Secret Dungeon", 1)));
    assert_eq!(payload.summary.table.categories().len(), 5);
    Ok(())
}

#[test]
fn test_repeated_drops_in_one_run() -> anyhow::Result<()> {
    let mut engine = ReportEngine::new(":memory:", WindowSettings::default())?;
    seed_catalog(engine.database_mut())?;
    let mut logs = vec![
        dungeon_run(
            1,
            NOW,
            DUNGEON_LEVEL,
            vec![
                item(MYSTICAL_SCROLL, 1),
                item(MYSTICAL_SCROLL, 1),
                item(MYSTICAL_SCROLL, 1),
                monster(FIRE_INUGAMI, 2),
                monster(WATER_INUGAMI, 2),
            ],
        ),
        dungeon_run(2, NOW - 1, DUNGEON_LEVEL, vec![]),
    ];
    logs.extend(dungeon_runs(4, NOW, SPARE_DUNGEON_LEVEL, |_| vec![item(FIRE_ESSENCE, 2)]));
    engine.database_mut().insert_dungeon_logs_batch(&logs)?;

    // A run yielding several records of one entity must not stop the pass
    let stats = engine.generate(LogType::Dungeon, NOW)?;
    assert_eq!(stats.reports_created, 2);

    let persisted = engine
        .database()
        .latest_report(DUNGEON_LEVEL, LogType::Dungeon)?
        .expect("report persisted");
    assert_eq!(persisted.header.log_count, 2);
    let payload = match &persisted.report {
        ReportPayload::Level(payload) => payload,
        ReportPayload::Rift(_) => panic!("expected a single-level payload"),
    };

    // Counts are drop records; drop chance is runs with at least one drop
    let scroll = &payload.items.as_ref().expect("items aggregated")[0];
    assert_eq!(scroll.count, 3);
    assert_eq!(scroll.avg, 1.0);
    assert_eq!(scroll.drop_chance, 50.0);
    assert_eq!(scroll.avg_per_run, 1.5);

    let monsters = payload.monsters.as_ref().expect("monsters aggregated");
    assert_eq!(monsters.nat_stars.data.len(), 1);
    assert_eq!(monsters.nat_stars.data[0].count, 2);
    assert_eq!(monsters.nat_stars.data[0].drop_chance, 50.0);

    let table = &payload.summary.table;
    let item_rows = table.items.as_ref().expect("item table");
    assert_eq!(item_rows[0].count, 3);
    assert_eq!(item_rows[0].drop_chance, 50.0);
    let monster_rows = table.monsters.as_ref().expect("monster table");
    assert!(monster_rows.iter().all(|row| row.count == 1 && row.drop_chance == 50.0));

    assert!(payload.summary.chart.contains(&ChartEntry {
        name: "Mystical Scroll".to_string(),
        count: 3,
    }));
    assert!(payload.summary.chart.contains(&ChartEntry {
        name: "2⭐ Monster".to_string(),
        count: 2,
    }));
    Ok(())
}

#[test]
fn test_substat_population_counts_every_listed_substat() -> anyhow::Result<()> {
    let mut db = seeded_memory_db()?;
    db.insert_dungeon_logs_batch(&[
        dungeon_run(1, NOW, DUNGEON_LEVEL, vec![rune(13, 2, 5, 1200, vec![1, 2, 3, 4])]),
        dungeon_run(2, NOW - 1, DUNGEON_LEVEL, vec![rune(13, 4, 5, 1500, vec![4, 8])]),
        dungeon_run(3, NOW - 2, DUNGEON_LEVEL, vec![rune(3, 2, 5, 800, vec![])]),
    ])?;

    let report = build_report(
        db.connection(),
        LogType::Dungeon,
        DUNGEON_LEVEL,
        &WindowSettings::default(),
        NOW,
    )?
    .expect("level has successful runs");
    let runes = level_payload(&report).runes.as_ref().expect("runes aggregated");

    assert_eq!(runes.stars.total, 3);
    assert_eq!(runes.substats.total, 6);
    let substats: Vec<(&str, usize)> = runes
        .substats
        .data
        .iter()
        .map(|entry| (entry.label.as_str(), entry.count))
        .collect();
    assert_eq!(
        substats,
        vec![("HP", 1), ("HP %", 1), ("ATK", 1), ("ATK %", 2), ("CRI Rate %", 1)]
    );
    let listed: usize = runes.substats.data.iter().map(|entry| entry.count).sum();
    assert_eq!(listed, runes.substats.total);
    Ok(())
}
