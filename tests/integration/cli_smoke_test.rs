//! CLI Smoke Test
//!
//! Generates reports into an on-disk store, then renders them the way the
//! `show` and `list` commands do, in both output formats.

use crate::common::builders::{dungeon_runs, item, monster, rift_run};
use crate::common::database::TestDatabase;
use crate::common::fixtures::*;
use crate::common::NOW;
use droplog_reports::database::{LogOperations, ReportOperations};
use droplog_reports::reports::{OutputFormat, ReportEngine, ReportFormatter, WindowSettings};
use droplog_reports::types::{LevelReport, LogType, ReportHeader, RiftGrade};

#[test]
fn test_generated_reports_render() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("cli_smoke")?;
    test_db
        .database_mut()
        .insert_dungeon_logs_batch(&dungeon_runs(20, NOW, DUNGEON_LEVEL, |i| {
            vec![item(MYSTICAL_SCROLL, 1), monster(FIRE_INUGAMI, 2 + (i % 2) as i64)]
        }))?;
    test_db.database_mut().insert_rift_dungeon_log(&rift_run(
        1,
        NOW,
        RIFT_LEVEL,
        RiftGrade::SS,
        vec![item(CRYSTALS, 30)],
    ))?;

    let mut engine = ReportEngine::new(test_db.path(), WindowSettings::default())?;
    let dungeon_stats = engine.generate(LogType::Dungeon, NOW)?;
    let rift_stats = engine.generate(LogType::RiftDungeon, NOW)?;
    assert_eq!(dungeon_stats.reports_created + rift_stats.reports_created, 2);

    let stats_output =
        ReportFormatter::format_generation_stats(&dungeon_stats, &OutputFormat::Console)?;
    assert!(stats_output.contains("Reports created:   1"));

    let dungeon = engine
        .database()
        .latest_report(DUNGEON_LEVEL, LogType::Dungeon)?
        .expect("dungeon report");
    let console = ReportFormatter::format_report(&dungeon, &OutputFormat::Console)?;
    assert!(console.contains("DUNGEON REPORT: LEVEL 10"));
    assert!(console.contains("Mystical Scroll"));
    assert!(console.contains("Fire Inugami"));
    assert!(console.contains("100.00%"));

    let json = ReportFormatter::format_report(&dungeon, &OutputFormat::Json)?;
    let parsed: LevelReport = serde_json::from_str(&json)?;
    assert_eq!(parsed, dungeon);
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["report"]["monsters"]["monsters"]["type"], "occurrences");
    assert_eq!(value["log_type"], "dungeon");

    let rift = engine
        .database()
        .latest_report(RIFT_LEVEL, LogType::RiftDungeon)?
        .expect("rift report");
    let console = ReportFormatter::format_report(&rift, &OutputFormat::Console)?;
    assert!(console.contains("--- Grade SS ---"));
    assert!(console.contains("All grades:"));
    assert!(console.contains("Grade SS (1 logs)"));

    let headers = engine.database().list_report_headers(None)?;
    assert_eq!(headers.len(), 2);
    let listing = ReportFormatter::format_headers(&headers, &OutputFormat::Console)?;
    assert!(listing.contains("rift_dungeon"));
    let listing_json = ReportFormatter::format_headers(&headers, &OutputFormat::Json)?;
    let parsed: Vec<ReportHeader> = serde_json::from_str(&listing_json)?;
    assert_eq!(parsed, headers);
    Ok(())
}
