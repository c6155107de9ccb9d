//! Rift dungeon reports: per-grade entries plus the cross-grade summary

use crate::common::builders::{item, monster, rift_run};
use crate::common::database::seeded_memory_db;
use crate::common::fixtures::*;
use crate::common::NOW;
use droplog_reports::database::LogOperations;
use droplog_reports::reports::{build_report, WindowSettings};
use droplog_reports::types::report::{GradeDropEntry, RiftSummaryReport, SUMMARY_GRADE_LABEL};
use droplog_reports::types::{
    LevelDropReport, LogType, NewRiftDungeonLog, ReportPayload, RiftGrade, RiftReportEntry,
};

fn seed_two_grades() -> anyhow::Result<droplog_reports::database::Database> {
    let mut db = seeded_memory_db()?;
    let mut logs: Vec<NewRiftDungeonLog> = (0..5)
        .map(|i| {
            rift_run(
                i + 1,
                NOW - i,
                RIFT_LEVEL,
                RiftGrade::A,
                vec![item(MYSTICAL_SCROLL, 1)],
            )
        })
        .collect();
    logs.extend((0..3).map(|i| {
        rift_run(
            i + 1,
            NOW - 100 - i,
            RIFT_LEVEL,
            RiftGrade::B,
            vec![item(MYSTICAL_SCROLL, 2), monster(FIRE_INUGAMI, 3)],
        )
    }));
    db.insert_rift_dungeon_logs_batch(&logs)?;
    Ok(db)
}

fn entries(payload: &ReportPayload) -> &[RiftReportEntry] {
    match payload {
        ReportPayload::Rift(entries) => entries,
        ReportPayload::Level(_) => panic!("expected a rift payload"),
    }
}

fn grade_report(entry: &RiftReportEntry) -> &LevelDropReport {
    match entry {
        RiftReportEntry::Grade { report, .. } => report,
        RiftReportEntry::Summary { .. } => panic!("expected a grade entry"),
    }
}

fn summary_report(entry: &RiftReportEntry) -> &RiftSummaryReport {
    match entry {
        RiftReportEntry::Summary { report, .. } => report,
        RiftReportEntry::Grade { .. } => panic!("expected the summary entry"),
    }
}

#[test]
fn test_rift_report_has_grades_then_summary() -> anyhow::Result<()> {
    let db = seed_two_grades()?;
    let report = build_report(
        db.connection(),
        LogType::RiftDungeon,
        RIFT_LEVEL,
        &WindowSettings::default(),
        NOW,
    )?
    .expect("rift level has runs");

    let entries = entries(&report.report);
    let grades: Vec<&str> = entries.iter().map(|entry| entry.grade()).collect();
    assert_eq!(grades, vec!["B", "A", SUMMARY_GRADE_LABEL]);

    // Header covers every grade's window
    assert_eq!(report.log_count, 8);
    assert_eq!(report.start_timestamp, NOW - 102);
    assert_eq!(report.end_timestamp, NOW);
    assert_eq!(report.unique_contributors, 5);

    let scroll_count = |payload: &LevelDropReport| {
        payload
            .items
            .as_ref()
            .and_then(|items| items.iter().find(|stats| stats.item_id == MYSTICAL_SCROLL))
            .map(|stats| stats.count)
            .unwrap_or(0)
    };
    let grade_b = grade_report(&entries[0]);
    let grade_a = grade_report(&entries[1]);
    assert_eq!(scroll_count(grade_b), 3);
    assert_eq!(scroll_count(grade_a), 5);
    assert!(grade_a.monsters.is_none());
    assert_eq!(grade_b.monsters.as_ref().map(|m| m.monsters.total), Some(3));

    let summary = summary_report(&entries[2]);
    let summary_items = summary.summary.table.items.as_ref().expect("item table");
    assert_eq!(summary_items[0].count, scroll_count(grade_a) + scroll_count(grade_b));
    assert_eq!(summary_items[0].drop_chance, 100.0);
    assert_eq!(summary_items[0].avg_per_run, 11.0 / 8.0);
    Ok(())
}

#[test]
fn test_grade_breakdown_lists_every_drop_per_grade() -> anyhow::Result<()> {
    let db = seed_two_grades()?;
    let report = build_report(
        db.connection(),
        LogType::RiftDungeon,
        RIFT_LEVEL,
        &WindowSettings::default(),
        NOW,
    )?
    .expect("rift level has runs");

    let entries = entries(&report.report);
    let summary = summary_report(entries.last().expect("summary entry"));
    assert_eq!(summary.grades.len(), 2);

    let grade_a = summary
        .grades
        .iter()
        .find(|grade| grade.grade == "A")
        .expect("grade A breakdown");
    assert_eq!(grade_a.log_count, 5);
    assert_eq!(grade_a.drops.len(), 2);

    for drop in &grade_a.drops {
        match drop {
            GradeDropEntry::Item(stats) => {
                assert_eq!(stats.count, 5);
                assert_eq!(stats.drop_chance, 100.0);
                assert_eq!(stats.max, Some(1));
            }
            GradeDropEntry::Monster(stats) => {
                assert_eq!(stats.monster_id, FIRE_INUGAMI);
                assert_eq!(stats.count, 0);
                assert_eq!(stats.drop_chance, 0.0);
            }
        }
    }

    let grade_b = summary
        .grades
        .iter()
        .find(|grade| grade.grade == "B")
        .expect("grade B breakdown");
    let monster_chance = grade_b.drops.iter().find_map(|drop| match drop {
        GradeDropEntry::Monster(stats) => Some(stats.drop_chance),
        GradeDropEntry::Item(_) => None,
    });
    assert_eq!(monster_chance, Some(100.0));
    Ok(())
}

#[test]
fn test_rift_payload_survives_storage() -> anyhow::Result<()> {
    use droplog_reports::database::ReportOperations;

    let mut db = seed_two_grades()?;
    let report = build_report(
        db.connection(),
        LogType::RiftDungeon,
        RIFT_LEVEL,
        &WindowSettings::default(),
        NOW,
    )?
    .expect("rift level has runs");
    db.insert_report(&report, NOW)?;

    let stored = db
        .latest_report(RIFT_LEVEL, LogType::RiftDungeon)?
        .expect("report persisted");
    assert_eq!(stored.report, report.report);
    assert_eq!(stored.header.log_count, 8);
    Ok(())
}

#[test]
fn test_rift_level_without_runs_is_skipped() -> anyhow::Result<()> {
    let db = seeded_memory_db()?;
    let report = build_report(
        db.connection(),
        LogType::RiftDungeon,
        RIFT_LEVEL,
        &WindowSettings::default(),
        NOW,
    )?;
    assert!(report.is_none());
    Ok(())
}
