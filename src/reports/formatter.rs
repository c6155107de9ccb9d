//! Report formatting and output generation
//!
//! Provides formatting for persisted reports via the [`ReportFormatter`]
//! facade. Supports Console and JSON output.

use crate::errors::AppResult;
use crate::types::report::{GradeDropEntry, RiftSummaryReport};
use crate::types::{
    GenerationStats, LevelDropReport, LevelReport, ReportHeader, ReportPayload, ReportSummary,
    RiftReportEntry,
};
use crate::utils::format::{export_json, format_number, format_percentage};
use crate::utils::time::timestamp_to_iso;

/// Output format options for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_report(report: &LevelReport, format: &OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Json => export_json(report),
            OutputFormat::Console => {
                let mut output = format_header_block(&report.header);
                match &report.report {
                    ReportPayload::Level(level) => output.push_str(&format_level_payload(level)),
                    ReportPayload::Rift(entries) => {
                        for entry in entries {
                            output.push_str(&format_rift_entry(entry));
                        }
                    }
                }
                Ok(output)
            }
        }
    }

    pub fn format_headers(headers: &[ReportHeader], format: &OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Json => export_json(&headers),
            OutputFormat::Console => {
                let mut output = String::new();
                output.push_str(&format!(
                    "{:>6} | {:>6} | {:<13} | {:<19} | {:>8} | {:>12}\n",
                    "Id", "Level", "Family", "Generated", "Logs", "Contributors"
                ));
                output.push_str(&format!("{}\n", "-".repeat(80)));
                for header in headers {
                    output.push_str(&format!(
                        "{:>6} | {:>6} | {:<13} | {:<19} | {:>8} | {:>12}\n",
                        header.id,
                        header.level_id,
                        header.log_type.as_str(),
                        timestamp_to_iso(header.generated_on),
                        format_number(header.log_count),
                        format_number(header.unique_contributors),
                    ));
                }
                if headers.is_empty() {
                    output.push_str("No reports found\n");
                }
                Ok(output)
            }
        }
    }

    pub fn format_generation_stats(stats: &GenerationStats, format: &OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Json => export_json(stats),
            OutputFormat::Console => Ok(format!(
                "=== REPORT GENERATION ===\n\
                 Levels considered: {}\n\
                 Reports created:   {}\n\
                 Levels skipped:    {}\n",
                format_number(stats.levels_considered),
                format_number(stats.reports_created),
                format_number(stats.levels_skipped),
            )),
        }
    }
}

fn format_header_block(header: &ReportHeader) -> String {
    format!(
        "=== {} REPORT: LEVEL {} ===\n\
         Report id:     {}\n\
         Generated:     {}\n\
         Window:        {} to {}\n\
         Logs:          {}\n\
         Contributors:  {}\n",
        header.log_type.display_name().to_uppercase(),
        header.level_id,
        header.id,
        timestamp_to_iso(header.generated_on),
        timestamp_to_iso(header.start_timestamp),
        timestamp_to_iso(header.end_timestamp),
        format_number(header.log_count),
        format_number(header.unique_contributors),
    )
}

fn format_summary(summary: &ReportSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("  {:<32} {:>10}\n", "Drop", "Count"));
    output.push_str(&format!("  {}\n", "-".repeat(43)));
    for entry in &summary.chart {
        output.push_str(&format!("  {:<32} {:>10}\n", entry.name, format_number(entry.count)));
    }
    output
}

fn format_level_payload(report: &LevelDropReport) -> String {
    let mut output = String::from("\nSummary:\n");
    output.push_str(&format_summary(&report.summary));

    if let Some(items) = &report.items {
        output.push_str("\nItems:\n");
        output.push_str(&format!(
            "  {:<28} {:>8} {:>6} {:>6} {:>8} {:>10} {:>9}\n",
            "Item", "Count", "Min", "Max", "Avg", "Chance", "Per run"
        ));
        for item in items {
            output.push_str(&format!(
                "  {:<28} {:>8} {:>6} {:>6} {:>8.2} {:>10} {:>9.2}\n",
                item.name,
                format_number(item.count),
                item.min,
                item.max,
                item.avg,
                format_percentage(item.drop_chance),
                item.avg_per_run,
            ));
        }
    }

    if let Some(monsters) = &report.monsters {
        output.push_str("\nMonsters:\n");
        for monster in &monsters.monsters.data {
            output.push_str(&format!(
                "  {:<28} {:<8} {:>8}\n",
                monster.name,
                monster.element,
                format_number(monster.count)
            ));
        }
        for stars in &monsters.nat_stars.data {
            output.push_str(&format!(
                "  {}⭐ natural: {} ({})\n",
                stars.nat_stars,
                format_number(stars.count),
                format_percentage(stars.drop_chance)
            ));
        }
    }

    if let Some(pieces) = &report.monster_pieces {
        output.push_str("\nMonster pieces:\n");
        for piece in pieces {
            output.push_str(&format!(
                "  {:<28} {:>8} {:>6} {:>6} {:>8.2}\n",
                piece.name,
                format_number(piece.count),
                piece.min,
                piece.max,
                piece.avg
            ));
        }
    }

    if let Some(runes) = &report.runes {
        output.push_str(&format!(
            "\nRunes: {} dropped, {} substats\n",
            format_number(runes.stars.total),
            format_number(runes.substats.total)
        ));
        for set in &runes.rune_type.data {
            output.push_str(&format!("  {:<20} {:>8}\n", set.label, format_number(set.count)));
        }
    }

    if let Some(crafts) = &report.rune_crafts {
        output.push_str("\nRune crafts:\n");
        for craft in crafts {
            output.push_str(&format!(
                "  {:<22} {:<14} {:<16} {:>8}\n",
                craft.craft_type,
                craft.rune_type,
                craft.quality,
                format_number(craft.count)
            ));
        }
    }

    if let Some(unlocks) = &report.secret_dungeons {
        output.push_str("\nSecret dungeons:\n");
        for unlock in unlocks {
            output.push_str(&format!("  {:<28} {:>8}\n", unlock.name, format_number(unlock.count)));
        }
    }

    output
}

fn format_grade_summary(report: &RiftSummaryReport) -> String {
    let mut output = String::from("\nAll grades:\n");
    output.push_str(&format_summary(&report.summary));

    for grade in &report.grades {
        output.push_str(&format!(
            "\n  Grade {} ({} logs)\n",
            grade.grade,
            format_number(grade.log_count)
        ));
        for drop in &grade.drops {
            let (name, count, chance) = match drop {
                GradeDropEntry::Item(item) => (&item.name, item.count, item.drop_chance),
                GradeDropEntry::Monster(monster) => (&monster.name, monster.count, monster.drop_chance),
            };
            output.push_str(&format!(
                "    {:<28} {:>8} {:>10}\n",
                name,
                format_number(count),
                format_percentage(chance)
            ));
        }
    }
    output
}

fn format_rift_entry(entry: &RiftReportEntry) -> String {
    match entry {
        RiftReportEntry::Grade { grade, report } => {
            let mut output = format!("\n--- Grade {} ---", grade);
            output.push_str(&format_level_payload(report));
            output
        }
        RiftReportEntry::Summary { report, .. } => format_grade_summary(report),
    }
}
