//! Report payload types
//!
//! These structures are serialised as the JSON payload of a persisted report.
//! Per-category payload keys are the `DropCategory::key()` strings; both the
//! level report and the summary table reject unknown keys on deserialisation.

use super::drops::DropCategory;
use super::logs::LogType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================
// Building blocks
// ============================================================

/// Shape marker stored as `type` on every breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownKind {
    Occurrences,
    Histogram,
}

/// Counted occurrences of some attribute, with the population size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrences<T> {
    #[serde(rename = "type")]
    pub kind: BreakdownKind,
    pub total: usize,
    pub data: Vec<T>,
}

impl<T> Occurrences<T> {
    pub fn new(total: usize, data: Vec<T>) -> Self {
        Self {
            kind: BreakdownKind::Occurrences,
            total,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

impl LabelCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Fixed-width histogram, each bin split by a secondary dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    #[serde(rename = "type")]
    pub kind: BreakdownKind,
    pub width: i64,
    pub data: Vec<HistogramBin>,
}

/// One histogram bin: `[bin, bin + width)`, last bin open-ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub bin: i64,
    /// Count per slice label; every slice is present, zero included
    #[serde(flatten)]
    pub counts: BTreeMap<String, usize>,
}

impl HistogramBin {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

// ============================================================
// Per-category statistics
// ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDropStats {
    pub item_id: i64,
    pub name: String,
    pub icon: String,
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub avg: f64,
    pub drop_chance: f64,
    pub avg_per_run: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterOccurrence {
    pub monster_id: i64,
    pub name: String,
    pub element: String,
    pub com2us_id: i64,
    pub icon: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyOccurrence {
    pub family_id: i64,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatStarsOccurrence {
    pub nat_stars: i64,
    pub count: usize,
    pub drop_chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwakenedOccurrence {
    pub awakened: bool,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterDropReport {
    pub monsters: Occurrences<MonsterOccurrence>,
    pub family: Occurrences<FamilyOccurrence>,
    pub nat_stars: Occurrences<NatStarsOccurrence>,
    pub element: Occurrences<LabelCount>,
    pub awakened: Occurrences<AwakenedOccurrence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterPieceStats {
    pub monster_id: i64,
    pub name: String,
    pub icon: String,
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotCount {
    pub slot: i64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuneDropReport {
    pub stars: Occurrences<LabelCount>,
    #[serde(rename = "type")]
    pub rune_type: Occurrences<LabelCount>,
    pub quality: Occurrences<LabelCount>,
    pub slot: Occurrences<SlotCount>,
    pub main_stat: Occurrences<LabelCount>,
    pub innate_stat: Occurrences<LabelCount>,
    pub substats: Occurrences<LabelCount>,
    pub max_efficiency: Histogram,
    pub value: Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuneCraftStats {
    pub craft_type: String,
    pub rune_type: String,
    pub quality: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretDungeonStats {
    pub secret_dungeon_id: i64,
    pub monster_id: i64,
    pub name: String,
    pub count: usize,
}

/// Output of one category aggregator
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryReport {
    Items(Vec<ItemDropStats>),
    Monsters(MonsterDropReport),
    MonsterPieces(Vec<MonsterPieceStats>),
    Runes(Box<RuneDropReport>),
    RuneCrafts(Vec<RuneCraftStats>),
    SecretDungeons(Vec<SecretDungeonStats>),
}

impl CategoryReport {
    pub fn category(&self) -> DropCategory {
        match self {
            CategoryReport::Items(_) => DropCategory::Item,
            CategoryReport::Monsters(_) => DropCategory::Monster,
            CategoryReport::MonsterPieces(_) => DropCategory::MonsterPiece,
            CategoryReport::Runes(_) => DropCategory::Rune,
            CategoryReport::RuneCrafts(_) => DropCategory::RuneCraft,
            CategoryReport::SecretDungeons(_) => DropCategory::SecretDungeon,
        }
    }
}

// ============================================================
// Summary (chart + table)
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryItemRow {
    pub name: String,
    pub icon: String,
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub avg: f64,
    pub drop_chance: f64,
    pub avg_per_run: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMonsterRow {
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub element: String,
    pub can_awaken: bool,
    pub is_awakened: bool,
    pub stars: i64,
    pub count: usize,
    pub drop_chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMonsterPieceRow {
    pub name: String,
    pub icon: String,
    pub element: String,
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRuneTable {
    pub sets: Vec<LabelCount>,
    pub slots: Vec<SlotCount>,
    pub quality: Vec<LabelCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRuneCraftRow {
    pub craft_type: String,
    pub rune_type: String,
    pub quality: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySecretDungeonRow {
    pub name: String,
    pub element: String,
    pub icon: String,
    pub count: usize,
}

/// One category's summary table
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryTableEntry {
    Items(Vec<SummaryItemRow>),
    Monsters(Vec<SummaryMonsterRow>),
    MonsterPieces(Vec<SummaryMonsterPieceRow>),
    Runes(SummaryRuneTable),
    RuneCrafts(Vec<SummaryRuneCraftRow>),
    SecretDungeons(Vec<SummarySecretDungeonRow>),
}

impl SummaryTableEntry {
    pub fn category(&self) -> DropCategory {
        match self {
            SummaryTableEntry::Items(_) => DropCategory::Item,
            SummaryTableEntry::Monsters(_) => DropCategory::Monster,
            SummaryTableEntry::MonsterPieces(_) => DropCategory::MonsterPiece,
            SummaryTableEntry::Runes(_) => DropCategory::Rune,
            SummaryTableEntry::RuneCrafts(_) => DropCategory::RuneCraft,
            SummaryTableEntry::SecretDungeons(_) => DropCategory::SecretDungeon,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SummaryItemRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monsters: Option<Vec<SummaryMonsterRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monster_pieces: Option<Vec<SummaryMonsterPieceRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runes: Option<SummaryRuneTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rune_crafts: Option<Vec<SummaryRuneCraftRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_dungeons: Option<Vec<SummarySecretDungeonRow>>,
}

impl SummaryTable {
    pub fn insert(&mut self, entry: SummaryTableEntry) {
        match entry {
            SummaryTableEntry::Items(rows) => self.items = Some(rows),
            SummaryTableEntry::Monsters(rows) => self.monsters = Some(rows),
            SummaryTableEntry::MonsterPieces(rows) => self.monster_pieces = Some(rows),
            SummaryTableEntry::Runes(table) => self.runes = Some(table),
            SummaryTableEntry::RuneCrafts(rows) => self.rune_crafts = Some(rows),
            SummaryTableEntry::SecretDungeons(rows) => self.secret_dungeons = Some(rows),
        }
    }

    /// Categories present in the table
    pub fn categories(&self) -> Vec<DropCategory> {
        let present = [
            (DropCategory::Item, self.items.is_some()),
            (DropCategory::Monster, self.monsters.is_some()),
            (DropCategory::MonsterPiece, self.monster_pieces.is_some()),
            (DropCategory::Rune, self.runes.is_some()),
            (DropCategory::RuneCraft, self.rune_crafts.is_some()),
            (DropCategory::SecretDungeon, self.secret_dungeons.is_some()),
        ];
        present
            .into_iter()
            .filter(|(_, is_present)| *is_present)
            .map(|(category, _)| category)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub chart: Vec<ChartEntry>,
    pub table: SummaryTable,
}

// ============================================================
// Level and rift payloads
// ============================================================

/// Payload of a single-target report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelDropReport {
    pub summary: ReportSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemDropStats>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monsters: Option<MonsterDropReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monster_pieces: Option<Vec<MonsterPieceStats>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runes: Option<Box<RuneDropReport>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rune_crafts: Option<Vec<RuneCraftStats>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_dungeons: Option<Vec<SecretDungeonStats>>,
}

impl LevelDropReport {
    pub fn new(summary: ReportSummary) -> Self {
        Self {
            summary,
            ..Default::default()
        }
    }

    pub fn insert(&mut self, report: CategoryReport) {
        match report {
            CategoryReport::Items(stats) => self.items = Some(stats),
            CategoryReport::Monsters(stats) => self.monsters = Some(stats),
            CategoryReport::MonsterPieces(stats) => self.monster_pieces = Some(stats),
            CategoryReport::Runes(stats) => self.runes = Some(stats),
            CategoryReport::RuneCrafts(stats) => self.rune_crafts = Some(stats),
            CategoryReport::SecretDungeons(stats) => self.secret_dungeons = Some(stats),
        }
    }
}

/// Per-grade statistics for one item in the cross-grade summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeItemStats {
    pub item_id: i64,
    pub name: String,
    pub icon: String,
    pub count: usize,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub avg: Option<f64>,
    pub drop_chance: f64,
    pub avg_per_run: f64,
}

/// Per-grade statistics for one monster in the cross-grade summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeMonsterStats {
    pub monster_id: i64,
    pub name: String,
    pub icon: String,
    pub stars: i64,
    pub count: usize,
    pub drop_chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GradeDropEntry {
    Item(GradeItemStats),
    Monster(GradeMonsterStats),
}

/// Every drop seen in any grade, evaluated for one grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeDrops {
    pub grade: String,
    pub log_count: usize,
    pub drops: Vec<GradeDropEntry>,
}

/// Cross-grade summary of a rift level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiftSummaryReport {
    pub summary: ReportSummary,
    pub grades: Vec<GradeDrops>,
}

/// Label used for the trailing cross-grade entry of a rift report
pub const SUMMARY_GRADE_LABEL: &str = "summary";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RiftReportEntry {
    Grade {
        grade: String,
        report: LevelDropReport,
    },
    Summary {
        grade: String,
        report: RiftSummaryReport,
    },
}

impl RiftReportEntry {
    pub fn grade(&self) -> &str {
        match self {
            RiftReportEntry::Grade { grade, .. } | RiftReportEntry::Summary { grade, .. } => grade,
        }
    }
}

/// The JSON payload stored with a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportPayload {
    Level(LevelDropReport),
    Rift(Vec<RiftReportEntry>),
}

// ============================================================
// Persisted reports
// ============================================================

/// Report ready to be persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLevelReport {
    pub level_id: i64,
    pub log_type: LogType,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub log_count: usize,
    pub unique_contributors: usize,
    pub report: ReportPayload,
}

/// Columns of a persisted report, without the payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub id: i64,
    pub level_id: i64,
    pub log_type: LogType,
    pub generated_on: i64,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub log_count: usize,
    pub unique_contributors: usize,
}

/// A persisted report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub report: ReportPayload,
}

/// Outcome of one generation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub levels_considered: usize,
    pub reports_created: usize,
    pub levels_skipped: usize,
}

impl GenerationStats {
    pub fn merge(&mut self, other: &GenerationStats) {
        self.levels_considered += other.levels_considered;
        self.reports_created += other.reports_created;
        self.levels_skipped += other.levels_skipped;
    }
}
