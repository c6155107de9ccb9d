//! Drop categories and drop record schemas

use crate::errors::AppError;
use serde::{Deserialize, Serialize};

/// Closed set of drop categories
///
/// The `key()` of a category is the key used for it in every report payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DropCategory {
    #[serde(rename = "items")]
    Item,
    #[serde(rename = "monsters")]
    Monster,
    #[serde(rename = "monster_pieces")]
    MonsterPiece,
    #[serde(rename = "runes")]
    Rune,
    #[serde(rename = "rune_crafts")]
    RuneCraft,
    #[serde(rename = "secret_dungeons")]
    SecretDungeon,
}

impl DropCategory {
    pub const ALL: &'static [DropCategory] = &[
        DropCategory::Item,
        DropCategory::Monster,
        DropCategory::MonsterPiece,
        DropCategory::Rune,
        DropCategory::RuneCraft,
        DropCategory::SecretDungeon,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DropCategory::Item => "items",
            DropCategory::Monster => "monsters",
            DropCategory::MonsterPiece => "monster_pieces",
            DropCategory::Rune => "runes",
            DropCategory::RuneCraft => "rune_crafts",
            DropCategory::SecretDungeon => "secret_dungeons",
        }
    }

    /// Table holding this category's drop records
    pub fn table(&self) -> &'static str {
        match self {
            DropCategory::Item => "item_drops",
            DropCategory::Monster => "monster_drops",
            DropCategory::MonsterPiece => "monster_piece_drops",
            DropCategory::Rune => "rune_drops",
            DropCategory::RuneCraft => "rune_craft_drops",
            DropCategory::SecretDungeon => "secret_dungeon_drops",
        }
    }

    /// Human-readable singular name: key words capitalised, plural `s` dropped
    ///
    /// ```
    /// use droplog_reports::types::DropCategory;
    /// assert_eq!(DropCategory::MonsterPiece.display_name(), "Monster Piece");
    /// assert_eq!(DropCategory::SecretDungeon.display_name(), "Secret Dungeon");
    /// ```
    pub fn display_name(&self) -> String {
        let words: Vec<String> = self
            .key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect();
        words.join(" ").trim_end_matches('s').to_string()
    }
}

impl std::fmt::Display for DropCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for DropCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DropCategory::ALL
            .iter()
            .find(|category| category.key() == s)
            .copied()
            .ok_or_else(|| AppError::UnknownDropCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDrop {
    pub item_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterDrop {
    pub monster_id: i64,
    /// Star grade of the dropped monster
    pub grade: i64,
    pub level: i64,
    pub is_awakened: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterPieceDrop {
    pub monster_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuneDrop {
    pub rune_type: i64,
    pub stars: i64,
    pub level: i64,
    pub slot: i64,
    pub quality: i64,
    pub original_quality: Option<i64>,
    /// Sell value
    pub value: i64,
    pub main_stat: i64,
    pub main_stat_value: i64,
    pub innate_stat: Option<i64>,
    pub innate_stat_value: Option<i64>,
    /// Up to four stat codes
    pub substats: Vec<i64>,
    pub substat_values: Vec<i64>,
    pub efficiency: f64,
    pub max_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuneCraftDrop {
    pub craft_type: i64,
    pub rune_type: i64,
    pub quality: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretDungeonDrop {
    pub secret_dungeon_id: i64,
}

/// One drop awarded by a log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum DropRecord {
    Item(ItemDrop),
    Monster(MonsterDrop),
    MonsterPiece(MonsterPieceDrop),
    Rune(RuneDrop),
    RuneCraft(RuneCraftDrop),
    SecretDungeon(SecretDungeonDrop),
}

impl DropRecord {
    pub fn category(&self) -> DropCategory {
        match self {
            DropRecord::Item(_) => DropCategory::Item,
            DropRecord::Monster(_) => DropCategory::Monster,
            DropRecord::MonsterPiece(_) => DropCategory::MonsterPiece,
            DropRecord::Rune(_) => DropCategory::Rune,
            DropRecord::RuneCraft(_) => DropCategory::RuneCraft,
            DropRecord::SecretDungeon(_) => DropCategory::SecretDungeon,
        }
    }
}
