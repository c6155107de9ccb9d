//! Static game catalog entities referenced by drop records
//!
//! The catalog is imported by a separate collaborator; the reporting engine
//! only looks entities up by id.

use super::choices::{Element, ItemCategory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: i64,
    pub com2us_id: i64,
    pub name: String,
    pub family_id: i64,
    pub element: Element,
    /// Natural star rating
    pub base_stars: i64,
    pub is_awakened: bool,
    pub can_awaken: bool,
    pub image_filename: String,
    pub bestiary_slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameItem {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub category: ItemCategory,
}

impl GameItem {
    pub fn is_currency(&self) -> bool {
        self.category == ItemCategory::Currency
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: i64,
    pub dungeon_id: i64,
    pub floor: i64,
    pub difficulty: Option<i64>,
}

/// A secret dungeon, identified by the monster it awards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretDungeon {
    pub id: i64,
    pub monster_id: i64,
}
