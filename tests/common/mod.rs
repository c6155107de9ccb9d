//! Common Test Utilities
//!
//! Shared database setup, catalog fixtures and log builders used across the
//! unit and integration suites.

#![allow(dead_code)]

/// Fixed reference time for deterministic windows (2023-11-14 22:13:20 UTC)
pub const NOW: i64 = 1_700_000_000;

/// Database setup utilities
pub mod database {
    use droplog_reports::database::Database;
    use tempfile::TempDir;

    /// In-memory database with the catalog fixtures loaded
    pub fn seeded_memory_db() -> anyhow::Result<Database> {
        let mut db = Database::new(":memory:")?;
        super::fixtures::seed_catalog(&mut db)?;
        Ok(db)
    }

    /// On-disk test database, removed together with its directory on drop
    pub struct TestDatabase {
        pub db: Database,
        path: String,
        _dir: TempDir,
    }

    impl TestDatabase {
        pub fn new(test_name: &str) -> anyhow::Result<Self> {
            let dir = tempfile::tempdir()?;
            let path = dir
                .path()
                .join(format!("{}.db", test_name))
                .to_string_lossy()
                .to_string();
            let mut db = Database::new(&path)?;
            super::fixtures::seed_catalog(&mut db)?;
            Ok(TestDatabase {
                db,
                path,
                _dir: dir,
            })
        }

        pub fn path(&self) -> &str {
            &self.path
        }

        pub fn database(&self) -> &Database {
            &self.db
        }

        pub fn database_mut(&mut self) -> &mut Database {
            &mut self.db
        }
    }
}

/// Catalog fixtures
///
/// Two dungeons (a cairos dungeon and a rift) with one level each plus a
/// spare dungeon level, a handful of items, two monster families and a
/// secret dungeon.
pub mod fixtures {
    use droplog_reports::database::{CatalogOperations, Database};
    use droplog_reports::types::{
        Dungeon, Element, GameItem, ItemCategory, Level, Monster, SecretDungeon,
    };

    pub const DUNGEON_LEVEL: i64 = 10;
    pub const SPARE_DUNGEON_LEVEL: i64 = 11;
    pub const RIFT_LEVEL: i64 = 20;

    pub const MYSTICAL_SCROLL: i64 = 1;
    pub const MANA_STONES: i64 = 2;
    pub const CRYSTALS: i64 = 3;
    pub const FIRE_ESSENCE: i64 = 4;

    pub const FIRE_INUGAMI: i64 = 101;
    pub const WATER_INUGAMI: i64 = 102;
    pub const WIND_PIXIE: i64 = 201;
    pub const AWAKENED_PIXIE: i64 = 202;

    pub const INUGAMI_SECRET_DUNGEON: i64 = 7;

    fn item(id: i64, name: &str, category: ItemCategory) -> GameItem {
        GameItem {
            id,
            name: name.to_string(),
            icon: format!("item_{}.png", id),
            category,
        }
    }

    fn monster(
        id: i64,
        name: &str,
        family_id: i64,
        element: Element,
        base_stars: i64,
        is_awakened: bool,
    ) -> Monster {
        Monster {
            id,
            com2us_id: id * 100 + 1,
            name: name.to_string(),
            family_id,
            element,
            base_stars,
            is_awakened,
            can_awaken: true,
            image_filename: format!("monster_{}.png", id),
            bestiary_slug: name.to_lowercase().replace(' ', "-"),
        }
    }

    pub fn seed_catalog(db: &mut Database) -> anyhow::Result<()> {
        db.insert_dungeon(&Dungeon {
            id: 1,
            name: "Giant's Keep".to_string(),
        })?;
        db.insert_dungeon(&Dungeon {
            id: 2,
            name: "Fire Beast".to_string(),
        })?;
        for (id, dungeon_id, floor) in [
            (DUNGEON_LEVEL, 1, 10),
            (SPARE_DUNGEON_LEVEL, 1, 11),
            (RIFT_LEVEL, 2, 1),
        ] {
            db.insert_level(&Level {
                id,
                dungeon_id,
                floor,
                difficulty: None,
            })?;
        }

        db.insert_game_item(&item(MYSTICAL_SCROLL, "Mystical Scroll", ItemCategory::SummonScroll))?;
        db.insert_game_item(&item(MANA_STONES, "Mana Stones", ItemCategory::Currency))?;
        db.insert_game_item(&item(CRYSTALS, "Crystals", ItemCategory::Currency))?;
        db.insert_game_item(&item(FIRE_ESSENCE, "Mid Fire Essence", ItemCategory::Essence))?;

        db.insert_monster(&monster(FIRE_INUGAMI, "Fire Inugami", 1, Element::Fire, 2, false))?;
        db.insert_monster(&monster(WATER_INUGAMI, "Water Inugami", 1, Element::Water, 2, false))?;
        db.insert_monster(&monster(WIND_PIXIE, "Wind Pixie", 2, Element::Wind, 1, false))?;
        db.insert_monster(&monster(AWAKENED_PIXIE, "Chamie", 2, Element::Wind, 1, true))?;

        db.insert_secret_dungeon(&SecretDungeon {
            id: INUGAMI_SECRET_DUNGEON,
            monster_id: FIRE_INUGAMI,
        })?;
        Ok(())
    }
}

/// Drop and log builders
pub mod builders {
    use droplog_reports::types::{
        DropRecord, ItemDrop, MonsterDrop, MonsterPieceDrop, NewDungeonLog, NewRiftDungeonLog,
        RiftGrade, RuneCraftDrop, RuneDrop, SecretDungeonDrop,
    };

    pub fn item(item_id: i64, quantity: i64) -> DropRecord {
        DropRecord::Item(ItemDrop { item_id, quantity })
    }

    pub fn monster(monster_id: i64, grade: i64) -> DropRecord {
        DropRecord::Monster(MonsterDrop {
            monster_id,
            grade,
            level: 1,
            is_awakened: false,
        })
    }

    pub fn awakened_monster(monster_id: i64, grade: i64) -> DropRecord {
        DropRecord::Monster(MonsterDrop {
            monster_id,
            grade,
            level: 1,
            is_awakened: true,
        })
    }

    pub fn monster_piece(monster_id: i64, quantity: i64) -> DropRecord {
        DropRecord::MonsterPiece(MonsterPieceDrop {
            monster_id,
            quantity,
        })
    }

    /// A 6-star rune; `quality` and `value` drive the histograms
    pub fn rune(rune_type: i64, slot: i64, quality: i64, value: i64, substats: Vec<i64>) -> DropRecord {
        let substat_values = substats.iter().map(|_| 5).collect();
        DropRecord::Rune(RuneDrop {
            rune_type,
            stars: 6,
            level: 0,
            slot,
            quality,
            original_quality: Some(quality),
            value,
            main_stat: 4,
            main_stat_value: 11,
            innate_stat: None,
            innate_stat_value: None,
            substats,
            substat_values,
            efficiency: 50.0,
            max_efficiency: 72.5,
        })
    }

    pub fn rune_craft(craft_type: i64, rune_type: i64, quality: i64) -> DropRecord {
        DropRecord::RuneCraft(RuneCraftDrop {
            craft_type,
            rune_type,
            quality,
        })
    }

    pub fn secret_dungeon(secret_dungeon_id: i64) -> DropRecord {
        DropRecord::SecretDungeon(SecretDungeonDrop { secret_dungeon_id })
    }

    pub fn dungeon_run(wizard_id: i64, timestamp: i64, level_id: i64, drops: Vec<DropRecord>) -> NewDungeonLog {
        NewDungeonLog {
            wizard_id,
            timestamp,
            level_id,
            success: true,
            drops,
        }
    }

    pub fn failed_run(wizard_id: i64, timestamp: i64, level_id: i64) -> NewDungeonLog {
        NewDungeonLog {
            wizard_id,
            timestamp,
            level_id,
            success: false,
            drops: vec![],
        }
    }

    pub fn rift_run(
        wizard_id: i64,
        timestamp: i64,
        level_id: i64,
        grade: RiftGrade,
        drops: Vec<DropRecord>,
    ) -> NewRiftDungeonLog {
        NewRiftDungeonLog {
            wizard_id,
            timestamp,
            level_id,
            grade,
            drops,
        }
    }

    /// `count` successful runs one second apart, newest at `newest`, each
    /// built by `drops(i)`
    pub fn dungeon_runs<F>(count: usize, newest: i64, level_id: i64, drops: F) -> Vec<NewDungeonLog>
    where
        F: Fn(usize) -> Vec<DropRecord>,
    {
        (0..count)
            .map(|i| dungeon_run((i % 7) as i64 + 1, newest - i as i64, level_id, drops(i)))
            .collect()
    }
}
