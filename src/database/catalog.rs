//! Catalog operations - static game entities referenced by drops.

use crate::database::traits::CatalogOperations;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::types::{Dungeon, Element, GameItem, ItemCategory, Level, Monster, SecretDungeon};
use rusqlite::{params, OptionalExtension};

impl CatalogOperations for Database {
    fn insert_dungeon(&mut self, dungeon: &Dungeon) -> AppResult<()> {
        self.connection().execute(
            "INSERT OR REPLACE INTO dungeons (id, name) VALUES (?1, ?2)",
            params![dungeon.id, dungeon.name],
        )?;
        Ok(())
    }

    fn insert_level(&mut self, level: &Level) -> AppResult<()> {
        self.connection().execute(
            "INSERT OR REPLACE INTO levels (id, dungeon_id, floor, difficulty)
             VALUES (?1, ?2, ?3, ?4)",
            params![level.id, level.dungeon_id, level.floor, level.difficulty],
        )?;
        Ok(())
    }

    fn insert_monster(&mut self, monster: &Monster) -> AppResult<()> {
        self.connection().execute(
            r#"
            INSERT OR REPLACE INTO monsters (
                id, com2us_id, name, family_id, element, base_stars,
                is_awakened, can_awaken, image_filename, bestiary_slug
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                monster.id,
                monster.com2us_id,
                monster.name,
                monster.family_id,
                monster.element.code(),
                monster.base_stars,
                monster.is_awakened,
                monster.can_awaken,
                monster.image_filename,
                monster.bestiary_slug,
            ],
        )?;
        Ok(())
    }

    fn insert_game_item(&mut self, item: &GameItem) -> AppResult<()> {
        self.connection().execute(
            "INSERT OR REPLACE INTO game_items (id, name, icon, category) VALUES (?1, ?2, ?3, ?4)",
            params![item.id, item.name, item.icon, item.category.code()],
        )?;
        Ok(())
    }

    fn insert_secret_dungeon(&mut self, secret_dungeon: &SecretDungeon) -> AppResult<()> {
        self.connection().execute(
            "INSERT OR REPLACE INTO secret_dungeons (id, monster_id) VALUES (?1, ?2)",
            params![secret_dungeon.id, secret_dungeon.monster_id],
        )?;
        Ok(())
    }

    fn get_monster(&self, id: i64) -> AppResult<Option<Monster>> {
        let row = self
            .connection()
            .query_row(
                r#"
                SELECT id, com2us_id, name, family_id, element, base_stars,
                       is_awakened, can_awaken, image_filename, bestiary_slug
                FROM monsters WHERE id = ?1
                "#,
                params![id],
                |row| {
                    Ok((
                        Monster {
                            id: row.get(0)?,
                            com2us_id: row.get(1)?,
                            name: row.get(2)?,
                            family_id: row.get(3)?,
                            element: Element::Pure,
                            base_stars: row.get(5)?,
                            is_awakened: row.get(6)?,
                            can_awaken: row.get(7)?,
                            image_filename: row.get(8)?,
                            bestiary_slug: row.get(9)?,
                        },
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(mut monster, element)| {
            monster.element = Element::from_code(&element).ok_or_else(|| {
                AppError::InvalidData(format!("Monster {} has unknown element '{}'", id, element))
            })?;
            Ok(monster)
        })
        .transpose()
    }

    fn get_game_item(&self, id: i64) -> AppResult<Option<GameItem>> {
        let row = self
            .connection()
            .query_row(
                "SELECT id, name, icon, category FROM game_items WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, name, icon, category)| {
            let category = ItemCategory::from_code(category).ok_or_else(|| {
                AppError::InvalidData(format!("Item {} has unknown category {}", id, category))
            })?;
            Ok(GameItem {
                id,
                name,
                icon,
                category,
            })
        })
        .transpose()
    }

    fn get_level(&self, id: i64) -> AppResult<Option<Level>> {
        let level = self
            .connection()
            .query_row(
                "SELECT id, dungeon_id, floor, difficulty FROM levels WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Level {
                        id: row.get(0)?,
                        dungeon_id: row.get(1)?,
                        floor: row.get(2)?,
                        difficulty: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(level)
    }
}
