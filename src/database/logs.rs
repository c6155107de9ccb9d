//! Log operations - ingestion-side writes and reporting target discovery.
//!
//! A log and its drops are always written in the same transaction, so the
//! report engine never observes a log without its drops.

use crate::database::traits::LogOperations;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::reports::categories::supported_categories;
use crate::types::{DropRecord, LogType, NewDungeonLog, NewRiftDungeonLog};
use rusqlite::{params, Connection};
use tracing::debug;

/// Reject drops whose category the log family cannot carry
fn validate_drops(log_type: LogType, drops: &[DropRecord]) -> AppResult<()> {
    let supported = supported_categories(log_type);
    for drop in drops {
        if !supported.contains(&drop.category()) {
            return Err(AppError::InvalidData(format!(
                "{} logs cannot carry {} drops",
                log_type.display_name(),
                drop.category().key()
            )));
        }
    }
    Ok(())
}

fn insert_drop(conn: &Connection, log_type: LogType, log_id: i64, drop: &DropRecord) -> AppResult<()> {
    let tag = log_type.as_str();
    match drop {
        DropRecord::Item(item) => {
            conn.execute(
                "INSERT INTO item_drops (log_type, log_id, item_id, quantity) VALUES (?1, ?2, ?3, ?4)",
                params![tag, log_id, item.item_id, item.quantity],
            )?;
        }
        DropRecord::Monster(monster) => {
            conn.execute(
                r#"
                INSERT INTO monster_drops (log_type, log_id, monster_id, grade, level, is_awakened)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    tag,
                    log_id,
                    monster.monster_id,
                    monster.grade,
                    monster.level,
                    monster.is_awakened
                ],
            )?;
        }
        DropRecord::MonsterPiece(piece) => {
            conn.execute(
                r#"
                INSERT INTO monster_piece_drops (log_type, log_id, monster_id, quantity)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![tag, log_id, piece.monster_id, piece.quantity],
            )?;
        }
        DropRecord::Rune(rune) => {
            if rune.substats.len() > 4 {
                return Err(AppError::InvalidData(format!(
                    "Rune carries {} substats (max 4)",
                    rune.substats.len()
                )));
            }
            conn.execute(
                r#"
                INSERT INTO rune_drops (
                    log_type, log_id, rune_type, stars, level, slot, quality,
                    original_quality, value, main_stat, main_stat_value,
                    innate_stat, innate_stat_value, substats, substat_values,
                    efficiency, max_efficiency
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
                "#,
                params![
                    tag,
                    log_id,
                    rune.rune_type,
                    rune.stars,
                    rune.level,
                    rune.slot,
                    rune.quality,
                    rune.original_quality,
                    rune.value,
                    rune.main_stat,
                    rune.main_stat_value,
                    rune.innate_stat,
                    rune.innate_stat_value,
                    serde_json::to_string(&rune.substats)?,
                    serde_json::to_string(&rune.substat_values)?,
                    rune.efficiency,
                    rune.max_efficiency,
                ],
            )?;
        }
        DropRecord::RuneCraft(craft) => {
            conn.execute(
                r#"
                INSERT INTO rune_craft_drops (log_type, log_id, craft_type, rune_type, quality)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![tag, log_id, craft.craft_type, craft.rune_type, craft.quality],
            )?;
        }
        DropRecord::SecretDungeon(unlock) => {
            conn.execute(
                "INSERT INTO secret_dungeon_drops (log_type, log_id, secret_dungeon_id) VALUES (?1, ?2, ?3)",
                params![tag, log_id, unlock.secret_dungeon_id],
            )?;
        }
    }
    Ok(())
}

fn write_dungeon_log(conn: &Connection, log: &NewDungeonLog) -> AppResult<i64> {
    validate_drops(LogType::Dungeon, &log.drops)?;
    conn.execute(
        "INSERT INTO dungeon_logs (wizard_id, timestamp, level_id, success) VALUES (?1, ?2, ?3, ?4)",
        params![log.wizard_id, log.timestamp, log.level_id, log.success],
    )?;
    let log_id = conn.last_insert_rowid();
    for drop in &log.drops {
        insert_drop(conn, LogType::Dungeon, log_id, drop)?;
    }
    Ok(log_id)
}

fn write_rift_dungeon_log(conn: &Connection, log: &NewRiftDungeonLog) -> AppResult<i64> {
    validate_drops(LogType::RiftDungeon, &log.drops)?;
    conn.execute(
        "INSERT INTO rift_dungeon_logs (wizard_id, timestamp, level_id, grade) VALUES (?1, ?2, ?3, ?4)",
        params![log.wizard_id, log.timestamp, log.level_id, log.grade.code()],
    )?;
    let log_id = conn.last_insert_rowid();
    for drop in &log.drops {
        insert_drop(conn, LogType::RiftDungeon, log_id, drop)?;
    }
    Ok(log_id)
}

impl LogOperations for Database {
    fn insert_dungeon_log(&mut self, log: &NewDungeonLog) -> AppResult<i64> {
        self.execute_transaction(|tx| write_dungeon_log(tx, log))
    }

    fn insert_rift_dungeon_log(&mut self, log: &NewRiftDungeonLog) -> AppResult<i64> {
        self.execute_transaction(|tx| write_rift_dungeon_log(tx, log))
    }

    fn insert_dungeon_logs_batch(&mut self, logs: &[NewDungeonLog]) -> AppResult<usize> {
        if logs.is_empty() {
            return Ok(0);
        }

        let inserted = self.execute_transaction(|tx| {
            for log in logs {
                write_dungeon_log(tx, log)?;
            }
            Ok(logs.len())
        })?;

        debug!("Inserted {} dungeon logs", inserted);
        Ok(inserted)
    }

    fn insert_rift_dungeon_logs_batch(&mut self, logs: &[NewRiftDungeonLog]) -> AppResult<usize> {
        if logs.is_empty() {
            return Ok(0);
        }

        let inserted = self.execute_transaction(|tx| {
            for log in logs {
                write_rift_dungeon_log(tx, log)?;
            }
            Ok(logs.len())
        })?;

        debug!("Inserted {} rift dungeon logs", inserted);
        Ok(inserted)
    }

    fn levels_with_logs(&self, log_type: LogType) -> AppResult<Vec<i64>> {
        let mut stmt = self.connection().prepare(&format!(
            "SELECT DISTINCT level_id FROM {} ORDER BY level_id",
            log_type.log_table()
        ))?;
        let levels = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(levels)
    }

    fn count_logs(&self, log_type: LogType, level_id: i64) -> AppResult<usize> {
        let count: i64 = self.connection().query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE level_id = ?1",
                log_type.log_table()
            ),
            params![level_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
