//! Drop-log store schema
//!
//! ## Table Groups
//!
//! - **Catalog**: `monsters`, `game_items`, `dungeons`, `levels`, `secret_dungeons`.
//!   Imported by the catalog collaborator; read-only for the report engine.
//! - **Logs**: `dungeon_logs`, `rift_dungeon_logs`. Append-only, one row per run.
//! - **Drops**: one table per drop category, each keyed back to its log by
//!   (`log_type`, `log_id`).
//! - **Reports**: `level_reports`. Insert-only; regeneration adds a new row.

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Initialise every table and index (idempotent)
pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        -- ═══════════════════════════════════════════════════════════════
        -- CATALOG
        -- ═══════════════════════════════════════════════════════════════

        CREATE TABLE IF NOT EXISTS monsters (
            id INTEGER PRIMARY KEY,
            com2us_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            family_id INTEGER NOT NULL,
            element TEXT NOT NULL,
            base_stars INTEGER NOT NULL,
            is_awakened INTEGER NOT NULL DEFAULT 0,
            can_awaken INTEGER NOT NULL DEFAULT 1,
            image_filename TEXT NOT NULL DEFAULT '',
            bestiary_slug TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS game_items (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            icon TEXT NOT NULL DEFAULT '',
            category INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS dungeons (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS levels (
            id INTEGER PRIMARY KEY,
            dungeon_id INTEGER NOT NULL REFERENCES dungeons(id),
            floor INTEGER NOT NULL,
            difficulty INTEGER
        );

        CREATE TABLE IF NOT EXISTS secret_dungeons (
            id INTEGER PRIMARY KEY,
            monster_id INTEGER NOT NULL
        );

        -- ═══════════════════════════════════════════════════════════════
        -- LOGS
        -- ═══════════════════════════════════════════════════════════════

        CREATE TABLE IF NOT EXISTS dungeon_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            wizard_id INTEGER NOT NULL,
            timestamp INTEGER NOT NULL,
            level_id INTEGER NOT NULL REFERENCES levels(id),
            success INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_dungeon_logs_level_recency
            ON dungeon_logs(level_id, success, timestamp DESC, id DESC);

        CREATE TABLE IF NOT EXISTS rift_dungeon_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            wizard_id INTEGER NOT NULL,
            timestamp INTEGER NOT NULL,
            level_id INTEGER NOT NULL REFERENCES levels(id),
            grade INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_rift_dungeon_logs_level_recency
            ON rift_dungeon_logs(level_id, grade, timestamp DESC, id DESC);

        -- ═══════════════════════════════════════════════════════════════
        -- DROPS
        -- Monster/item references are not foreign keys: a dangling
        -- reference must surface as a catalog lookup error at report time.
        -- ═══════════════════════════════════════════════════════════════

        CREATE TABLE IF NOT EXISTS item_drops (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            log_type TEXT NOT NULL,
            log_id INTEGER NOT NULL,
            item_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS monster_drops (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            log_type TEXT NOT NULL,
            log_id INTEGER NOT NULL,
            monster_id INTEGER NOT NULL,
            grade INTEGER NOT NULL,
            level INTEGER NOT NULL,
            is_awakened INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS monster_piece_drops (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            log_type TEXT NOT NULL,
            log_id INTEGER NOT NULL,
            monster_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS rune_drops (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            log_type TEXT NOT NULL,
            log_id INTEGER NOT NULL,
            rune_type INTEGER NOT NULL,
            stars INTEGER NOT NULL,
            level INTEGER NOT NULL,
            slot INTEGER NOT NULL,
            quality INTEGER NOT NULL,
            original_quality INTEGER,
            value INTEGER NOT NULL,
            main_stat INTEGER NOT NULL,
            main_stat_value INTEGER NOT NULL,
            innate_stat INTEGER,
            innate_stat_value INTEGER,
            substats TEXT NOT NULL DEFAULT '[]',
            substat_values TEXT NOT NULL DEFAULT '[]',
            efficiency REAL NOT NULL,
            max_efficiency REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS rune_craft_drops (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            log_type TEXT NOT NULL,
            log_id INTEGER NOT NULL,
            craft_type INTEGER NOT NULL,
            rune_type INTEGER NOT NULL,
            quality INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS secret_dungeon_drops (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            log_type TEXT NOT NULL,
            log_id INTEGER NOT NULL,
            secret_dungeon_id INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_item_drops_log ON item_drops(log_type, log_id);
        CREATE INDEX IF NOT EXISTS idx_monster_drops_log ON monster_drops(log_type, log_id);
        CREATE INDEX IF NOT EXISTS idx_monster_piece_drops_log ON monster_piece_drops(log_type, log_id);
        CREATE INDEX IF NOT EXISTS idx_rune_drops_log ON rune_drops(log_type, log_id);
        CREATE INDEX IF NOT EXISTS idx_rune_craft_drops_log ON rune_craft_drops(log_type, log_id);
        CREATE INDEX IF NOT EXISTS idx_secret_dungeon_drops_log ON secret_dungeon_drops(log_type, log_id);

        -- ═══════════════════════════════════════════════════════════════
        -- REPORTS
        -- ═══════════════════════════════════════════════════════════════

        CREATE TABLE IF NOT EXISTS level_reports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            level_id INTEGER NOT NULL REFERENCES levels(id),
            log_type TEXT NOT NULL,
            generated_on INTEGER NOT NULL,
            start_timestamp INTEGER NOT NULL,
            end_timestamp INTEGER NOT NULL,
            log_count INTEGER NOT NULL,
            unique_contributors INTEGER NOT NULL,
            report TEXT NOT NULL,
            CHECK (start_timestamp <= end_timestamp),
            CHECK (log_count > 0)
        );

        CREATE INDEX IF NOT EXISTS idx_level_reports_latest
            ON level_reports(level_id, log_type, generated_on DESC, id DESC);
        "#,
    )?;

    debug!("Drop-log schema initialised");
    Ok(())
}
