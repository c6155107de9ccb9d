//! SQLite-backed drop-log store.
//!
//! ## Architecture
//!
//! The `Database` struct directly implements the operation traits:
//! - `CatalogOperations` - Catalog entity storage and lookup
//! - `LogOperations` - Log and drop record ingestion, target discovery
//! - `ReportOperations` - Report persistence and retrieval

mod catalog;
mod logs;
pub mod query_helper;
mod reports;
pub mod schema;
pub mod traits;

pub use query_helper::QueryHelper;
pub use schema::setup_schema;
pub use traits::*;

use crate::errors::AppResult;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::{debug, info};

/// The main database interface that implements all operation traits.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Open (or create) a database and initialise the schema
    pub fn new(database_path: &str) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;

        setup_schema(&connection)?;

        info!("Database initialised at: {}", database_path);
        Ok(Self { connection })
    }

    /// Open an existing database for reading only
    ///
    /// Used by report workers; the schema must already exist.
    pub fn open_read_only<P: AsRef<Path>>(database_path: P) -> AppResult<Self> {
        let connection = Connection::open_with_flags(
            database_path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        debug!(
            "Read-only handle opened: {}",
            database_path.as_ref().display()
        );
        Ok(Self { connection })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute a function within a database transaction
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}
