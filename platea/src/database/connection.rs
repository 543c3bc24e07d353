//! Database connection management.
//!
//! The connection wrapper applies the PRAGMA settings the allocation engine
//! relies on: WAL for concurrent readers, a busy timeout so competing
//! writers queue instead of failing immediately, and foreign keys so the
//! seat-to-booking occupant link is enforced by the engine itself.

use rusqlite::{Connection, OpenFlags, Transaction, TransactionBehavior};

use crate::error::Result;

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// # Examples
///
/// ```no_run
/// use platea::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/platea.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    #[allow(dead_code)]
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// Creates the parent directory if `auto_create` is enabled, applies
    /// the PRAGMA settings, and initializes or verifies the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the parent directory
    /// cannot be created, a PRAGMA fails, or the schema version is
    /// incompatible.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // PRAGMA journal_mode returns a result row, so query_row is required
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {}",
            config.busy_timeout.as_millis()
        ))?;

        super::migrations::check_schema_compatibility(&conn)?;

        Ok(Self { conn, config })
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Begins a write transaction.
    ///
    /// The transaction takes the write lock immediately, so every
    /// precondition read made inside it sees the state the eventual commit
    /// will apply to. Dropping the transaction without committing rolls it
    /// back.
    ///
    /// # Errors
    ///
    /// Returns an error if the write lock cannot be acquired within the
    /// busy timeout.
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}
