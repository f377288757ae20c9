//! Database connection management.
//!
//! Provides the store's connection type with the PRAGMA settings needed
//! for concurrent request handling: WAL journaling so readers never block
//! the writer, and a bounded busy timeout so contended writes fail as
//! retryable errors instead of blocking indefinitely.

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// The reservation store's database handle.
///
/// Explicitly constructed and passed to the booking service; there is no
/// process-global connection.
///
/// # Examples
///
/// ```no_run
/// use yoyaku::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/yoyaku.db");
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
    /// Creates the parent directory when auto-create is on, applies the
    /// WAL/synchronous/busy-timeout pragmas, and verifies (or initializes)
    /// the schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataDirectoryNotFound`] when the file is missing
    /// and auto-create is disabled, or a database error if opening,
    /// pragma setup, or schema verification fails.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if config.auto_create {
                if let Some(parent) = config.path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
            } else {
                return Err(Error::DataDirectoryNotFound {
                    path: config.path.clone(),
                });
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

        // PRAGMA journal_mode returns its result, so query_row is required
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
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
}
