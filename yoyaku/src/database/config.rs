//! Database configuration and data-directory resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Default busy timeout applied to the SQLite connection.
///
/// Store operations never block indefinitely: once the timeout elapses a
/// contended write surfaces as a retryable `Unavailable` error.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Name of the database file inside the data directory.
const DATABASE_FILE: &str = "yoyaku.db";

/// Configuration for opening the reservation database.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use yoyaku::DatabaseConfig;
///
/// let config = DatabaseConfig::new("/tmp/yoyaku.db")
///     .with_busy_timeout(Duration::from_secs(2));
/// assert!(!config.read_only);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path of the database file.
    pub path: PathBuf,
    /// How long a connection waits on a lock before giving up.
    pub busy_timeout: Duration,
    /// Create the file and parent directory when missing.
    pub auto_create: bool,
    /// Open the database read-only.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a configuration for the given database path with defaults:
    /// 5-second busy timeout, auto-create on, read-write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            auto_create: true,
            read_only: false,
        }
    }

    /// Overrides the busy timeout.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Disables creation of a missing database file.
    #[must_use]
    pub const fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Opens the database read-only.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

/// Returns the default data directory, `~/.yoyaku`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".yoyaku"))
        .ok_or_else(|| Error::Validation {
            field: "data_dir".into(),
            message: "could not determine home directory".into(),
        })
}

/// Resolves the database file path from an optional data-directory override.
///
/// # Errors
///
/// Returns an error if no override is given and the home directory cannot
/// be determined.
pub fn resolve_database_path(data_dir: Option<&Path>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir.join(DATABASE_FILE)),
        None => Ok(default_data_dir()?.join(DATABASE_FILE)),
    }
}
