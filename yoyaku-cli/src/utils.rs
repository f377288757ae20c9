//! Utility functions for CLI operations.
//!
//! Shared plumbing for commands: database opening with the auto-init
//! gate, directory-file loading, argument parsing, and output formatting.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::ValueEnum;
use yoyaku::database::resolve_database_path;
use yoyaku::{
    BookingService, Database, DatabaseConfig, Reservation, SlotTime, StaticDirectory,
};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Salon/menu directory file.
    pub directory: Option<PathBuf>,
}

/// Output format for reservation-producing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per reservation.
    Human,
    /// JSON.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => f.write_str("human"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Opens the reservation database, honouring the auto-init gate.
pub fn open_database(global: &GlobalOptions) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global.data_dir.as_deref())
        .map_err(|e| CliError::Config(e.to_string()))?;

    if !db_path.exists() && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let mut config = DatabaseConfig::new(db_path);
    if let Some(seconds) = global.busy_timeout {
        config = config.with_busy_timeout(Duration::from_secs(seconds));
    }

    Database::open(config).map_err(CliError::from)
}

/// Loads the salon/menu directory file; required for slot queries and
/// bookings.
pub fn load_directory(global: &GlobalOptions) -> Result<StaticDirectory, CliError> {
    let path = global.directory.as_deref().ok_or_else(|| {
        CliError::InvalidArguments(
            "--directory <FILE> is required for this command (salon/menu lookups)".to_string(),
        )
    })?;
    StaticDirectory::from_yaml_file(path).map_err(|e| CliError::Config(e.to_string()))
}

/// Opens a booking service over the database and the given directory.
pub fn open_service(
    global: &GlobalOptions,
    directory: StaticDirectory,
) -> Result<BookingService<StaticDirectory, StaticDirectory>, CliError> {
    let db = open_database(global)?;
    Ok(BookingService::new(db, directory.clone(), directory))
}

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| CliError::InvalidArguments(format!("invalid date '{s}', expected YYYY-MM-DD")))
}

/// Parses an `HH:MM` slot time argument.
pub fn parse_time(s: &str) -> Result<SlotTime, CliError> {
    s.parse()
        .map_err(|e| CliError::InvalidArguments(format!("{e}")))
}

/// Formats a reservation as one human-readable line.
pub fn reservation_line(reservation: &Reservation) -> String {
    let slot = reservation.slot();
    format!(
        "{}  {} {}  {}  user={}  {} ({} min, {})",
        reservation.id(),
        slot.date,
        slot.time,
        reservation.status(),
        reservation.user_id(),
        reservation.menu().name(),
        reservation.menu().duration_minutes(),
        reservation.menu().price()
    )
}

/// Prints a reservation in the requested format.
pub fn print_reservation(
    reservation: &Reservation,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Human => println!("{}", reservation_line(reservation)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(reservation)
                .map_err(|e| CliError::Config(e.to_string()))?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Prints a reservation list in the requested format.
pub fn print_reservations(
    reservations: &[Reservation],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Human => {
            for reservation in reservations {
                println!("{}", reservation_line(reservation));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(reservations)
                .map_err(|e| CliError::Config(e.to_string()))?;
            println!("{json}");
        }
    }
    Ok(())
}
