//! Shared test utilities for database unit tests.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::ids::{MenuId, SalonId, UserId};
use crate::reservation::{MenuSnapshot, NewReservation, SlotKey};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Creates a `Requested` insert payload for the given slot and user, with
/// a fixed 30-minute "Cut" menu snapshot.
///
/// # Panics
///
/// Panics on malformed date/time strings. This is acceptable in test code
/// where we want to fail fast.
#[must_use]
pub fn new_reservation(salon: i64, date: &str, time: &str, user: i64) -> NewReservation {
    let slot = SlotKey::new(
        SalonId::new(salon),
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        time.parse().unwrap(),
    );
    let menu = MenuSnapshot::new(MenuId::new(10), "Cut", 30, 4500).unwrap();
    NewReservation::new(slot, UserId::new(user), menu)
}
