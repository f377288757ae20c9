//! Database layer: the reservation store.
//!
//! A SQLite-backed store owning all persisted reservation records. The
//! one-active-reservation-per-slot invariant is enforced by the storage
//! engine itself (a partial unique index over non-cancelled rows), so a
//! create is a single atomic operation with respect to concurrent callers.
//!
//! # Examples
//!
//! ```no_run
//! use yoyaku::database::{Database, DatabaseConfig};
//! use yoyaku::{MenuId, MenuSnapshot, NewReservation, SalonId, SlotKey, UserId};
//! use chrono::NaiveDate;
//!
//! let config = DatabaseConfig::new("/tmp/yoyaku.db");
//! let mut db = Database::open(config).unwrap();
//!
//! let slot = SlotKey::new(
//!     SalonId::new(1),
//!     NaiveDate::from_ymd_opt(2029, 6, 4).unwrap(),
//!     "10:00".parse().unwrap(),
//! );
//! let menu = MenuSnapshot::new(MenuId::new(10), "Cut", 30, 4500).unwrap();
//! let created = db
//!     .create_reservation(&NewReservation::new(slot, UserId::new(12), menu))
//!     .unwrap();
//! println!("reservation {}", created.id());
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
