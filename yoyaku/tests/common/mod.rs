//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use yoyaku::{BookingService, Database, DatabaseConfig, StaticDirectory};

/// Salon/menu fixture shared across the integration suites: one salon open
/// Monday-Saturday 09:00-18:00 with a 30-minute cut and a 90-minute color.
pub const DIRECTORY_YAML: &str = r#"
salons:
  - id: 1
    name: Cut & Color Ginza
    hours:
      monday: { start: "09:00", end: "18:00" }
      tuesday: { start: "09:00", end: "18:00" }
      wednesday: { start: "09:00", end: "18:00" }
      thursday: { start: "09:00", end: "18:00" }
      friday: { start: "09:00", end: "18:00" }
      saturday: { start: "09:00", end: "18:00" }
menus:
  - id: 10
    salon_id: 1
    name: Cut
    duration_minutes: 30
    price: 4500
  - id: 11
    salon_id: 1
    name: Color
    duration_minutes: 90
    price: 12000
"#;

/// Parses the shared fixture directory.
pub fn directory() -> StaticDirectory {
    StaticDirectory::from_yaml_str(DIRECTORY_YAML).unwrap()
}

/// Opens a booking service over the database at `path` with the shared
/// fixture directory.
pub fn open_service(path: &Path) -> BookingService<StaticDirectory, StaticDirectory> {
    let db = Database::open(DatabaseConfig::new(path)).unwrap();
    BookingService::new(db, directory(), directory())
}

/// The first Monday at least a week out, so submissions always pass the
/// past-date guard.
pub fn next_monday() -> NaiveDate {
    let mut date = Local::now()
        .date_naive()
        .checked_add_days(Days::new(7))
        .unwrap();
    while date.weekday() != Weekday::Mon {
        date = date.succ_opt().unwrap();
    }
    date
}
