//! Database schema definitions and SQL constants.

/// Current schema version for the database.
///
/// Stored in the metadata table and checked on open.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// Dates are stored as `YYYY-MM-DD` and times as `HH:MM` text, so the
/// `(date, time)` ordering used by listings is plain lexicographic order.
/// The menu columns are a snapshot taken at booking time; menu items are
/// mutable and deletable independently of existing reservations.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        salon_id INTEGER NOT NULL,
        user_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        time TEXT NOT NULL,
        menu_id INTEGER NOT NULL,
        menu_name TEXT NOT NULL,
        menu_duration_minutes INTEGER NOT NULL,
        menu_price INTEGER NOT NULL,
        status TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// SQL statement to create the slot-conflict index.
///
/// This partial unique index is the conflict invariant: at most one
/// reservation in a non-cancelled status per `(salon_id, date, time)`.
/// Enforcing it in the storage engine makes check-and-insert a single
/// atomic operation under concurrent booking attempts.
pub const CREATE_ACTIVE_SLOT_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_reservations_active_slot
    ON reservations(salon_id, date, time)
    WHERE status <> 'cancelled'";

/// SQL statement to create an index for per-salon listings.
pub const CREATE_SALON_DATE_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_salon_date
    ON reservations(salon_id, date, time)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a reservation.
///
/// Deliberately a plain INSERT: a conflicting active reservation must make
/// the statement fail, never silently replace a row.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (salon_id, user_id, date, time, menu_id, menu_name, menu_duration_minutes,
     menu_price, status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";
