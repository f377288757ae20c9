//! Reservation store operations.
//!
//! Create, read, transition, and delete operations for reservation
//! records. Writes run under IMMEDIATE transactions; the slot-conflict
//! check is the partial unique index itself, so `create_reservation` is
//! atomic with respect to concurrent callers by construction.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, ErrorCode, TransactionBehavior};

use crate::error::{Error, Result};
use crate::ids::{MenuId, ReservationId, SalonId, UserId};
use crate::lifecycle::{self, TransitionRequest};
use crate::reservation::{MenuSnapshot, NewReservation, Reservation, ReservationStatus, SlotKey};
use crate::slot::{DateRange, SlotTime};

use super::connection::Database;
use super::schema::INSERT_RESERVATION;

/// Converts a stored Unix timestamp back to a UTC datetime.
fn unix_secs_to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Maps a storage-level failure on a slot insert to the caller taxonomy.
///
/// The only constraint an otherwise-valid insert can violate is the
/// active-slot unique index, so a constraint violation IS the lost race.
/// Busy/locked failures surface as retryable unavailability; everything
/// else passes through as a database error.
fn map_insert_err(e: rusqlite::Error, slot: SlotKey) -> Error {
    match &e {
        rusqlite::Error::SqliteFailure(f, _) if f.code == ErrorCode::ConstraintViolation => {
            Error::SlotConflict { slot }
        }
        _ => map_busy_err(e),
    }
}

/// Maps lock contention to the retryable `Unavailable` error.
fn map_busy_err(e: rusqlite::Error) -> Error {
    match &e {
        rusqlite::Error::SqliteFailure(f, _)
            if matches!(f.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) =>
        {
            Error::Unavailable {
                details: "database lock timeout; retry the operation".into(),
            }
        }
        _ => Error::Database(e),
    }
}

/// Deserializes a reservation from a full-column-list row.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let salon_id: i64 = row.get(1)?;
    let user_id: i64 = row.get(2)?;
    let date: String = row.get(3)?;
    let time: String = row.get(4)?;
    let menu_id: i64 = row.get(5)?;
    let menu_name: String = row.get(6)?;
    let menu_duration: u32 = row.get(7)?;
    let menu_price: u32 = row.get(8)?;
    let status: String = row.get(9)?;
    let created_secs: i64 = row.get(10)?;
    let updated_secs: i64 = row.get(11)?;

    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let time: SlotTime = time
        .parse()
        .map_err(|e: crate::slot::InvalidSlotTimeError| {
            rusqlite::Error::ToSqlConversionFailure(Box::new(e))
        })?;
    let status = ReservationStatus::parse(&status)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(e.into()))?;
    let menu = MenuSnapshot::new(MenuId::new(menu_id), menu_name, menu_duration, menu_price)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Reservation::from_parts(
        ReservationId::new(id),
        SlotKey::new(SalonId::new(salon_id), date, time),
        UserId::new(user_id),
        menu,
        status,
        unix_secs_to_datetime(created_secs),
        unix_secs_to_datetime(updated_secs),
    ))
}

// SQL statements for store operations
const SELECT_RESERVATION: &str = r"
    SELECT id, salon_id, user_id, date, time, menu_id, menu_name,
           menu_duration_minutes, menu_price, status, created_at, updated_at
    FROM reservations
    WHERE id = ?
";

const LIST_BY_SALON: &str = r"
    SELECT id, salon_id, user_id, date, time, menu_id, menu_name,
           menu_duration_minutes, menu_price, status, created_at, updated_at
    FROM reservations
    WHERE salon_id = ?
    ORDER BY date, time
";

const LIST_BY_SALON_IN_RANGE: &str = r"
    SELECT id, salon_id, user_id, date, time, menu_id, menu_name,
           menu_duration_minutes, menu_price, status, created_at, updated_at
    FROM reservations
    WHERE salon_id = ? AND date >= ? AND date <= ?
    ORDER BY date, time
";

const SELECT_OCCUPIED_TIMES: &str = r"
    SELECT time
    FROM reservations
    WHERE salon_id = ? AND date = ? AND status <> 'cancelled'
    ORDER BY time
";

const UPDATE_STATUS: &str = r"
    UPDATE reservations
    SET status = ?, updated_at = ?
    WHERE id = ?
";

const DELETE_RESERVATION: &str = r"
    DELETE FROM reservations
    WHERE id = ?
";

impl Database {
    /// Creates a reservation, enforcing the slot-conflict invariant.
    ///
    /// The insert and the conflict check are one atomic operation: of two
    /// concurrent calls for the same slot, exactly one succeeds and the
    /// other observes [`Error::SlotConflict`].
    ///
    /// # Errors
    ///
    /// Returns `SlotConflict` when a non-cancelled reservation already
    /// holds the slot, `Unavailable` on lock timeout, or a database error.
    pub fn create_reservation(&mut self, new: &NewReservation) -> Result<Reservation> {
        // Whole-second precision, matching what the row stores
        let now_secs = Utc::now().timestamp();
        let now = unix_secs_to_datetime(now_secs);

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(map_busy_err)?;

        tx.execute(
            INSERT_RESERVATION,
            params![
                new.slot.salon_id.value(),
                new.user_id.value(),
                new.slot.date.to_string(),
                new.slot.time.to_string(),
                new.menu.menu_id().value(),
                new.menu.name(),
                new.menu.duration_minutes(),
                new.menu.price(),
                new.status.as_str(),
                now_secs,
                now_secs,
            ],
        )
        .map_err(|e| map_insert_err(e, new.slot))?;

        let id = tx.last_insert_rowid();
        tx.commit().map_err(map_busy_err)?;

        log::debug!("created reservation {id} for {}", new.slot);

        Ok(Reservation::from_parts(
            ReservationId::new(id),
            new.slot,
            new.user_id,
            new.menu.clone(),
            new.status,
            now,
            now,
        ))
    }

    /// Retrieves a reservation by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` if the reservation exists
    /// - `Ok(None)` if it doesn't
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let mut stmt = self.conn.prepare_cached(SELECT_RESERVATION)?;
        match stmt.query_row(params![id.value()], row_to_reservation) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists a salon's reservations ordered by `(date, time)` ascending.
    ///
    /// An optional date range restricts the listing (bounds inclusive).
    /// No reservations is an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be
    /// deserialized.
    pub fn list_salon_reservations(
        &self,
        salon_id: SalonId,
        range: Option<&DateRange>,
    ) -> Result<Vec<Reservation>> {
        let reservations = match range {
            Some(range) => {
                let mut stmt = self.conn.prepare_cached(LIST_BY_SALON_IN_RANGE)?;
                let rows = stmt.query_map(
                    params![
                        salon_id.value(),
                        range.start().to_string(),
                        range.end().to_string()
                    ],
                    row_to_reservation,
                )?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare_cached(LIST_BY_SALON)?;
                let rows = stmt.query_map(params![salon_id.value()], row_to_reservation)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(reservations)
    }

    /// Returns the occupied (non-cancelled) slot start times for a
    /// salon/date, ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored time is malformed.
    pub fn occupied_times(&self, salon_id: SalonId, date: NaiveDate) -> Result<Vec<SlotTime>> {
        let mut stmt = self.conn.prepare_cached(SELECT_OCCUPIED_TIMES)?;
        let times = stmt
            .query_map(params![salon_id.value(), date.to_string()], |row| {
                let time: String = row.get(0)?;
                time.parse::<SlotTime>()
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(times)
    }

    /// Applies a lifecycle transition to a reservation.
    ///
    /// The read, the state-machine decision, and the write happen inside
    /// one IMMEDIATE transaction, so concurrent transitions serialize on
    /// the current status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, `InvalidTransition` when the
    /// state machine rejects the event, `Unavailable` on lock timeout, or
    /// a database error.
    pub fn transition_reservation(
        &mut self,
        id: ReservationId,
        request: &TransitionRequest,
    ) -> Result<Reservation> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(map_busy_err)?;

        let reservation = {
            let mut stmt = tx.prepare_cached(SELECT_RESERVATION)?;
            match stmt.query_row(params![id.value()], row_to_reservation) {
                Ok(reservation) => reservation,
                Err(rusqlite::Error::QueryReturnedNoRows) => {
                    return Err(Error::NotFound {
                        resource: format!("reservation {id}"),
                    })
                }
                Err(e) => return Err(e.into()),
            }
        };

        let slot = reservation.slot();
        let next = lifecycle::next_status(reservation.status(), &slot, request)?;

        let now_secs = Utc::now().timestamp();
        let now = unix_secs_to_datetime(now_secs);
        tx.execute(UPDATE_STATUS, params![next.as_str(), now_secs, id.value()])
            .map_err(map_busy_err)?;
        tx.commit().map_err(map_busy_err)?;

        log::debug!(
            "reservation {id}: {} -> {next} ({})",
            reservation.status(),
            request.event
        );

        Ok(reservation.with_status(next, now))
    }

    /// Physically deletes a reservation.
    ///
    /// Kept only for backward compatibility with clients that expect
    /// deletion on cancel; prefer a `Cancel` transition, which preserves
    /// the record and releases the slot.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the reservation was found and deleted
    /// - `Ok(false)` if no such reservation exists
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` on lock timeout or a database error.
    pub fn delete_reservation(&mut self, id: ReservationId) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(map_busy_err)?;

        let rows_affected = tx
            .execute(DELETE_RESERVATION, params![id.value()])
            .map_err(map_busy_err)?;
        tx.commit().map_err(map_busy_err)?;

        Ok(rows_affected > 0)
    }
}
