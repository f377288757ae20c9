//! Reservation types for salon bookings.
//!
//! This module provides the persisted reservation record, the slot key the
//! conflict invariant is defined over, the menu snapshot captured at
//! booking time, and the status enumeration driven by the lifecycle state
//! machine.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{MenuId, ReservationId, SalonId, UserId};
use crate::slot::SlotTime;

/// The slot a reservation occupies: one salon, one date, one start time.
///
/// This is the key of the conflict invariant: at most one reservation in a
/// non-cancelled status may exist per key.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yoyaku::{SalonId, SlotKey};
///
/// let key = SlotKey::new(
///     SalonId::new(3),
///     NaiveDate::from_ymd_opt(2029, 6, 4).unwrap(),
///     "10:00".parse().unwrap(),
/// );
/// assert_eq!(format!("{key}"), "salon 3 2029-06-04 10:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// The salon the slot belongs to.
    pub salon_id: SalonId,
    /// The calendar date of the slot.
    pub date: NaiveDate,
    /// The slot start time.
    pub time: SlotTime,
}

impl SlotKey {
    /// Creates a slot key.
    #[must_use]
    pub const fn new(salon_id: SalonId, date: NaiveDate, time: SlotTime) -> Self {
        Self {
            salon_id,
            date,
            time,
        }
    }

    /// Returns the slot's start as a civil datetime.
    #[must_use]
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time.time())
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "salon {} {} {}", self.salon_id, self.date, self.time)
    }
}

/// Lifecycle status of a reservation.
///
/// Every status mutation goes through the lifecycle state machine; see
/// [`crate::lifecycle`]. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Submitted by a user, awaiting the salon operator.
    Requested,
    /// Accepted by the salon operator.
    Confirmed,
    /// Service rendered; terminal.
    Completed,
    /// Withdrawn by the user or the operator; terminal. Cancelled
    /// reservations release their slot.
    Cancelled,
}

impl ReservationStatus {
    /// Returns the canonical string form used in storage and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known status.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "requested" => Ok(Self::Requested),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("unknown reservation status: {s}")),
        }
    }

    /// Returns `true` if no further transition is permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns `true` if the reservation holds its slot.
    ///
    /// Only cancelled reservations release their slot; completed ones keep
    /// the historical record of having occupied it.
    #[must_use]
    pub const fn occupies_slot(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The menu item a reservation was booked for, captured at booking time.
///
/// Menu items are owned by the salon and may be renamed, repriced, or
/// deleted after a booking is made; the snapshot keeps the reservation
/// self-describing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSnapshot {
    menu_id: MenuId,
    name: String,
    duration_minutes: u32,
    price: u32,
}

impl MenuSnapshot {
    /// Creates a menu snapshot.
    ///
    /// The name is trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty or the duration is
    /// zero.
    pub fn new(
        menu_id: MenuId,
        name: impl Into<String>,
        duration_minutes: u32,
        price: u32,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError {
                field: "menu.name".into(),
                message: "menu name must be non-empty after trimming whitespace".into(),
            });
        }
        if duration_minutes == 0 {
            return Err(ValidationError {
                field: "menu.duration_minutes".into(),
                message: "menu duration must be positive".into(),
            });
        }
        Ok(Self {
            menu_id,
            name,
            duration_minutes,
            price,
        })
    }

    /// Returns the id of the menu item the snapshot was taken from.
    #[must_use]
    pub const fn menu_id(&self) -> MenuId {
        self.menu_id
    }

    /// Returns the menu item name at booking time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the service duration in minutes at booking time.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Returns the price at booking time.
    #[must_use]
    pub const fn price(&self) -> u32 {
        self.price
    }
}

/// A persisted salon reservation.
///
/// Identity fields (`id`, `slot`, `user_id`, `menu`) are immutable after
/// creation; `status` changes only through lifecycle transitions applied
/// by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    slot: SlotKey,
    user_id: UserId,
    menu: MenuSnapshot,
    status: ReservationStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Assembles a reservation from stored parts.
    pub(crate) const fn from_parts(
        id: ReservationId,
        slot: SlotKey,
        user_id: UserId,
        menu: MenuSnapshot,
        status: ReservationStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            slot,
            user_id,
            menu,
            status,
            created_at,
            updated_at,
        }
    }

    /// Returns the reservation identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the occupied slot.
    #[must_use]
    pub const fn slot(&self) -> SlotKey {
        self.slot
    }

    /// Returns the booking user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the menu snapshot taken at booking time.
    #[must_use]
    pub const fn menu(&self) -> &MenuSnapshot {
        &self.menu
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the last status change.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the status and update timestamp.
    ///
    /// Only the store calls this, after the lifecycle state machine has
    /// approved the transition.
    pub(crate) fn with_status(mut self, status: ReservationStatus, at: DateTime<Utc>) -> Self {
        self.status = status;
        self.updated_at = at;
        self
    }
}

/// Insert payload for a reservation not yet persisted.
///
/// The store assigns the identifier and timestamps at insert time.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yoyaku::{MenuId, MenuSnapshot, NewReservation, SalonId, SlotKey, UserId};
///
/// let slot = SlotKey::new(
///     SalonId::new(1),
///     NaiveDate::from_ymd_opt(2029, 6, 4).unwrap(),
///     "10:00".parse().unwrap(),
/// );
/// let menu = MenuSnapshot::new(MenuId::new(7), "Cut", 30, 4500).unwrap();
/// let new = NewReservation::new(slot, UserId::new(12), menu);
/// assert_eq!(new.status, yoyaku::ReservationStatus::Requested);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// The slot to occupy.
    pub slot: SlotKey,
    /// The booking user.
    pub user_id: UserId,
    /// Menu snapshot taken at booking time.
    pub menu: MenuSnapshot,
    /// Initial status; defaults to [`ReservationStatus::Requested`].
    pub status: ReservationStatus,
}

impl NewReservation {
    /// Creates an insert payload in the `Requested` state.
    #[must_use]
    pub const fn new(slot: SlotKey, user_id: UserId, menu: MenuSnapshot) -> Self {
        Self {
            slot,
            user_id,
            menu,
            status: ReservationStatus::Requested,
        }
    }

    /// Overrides the initial status.
    ///
    /// Intended for fixtures and restores; normal submissions always start
    /// as `Requested`.
    #[must_use]
    pub const fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
