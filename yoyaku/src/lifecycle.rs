//! Booking lifecycle state machine.
//!
//! A reservation starts as `requested` and moves through the statuses via
//! named events; this module is the single authority on which moves are
//! legal. Guards live here too: who may trigger an event, and whether the
//! slot has elapsed for completion.
//!
//! | From      | Event    | To        | Guard                                   |
//! |-----------|----------|-----------|-----------------------------------------|
//! | requested | confirm  | confirmed | salon operator only                     |
//! | requested | cancel   | cancelled | none                                    |
//! | confirmed | cancel   | cancelled | none                                    |
//! | confirmed | complete | completed | salon operator only; slot start elapsed |
//!
//! `completed` and `cancelled` are terminal: every further event fails.

use std::fmt;

use chrono::NaiveDateTime;

use crate::directory::Role;
use crate::reservation::{ReservationStatus, SlotKey};

/// A named lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingEvent {
    /// Salon operator accepts a requested booking.
    Confirm,
    /// Salon operator records the service as rendered.
    Complete,
    /// User or operator withdraws the booking.
    Cancel,
}

impl BookingEvent {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        }
    }
}

impl fmt::Display for BookingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The context a transition is evaluated in.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRequest {
    /// The event to apply.
    pub event: BookingEvent,
    /// Role of the acting principal.
    pub actor: Role,
    /// The civil time the transition is requested at, used by the
    /// completion guard.
    pub now: NaiveDateTime,
}

/// Computes the status a reservation moves to under an event.
///
/// Pure function: callers (the store) persist the returned status. Guard
/// failures and illegal moves are both [`TransitionError`]s.
///
/// # Errors
///
/// Returns an error if the current status is terminal, the event has no
/// transition from the current status, or a guard rejects the actor or
/// timing.
pub fn next_status(
    current: ReservationStatus,
    slot: &SlotKey,
    request: &TransitionRequest,
) -> Result<ReservationStatus, TransitionError> {
    let fail = |reason: &str| TransitionError {
        from: current,
        event: request.event,
        reason: reason.to_string(),
    };

    if current.is_terminal() {
        return Err(fail("status is terminal"));
    }

    match (current, request.event) {
        (ReservationStatus::Requested, BookingEvent::Confirm) => {
            if request.actor != Role::Salon {
                return Err(fail("only the salon operator may confirm"));
            }
            Ok(ReservationStatus::Confirmed)
        }
        (ReservationStatus::Confirmed, BookingEvent::Complete) => {
            if request.actor != Role::Salon {
                return Err(fail("only the salon operator may complete"));
            }
            if request.now < slot.start_datetime() {
                return Err(fail("slot has not started yet"));
            }
            Ok(ReservationStatus::Completed)
        }
        (ReservationStatus::Requested | ReservationStatus::Confirmed, BookingEvent::Cancel) => {
            Ok(ReservationStatus::Cancelled)
        }
        (ReservationStatus::Requested, BookingEvent::Complete) => {
            Err(fail("booking must be confirmed before completion"))
        }
        (ReservationStatus::Confirmed, BookingEvent::Confirm) => {
            Err(fail("booking is already confirmed"))
        }
        // Terminal statuses were rejected above.
        (ReservationStatus::Completed | ReservationStatus::Cancelled, _) => {
            Err(fail("status is terminal"))
        }
    }
}

/// Error type for rejected lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    /// The status the reservation was in.
    pub from: ReservationStatus,
    /// The rejected event.
    pub event: BookingEvent,
    /// Why the transition was rejected.
    pub reason: String,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot {} a {} reservation: {}",
            self.event, self.from, self.reason
        )
    }
}

impl std::error::Error for TransitionError {}
