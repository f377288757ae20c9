#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # yoyaku
//!
//! A library for managing salon booking reservations.
//!
//! This library provides the core types and logic for taking a time slot
//! from "available" to "booked" to "confirmed" or "cancelled": computing
//! bookable slots from opening hours, enforcing the one-active-reservation-
//! per-slot invariant at write time, and driving every status change
//! through a single lifecycle state machine.
//!
//! ## Core Types
//!
//! - [`SlotTime`] and [`SlotKey`]: slot start times and the conflict key
//! - [`Reservation`] and [`ReservationStatus`]: persisted booking records
//! - [`BookingService`]: orchestration over calendar, store, and lifecycle
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use yoyaku::{SlotTime, SLOT_MINUTES};
//!
//! // Slot start times sit on a fixed 30-minute grid
//! let slot: SlotTime = "09:30".parse().unwrap();
//! assert_eq!(slot.to_string(), "09:30");
//! assert_eq!(SLOT_MINUTES, 30);
//!
//! // Misaligned times are rejected
//! assert!("09:10".parse::<SlotTime>().is_err());
//! ```

pub mod booking;
pub mod calendar;
pub mod database;
pub mod directory;
pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod logging;
pub mod reservation;
pub mod slot;

// Re-export key types at crate root for convenience
pub use booking::{BookingNotifier, BookingRequest, BookingService, LoggingNotifier, NoopNotifier};
pub use database::{Database, DatabaseConfig};
pub use directory::{
    MenuDirectory, MenuItem, Principal, Role, Salon, SalonDirectory, StaticDirectory,
};
pub use error::{Error, Result};
pub use ids::{MenuId, ReservationId, SalonId, UserId};
pub use lifecycle::{BookingEvent, TransitionRequest};
pub use logging::{init_logger, LogLevel, Logger};
pub use reservation::{
    MenuSnapshot, NewReservation, Reservation, ReservationStatus, SlotKey,
};
pub use slot::{DateRange, DayHours, OpeningHours, SlotTime, SLOT_MINUTES};
