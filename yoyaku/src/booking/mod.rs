//! Booking service layer.
//!
//! Combines the slot calendar, the reservation store, and the lifecycle
//! state machine behind one orchestration surface: query available slots,
//! submit bookings, list reservations, and drive status transitions.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use yoyaku::{
//!     BookingRequest, BookingService, Database, DatabaseConfig, MenuId, Principal, SalonId,
//!     StaticDirectory, UserId,
//! };
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/yoyaku.db")).unwrap();
//! let directory = StaticDirectory::from_yaml_file("salons.yaml".as_ref()).unwrap();
//! let mut service = BookingService::new(db, directory.clone(), directory);
//!
//! let request = BookingRequest::new(
//!     SalonId::new(1),
//!     NaiveDate::from_ymd_opt(2029, 6, 4).unwrap(),
//!     "10:00".parse().unwrap(),
//!     MenuId::new(10),
//! );
//! let reservation = service
//!     .submit(&Principal::user(UserId::new(12)), &request)
//!     .unwrap();
//! println!("booked: {}", reservation.id());
//! ```

mod notify;
mod service;

pub use notify::{BookingNotifier, LoggingNotifier, NoopNotifier};
pub use service::{BookingRequest, BookingService};
