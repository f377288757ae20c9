//! Error types for the yoyaku library.
//!
//! This module provides the error hierarchy for all operations in the
//! booking core, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::lifecycle::BookingEvent;
use crate::reservation::{ReservationStatus, SlotKey};

/// Result type alias for operations that may fail with a yoyaku error.
///
/// # Examples
///
/// ```
/// use yoyaku::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(30)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the yoyaku library.
///
/// Variants map one-to-one onto the caller-facing taxonomy: validation
/// problems the caller must correct, missing resources, lost booking
/// races, rejected lifecycle transitions, and retryable storage
/// unavailability.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed input; the caller must correct and retry.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A concurrent booking won the race for this slot.
    ///
    /// The caller should re-fetch availability; the slot is no longer
    /// bookable.
    #[error("slot no longer available: {slot}")]
    SlotConflict {
        /// The contested slot.
        slot: SlotKey,
    },

    /// The lifecycle state machine rejected a transition.
    #[error("invalid transition: cannot {event} a {from} reservation: {reason}")]
    InvalidTransition {
        /// The status the reservation was in.
        from: ReservationStatus,
        /// The rejected event.
        event: BookingEvent,
        /// Why the transition was rejected.
        reason: String,
    },

    /// Storage is temporarily unavailable; safe to retry with backoff.
    #[error("storage unavailable: {details}")]
    Unavailable {
        /// Details about the unavailability.
        details: String,
    },

    /// An invalid slot time or opening interval was provided.
    #[error("invalid slot time {value}: {reason}")]
    InvalidSlotTime {
        /// The rejected input.
        value: String,
        /// The reason the input is invalid.
        reason: String,
    },

    /// An invalid date range was provided.
    #[error("invalid date range {start}..{end}: {reason}")]
    InvalidDateRange {
        /// The requested range start.
        start: chrono::NaiveDate,
        /// The requested range end.
        end: chrono::NaiveDate,
        /// The reason the range is invalid.
        reason: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

// Additional conversions for better ergonomics

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<crate::lifecycle::TransitionError> for Error {
    fn from(err: crate::lifecycle::TransitionError) -> Self {
        Self::InvalidTransition {
            from: err.from,
            event: err.event,
            reason: err.reason,
        }
    }
}

impl From<crate::slot::InvalidSlotTimeError> for Error {
    fn from(err: crate::slot::InvalidSlotTimeError) -> Self {
        Self::InvalidSlotTime {
            value: err.value,
            reason: err.reason,
        }
    }
}

impl From<crate::slot::InvalidDateRangeError> for Error {
    fn from(err: crate::slot::InvalidDateRangeError) -> Self {
        Self::InvalidDateRange {
            start: err.start,
            end: err.end,
            reason: err.reason,
        }
    }
}

impl Error {
    /// Check if the error is a lost booking race.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SlotConflict { .. })
    }

    /// Check if the error indicates a missing resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error is transient and the operation may be retried.
    ///
    /// # Examples
    ///
    /// ```
    /// use yoyaku::Error;
    ///
    /// let err = Error::Unavailable { details: "busy".into() };
    /// assert!(err.is_retryable());
    /// ```
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
