//! Booking event hooks for notification collaborators.
//!
//! Notification delivery (mail, push, whatever the deployment wires up)
//! lives outside this core. The service only promises to emit a
//! booking-created event on every successful submission; collaborators
//! attach by implementing [`BookingNotifier`].

use crate::logging::Logger;
use crate::reservation::Reservation;

/// Receiver of booking lifecycle events.
pub trait BookingNotifier {
    /// Called after a booking has been durably created.
    fn booking_created(&self, reservation: &Reservation);
}

/// Notifier that drops all events; the default wiring.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl BookingNotifier for NoopNotifier {
    fn booking_created(&self, _reservation: &Reservation) {}
}

/// Notifier that writes events through the crate logger.
pub struct LoggingNotifier {
    logger: Logger,
}

impl LoggingNotifier {
    /// Creates a notifier writing through the given logger.
    #[must_use]
    pub const fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl BookingNotifier for LoggingNotifier {
    fn booking_created(&self, reservation: &Reservation) {
        self.logger.info(&format!(
            "booking created: reservation {} for {} ({})",
            reservation.id(),
            reservation.slot(),
            reservation.menu().name()
        ));
    }
}
