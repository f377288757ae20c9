//! Cancel command implementation.
//!
//! Cancels a reservation as the booking user or the salon operator. The
//! normal path is the `cancel` lifecycle transition, which keeps the
//! record and releases the slot; `--purge` takes the legacy
//! delete-on-cancel path some older clients expect.

use clap::Args;
use yoyaku::{
    BookingEvent, Error as LibError, Principal, ReservationId, ReservationStatus, SalonId,
    StaticDirectory, UserId,
};

use crate::error::CliError;
use crate::utils::{open_service, GlobalOptions};

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "RESERVATION_ID")]
    pub reservation: i64,

    /// Act as this user (the booking's owner)
    #[arg(long, value_name = "ID", conflicts_with = "salon")]
    pub user: Option<i64>,

    /// Act as this salon's operator
    #[arg(long, value_name = "ID")]
    pub salon: Option<i64>,

    /// Physically delete the record (legacy cancel-as-delete behavior)
    #[arg(long)]
    pub purge: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let principal = match (self.user, self.salon) {
            (Some(user), None) => Principal::user(UserId::new(user)),
            (None, Some(salon)) => Principal::salon(SalonId::new(salon)),
            _ => {
                return Err(CliError::InvalidArguments(
                    "exactly one of --user or --salon is required".to_string(),
                ))
            }
        };

        let mut service = open_service(global, StaticDirectory::default())?;
        let id = ReservationId::new(self.reservation);

        if self.purge {
            if !service.database_mut().delete_reservation(id)? {
                return Err(CliError::Library(LibError::NotFound {
                    resource: format!("reservation {id}"),
                }));
            }
            if !global.quiet {
                println!("Deleted reservation {id}");
            }
            return Ok(());
        }

        match service.transition(&principal, id, BookingEvent::Cancel) {
            Ok(reservation) => {
                if !global.quiet {
                    println!("Cancelled reservation {}", reservation.id());
                }
                Ok(())
            }
            // Cancelling an already-cancelled reservation is a no-op
            // success for callers.
            Err(LibError::InvalidTransition {
                from: ReservationStatus::Cancelled,
                ..
            }) => {
                if !global.quiet {
                    println!("Reservation {id} is already cancelled");
                }
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
