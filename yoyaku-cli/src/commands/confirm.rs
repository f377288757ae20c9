//! Confirm command implementation.

use clap::Args;
use yoyaku::{BookingEvent, Principal, ReservationId, SalonId, StaticDirectory};

use crate::error::CliError;
use crate::utils::{open_service, print_reservation, GlobalOptions, OutputFormat};

/// Confirm a requested reservation.
#[derive(Args)]
pub struct ConfirmCommand {
    /// Reservation id
    #[arg(value_name = "RESERVATION_ID")]
    pub reservation: i64,

    /// Salon id (acts as the operator principal)
    #[arg(long, value_name = "ID")]
    pub salon: i64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut service = open_service(global, StaticDirectory::default())?;
        let reservation = service.transition(
            &Principal::salon(SalonId::new(self.salon)),
            ReservationId::new(self.reservation),
            BookingEvent::Confirm,
        )?;
        print_reservation(&reservation, self.output)?;
        Ok(())
    }
}
