//! Book command implementation.
//!
//! Submits a booking as a user. A lost race for the slot exits with the
//! semantic failure code and a hint to re-fetch availability.

use clap::Args;
use yoyaku::{BookingRequest, LoggingNotifier, MenuId, Principal, SalonId, UserId};

use crate::error::CliError;
use crate::utils::{
    load_directory, open_service, parse_date, parse_time, print_reservation, GlobalOptions,
    OutputFormat,
};

/// Submit a booking.
#[derive(Args)]
pub struct BookCommand {
    /// Salon id
    #[arg(long, value_name = "ID")]
    pub salon: i64,

    /// Date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Slot start time (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub time: String,

    /// Menu item id
    #[arg(long, value_name = "ID")]
    pub menu: i64,

    /// Booking user id
    #[arg(long, value_name = "ID")]
    pub user: i64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let directory = load_directory(global)?;
        let mut service = open_service(global, directory)?.with_notifier(Box::new(
            LoggingNotifier::new(yoyaku::init_logger(global.verbose, global.quiet)),
        ));

        let request = BookingRequest::new(
            SalonId::new(self.salon),
            parse_date(&self.date)?,
            parse_time(&self.time)?,
            MenuId::new(self.menu),
        );

        let reservation =
            service.submit(&Principal::user(UserId::new(self.user)), &request)?;
        print_reservation(&reservation, self.output)?;
        Ok(())
    }
}
