//! Slots command implementation.
//!
//! Prints the bookable start times for a salon, date, and menu item: the
//! slot calendar minus already-booked slots.

use clap::Args;
use yoyaku::{MenuId, SalonId};

use crate::error::CliError;
use crate::utils::{load_directory, open_service, parse_date, GlobalOptions};

/// List available booking slots.
#[derive(Args)]
pub struct SlotsCommand {
    /// Salon id
    #[arg(long, value_name = "ID")]
    pub salon: i64,

    /// Date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Menu item id
    #[arg(long, value_name = "ID")]
    pub menu: i64,
}

impl SlotsCommand {
    /// Execute the slots command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let directory = load_directory(global)?;
        let service = open_service(global, directory)?;

        let date = parse_date(&self.date)?;
        let slots =
            service.available_slots(SalonId::new(self.salon), date, MenuId::new(self.menu))?;

        for slot in slots {
            println!("{slot}");
        }
        Ok(())
    }
}
