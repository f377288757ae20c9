//! List command implementation.
//!
//! Operator listing of a salon's reservations, ordered by date and time.

use clap::Args;
use yoyaku::{DateRange, Principal, SalonId, StaticDirectory};

use crate::error::CliError;
use crate::utils::{
    open_service, parse_date, print_reservations, GlobalOptions, OutputFormat,
};

/// List a salon's reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Salon id (acts as the operator principal)
    #[arg(long, value_name = "ID")]
    pub salon: i64,

    /// Start of the date range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "to")]
    pub from: Option<String>,

    /// End of the date range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "from")]
    pub to: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Listings don't consult salon/menu lookups, so no directory file
        // is needed here.
        let service = open_service(global, StaticDirectory::default())?;
        let salon = SalonId::new(self.salon);

        let range = match (&self.from, &self.to) {
            (Some(from), Some(to)) => Some(
                DateRange::new(parse_date(from)?, parse_date(to)?)
                    .map_err(|e| CliError::InvalidArguments(e.to_string()))?,
            ),
            _ => None,
        };

        let reservations =
            service.list_salon(&Principal::salon(salon), salon, range.as_ref())?;
        print_reservations(&reservations, self.output)?;
        Ok(())
    }
}
