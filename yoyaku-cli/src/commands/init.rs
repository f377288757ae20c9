//! Init command implementation.

use clap::Args;
use yoyaku::database::resolve_database_path;

use crate::error::CliError;
use crate::utils::{open_database, GlobalOptions};

/// Initialize the reservation database.
#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Opening with auto-create creates the directory, the database
        // file, and the schema.
        let create = GlobalOptions {
            disable_autoinit: false,
            ..global.clone()
        };
        let _db = open_database(&create)?;

        let path = resolve_database_path(global.data_dir.as_deref())
            .map_err(|e| CliError::Config(e.to_string()))?;
        if !global.quiet {
            println!("Initialized reservation database at {}", path.display());
        }
        Ok(())
    }
}
