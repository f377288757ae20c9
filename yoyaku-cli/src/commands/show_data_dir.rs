//! Show-data-dir command implementation.

use clap::Args;
use yoyaku::database::default_data_dir;

use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Print the resolved data directory.
#[derive(Args)]
pub struct ShowDataDirCommand {}

impl ShowDataDirCommand {
    /// Execute the show-data-dir command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let dir = match &global.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir().map_err(|e| CliError::Config(e.to_string()))?,
        };
        println!("{}", dir.display());
        Ok(())
    }
}
