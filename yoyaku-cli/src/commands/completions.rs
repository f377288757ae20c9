//! Completions command implementation.

use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Generate shell completions.
#[derive(Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let mut command = Cli::command();
        clap_complete::generate(self.shell, &mut command, "yoyaku", &mut std::io::stdout());
        Ok(())
    }
}
