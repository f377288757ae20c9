//! CLI structure and command definitions.
//!
//! Defines the main CLI structure using clap's derive macros, including
//! global options and subcommands.

use crate::commands::{
    BookCommand, CancelCommand, CompleteCommand, CompletionsCommand, ConfirmCommand, InitCommand,
    ListCommand, ShowDataDirCommand, SlotsCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing salon booking reservations.
#[derive(Parser)]
#[command(name = "yoyaku")]
#[command(version, about = "Manage salon booking reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "YOYAKU_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "YOYAKU_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "YOYAKU_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// Salon/menu directory file (YAML)
    #[arg(long, value_name = "FILE", global = true, env = "YOYAKU_DIRECTORY")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the reservation database
    Init(InitCommand),

    /// List available booking slots for a salon, date, and menu item
    Slots(SlotsCommand),

    /// Submit a booking as a user
    Book(BookCommand),

    /// List a salon's reservations (operator)
    List(ListCommand),

    /// Confirm a requested reservation (operator)
    Confirm(ConfirmCommand),

    /// Mark a confirmed reservation as completed (operator)
    Complete(CompleteCommand),

    /// Cancel a reservation (user or operator)
    Cancel(CancelCommand),

    /// Print the resolved data directory
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
