//! CLI command implementations.
//!
//! One module per command; each exposes an `Args` struct with an
//! `execute(&GlobalOptions)` method.

mod book;
mod cancel;
mod complete;
mod completions;
mod confirm;
mod init;
mod list;
mod show_data_dir;
mod slots;

pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use complete::CompleteCommand;
pub use completions::CompletionsCommand;
pub use confirm::ConfirmCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use slots::SlotsCommand;
