pub mod commands;
mod core;
pub mod output;
pub mod registry;
mod shell;

pub use self::core::{CliError, CliMode, CommandError, CommandResult, ShellContext};
pub use shell::run_cli;
