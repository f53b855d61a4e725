//! Mode routing
//!
//! `serve` (or no command) starts the HTTP server; every other command runs
//! once through the CLI and exits.

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Server,
    Cli,
}

pub fn detect_mode(cmd: &Commands) -> Mode {
    match cmd {
        Commands::Serve => Mode::Server,
        _ => Mode::Cli,
    }
}
