//! CLI module for superheroes
//!
//! Provides command-line interface for:
//! - init: Create the schema
//! - seed: Load the demo data
//! - serve: Run the HTTP API

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, CommonArgs};
pub use commands::{init, load_config, run_command, seed, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
