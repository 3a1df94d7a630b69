//! CLI argument definitions using clap
//!
//! Commands:
//! - superheroes init [--config <path>]
//! - superheroes seed [--config <path>]
//! - superheroes serve [--config <path>] [--port <port>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Superheroes - a REST service for heroes, powers and the links between them
#[derive(Parser, Debug)]
#[command(name = "superheroes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to configuration file. Defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the configured database URL
    #[arg(long)]
    pub database_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the schema in the configured database
    Init {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Create the schema and replace all rows with the demo data
    Seed {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Create the schema if needed and serve HTTP until Ctrl-C
    Serve {
        #[command(flatten)]
        common: CommonArgs,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
