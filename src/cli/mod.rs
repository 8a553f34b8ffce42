//! CLI module for the cost data service
//!
//! Provides subcommands for running the service:
//! - `serve`: HTTP server (default)
//! - `migrate`: apply PostgreSQL storage migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Cost Data Service - Tiered country, city and currency data
#[derive(Parser)]
#[command(name = "cost-data-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Apply storage migrations to the configured PostgreSQL database
    Migrate,
}

impl Cli {
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Serve)
    }
}
