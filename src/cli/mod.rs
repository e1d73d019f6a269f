//! CLI module

pub mod serve;

use clap::{Parser, Subcommand};

/// Accounts API - user management and authentication service
#[derive(Parser)]
#[command(name = "accounts-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}
