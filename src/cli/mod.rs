//! CLI interface for Callboard

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "callboard")]
#[command(version = "0.3.0")]
#[command(about = "Rehearsal scheduling for musical groups", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new callboard.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "4850")]
        port: u16,
    },

    /// Create an account and sign in
    Register {
        /// Login email
        #[arg(short, long)]
        email: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,
    },

    /// Sign in with an existing account
    Login {
        /// Login email
        #[arg(short, long)]
        email: String,
    },

    /// Sign out and discard the stored credential
    Logout,

    /// Show the identity behind the stored credential
    Whoami,
}
