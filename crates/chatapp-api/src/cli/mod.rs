//! CLI command definitions for the `chatapp` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod history;
pub mod user;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Minimal chat backend: REST server plus account and history tools.
#[derive(Parser)]
#[command(name = "chatapp", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Address to bind (defaults to config `server.host`).
        #[arg(long, env = "CHATAPP_HOST")]
        host: Option<String>,

        /// Port to listen on (defaults to config `server.port`).
        #[arg(short, long, env = "CHATAPP_PORT")]
        port: Option<u16>,
    },

    /// Register a new user account.
    Register {
        username: String,

        #[arg(long)]
        email: Option<String>,

        /// Password (prompted with hidden input when omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// List registered users.
    Users,

    /// Show the conversation between two users.
    History {
        user_a: String,
        user_b: String,

        /// Maximum number of messages (most recent).
        #[arg(short, long, default_value_t = 50)]
        limit: u32,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Default tracing directive for the chosen verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,chatapp=debug",
            _ => "trace",
        }
    }
}
