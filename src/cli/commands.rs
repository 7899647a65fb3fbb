//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GigPoint API probe
#[derive(Parser, Debug)]
#[command(name = "gigpoint-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Profile file (YAML) with origin, timeout, and credentials
    #[arg(short, long, global = true)]
    pub profile: Option<PathBuf>,

    /// Backend origin (overrides the profile)
    #[arg(short, long, global = true)]
    pub origin: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and print the session user
    Login {
        /// Account email (falls back to the profile)
        #[arg(long)]
        email: Option<String>,

        /// Account password (falls back to the profile)
        #[arg(long)]
        password: Option<String>,
    },

    /// GET an endpoint and print the JSON response
    Get {
        /// Endpoint path, e.g. /api/projects
        path: String,

        /// Query parameters as key=value (repeatable)
        #[arg(short, long)]
        query: Vec<String>,
    },

    /// POST a JSON body to an endpoint and print the response
    Post {
        /// Endpoint path, e.g. /api/biddings
        path: String,

        /// Inline JSON body (defaults to an empty object)
        #[arg(short, long)]
        body: Option<String>,
    },
}
