//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Claroty API client CLI
#[derive(Parser, Debug)]
#[command(name = "claroty-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true, env = "CLAROTY_CONFIG")]
    pub config: Option<PathBuf>,

    /// API base URL (overrides the config file)
    #[arg(long, global = true, env = "CLAROTY_URL")]
    pub url: Option<String>,

    /// Username for the credential exchange
    #[arg(short, long, global = true, env = "CLAROTY_USERNAME")]
    pub username: Option<String>,

    /// Password for the credential exchange
    #[arg(long, global = true, env = "CLAROTY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Static API key
    #[arg(long, global = true, env = "CLAROTY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and print the bearer token
    Token,

    /// Show the expiry of a token without verifying it
    Inspect {
        /// Token to inspect
        token: String,
    },

    /// Authenticated GET, printing the JSON reply
    Get {
        /// Request path, e.g. /ranger/sites
        path: String,
    },
}
