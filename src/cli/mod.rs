//! CLI module
//!
//! Command-line interface for the API client.
//!
//! # Commands
//!
//! - `token` - Authenticate and print the bearer token
//! - `inspect` - Show a token's unverified expiry
//! - `get` - Authenticated GET request

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
