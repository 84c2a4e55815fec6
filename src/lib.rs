//! # Claroty API client
//!
//! REST client for Claroty CTD with bearer token management.
//!
//! ## Features
//!
//! - **Two credential modes**: static API key, or username/password exchanged
//!   for a token at `/auth/authenticate`
//! - **Token caching**: the token is reused until its `exp` claim passes,
//!   then fetched again
//! - **Async and blocking**: `auth::Authenticator` for tokio callers,
//!   `blocking::Authenticator` for synchronous ones
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use claroty_api_client::{ApiClient, ClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder("https://ctd.example.com")
//!         .username("admin")
//!         .password("secret")
//!         .build();
//!
//!     let client = ApiClient::new(config)?;
//!     let sites: serde_json::Value = client.get_json("/ranger/sites").await?;
//!     println!("{sites:#}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                   ApiClient                    │
//! │        get_json / post_json + bearer token     │
//! └───────────────┬────────────────────────────────┘
//!                 │
//! ┌───────────────┴──────────┐    ┌────────────────┐
//! │      Authenticator       │───▶│   HttpClient   │
//! │ authenticate / get_token │    │ (AuthTransport)│
//! │  unverified exp check    │    └────────────────┘
//! └──────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Client configuration
pub mod config;

/// Token acquisition, caching and expiry checks
pub mod auth;

/// reqwest-based HTTP client
pub mod http;

/// Authenticated API client
pub mod client;

/// Synchronous authenticator
pub mod blocking;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{is_token_expired, token_expiry, AuthTransport, Authenticator};
pub use client::ApiClient;
pub use config::{ClientConfig, CredentialMode};
pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
