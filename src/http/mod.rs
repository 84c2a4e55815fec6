//! HTTP client module
//!
//! Provides the reqwest-based client used both for the credential exchange
//! and for authenticated API calls.

mod client;

pub use client::HttpClient;
