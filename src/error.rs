//! Error types for the Claroty API client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Claroty API client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Error marshaling credentials: {message}")]
    Serialization { message: String },

    #[error("Error authenticating: {message}")]
    Transport { message: String },

    #[error("Error unmarshaling authentication response: {message}")]
    Deserialization { message: String },

    #[error("Account password has expired")]
    ExpiredCredential,

    #[error("Error parsing token: {message}")]
    TokenParse { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a credential serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a response deserialization error
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization {
            message: message.into(),
        }
    }

    /// Create a token parse error
    pub fn token_parse(message: impl Into<String>) -> Self {
        Self::TokenParse {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Whether this error came out of the authentication exchange itself
    /// rather than from configuration or token inspection
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Error::Serialization { .. }
                | Error::Transport { .. }
                | Error::Deserialization { .. }
                | Error::ExpiredCredential
        )
    }
}

/// Result type alias for the Claroty API client
pub type Result<T> = std::result::Result<T, Error>;
