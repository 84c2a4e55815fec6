//! Auth wire types and the cached token
//!
//! `Credentials` and `AuthenticationResponse` mirror the JSON bodies of the
//! authentication endpoint.

use serde::{Deserialize, Serialize};

/// Username/password pair posted to the authentication endpoint
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create a credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Reply of the authentication endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponse {
    /// Issued bearer token
    #[serde(default)]
    pub token: String,
    /// Set when the account password must be changed before logging in
    #[serde(default)]
    pub password_expired: bool,
}

/// Where a cached token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Configured API key, stored as-is and never expiry-checked
    Static,
    /// Issued by the authentication endpoint
    Exchanged,
}

/// Token held by the authenticator between calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    /// The bearer token
    pub token: String,
    /// How it was obtained
    pub source: TokenSource,
}

impl CachedToken {
    /// Cache a configured API key
    pub fn from_api_key(key: impl Into<String>) -> Self {
        Self {
            token: key.into(),
            source: TokenSource::Static,
        }
    }

    /// Cache a token issued by the authentication endpoint
    pub fn from_response(response: AuthenticationResponse) -> Self {
        Self {
            token: response.token,
            source: TokenSource::Exchanged,
        }
    }

    /// Whether this token goes through expiry checks
    pub fn is_expiring(&self) -> bool {
        self.source == TokenSource::Exchanged
    }
}
