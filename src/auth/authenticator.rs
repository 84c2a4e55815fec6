//! Authenticator implementation
//!
//! Obtains a bearer token from configuration or from the credential exchange,
//! caches it, and re-authenticates when a cached exchanged token has expired.

use super::token::is_token_expired;
use super::types::{AuthenticationResponse, CachedToken};
use crate::config::{ClientConfig, CredentialMode};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Sends the serialized credentials to the authentication endpoint
///
/// Implemented by [`crate::http::HttpClient`]; tests plug in their own.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    /// POST `body` to `path` and return the raw reply body
    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: AuthTransport + ?Sized> AuthTransport for Arc<T> {
    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        (**self).post(path, body).await
    }
}

/// Authenticator manages the bearer token for an API client
pub struct Authenticator {
    /// Client configuration holding the credentials
    config: ClientConfig,
    /// Transport for the credential exchange
    transport: Arc<dyn AuthTransport>,
    /// Most recent token; `None` until the first successful authentication
    cached_token: RwLock<Option<CachedToken>>,
}

impl Authenticator {
    /// Create an authenticator over the given transport
    pub fn new(config: ClientConfig, transport: Arc<dyn AuthTransport>) -> Self {
        Self {
            config,
            transport,
            cached_token: RwLock::new(None),
        }
    }

    /// Authenticate and replace the cached token.
    ///
    /// With an API key the key itself becomes the token. With
    /// username/password the credentials are exchanged at the configured
    /// authentication path. On failure the previous token is left untouched.
    pub async fn authenticate(&self) -> Result<()> {
        let mut cached = self.cached_token.write().await;
        *cached = Some(self.acquire().await?);
        Ok(())
    }

    /// Return a valid token, authenticating or refreshing as needed
    pub async fn get_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !needs_refresh(token)? {
                    debug!("Using cached token");
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another caller may have refreshed while we waited for the lock
        if let Some(token) = cached.as_ref() {
            if !needs_refresh(token)? {
                return Ok(token.token.clone());
            }
            info!("Cached token has expired, re-authenticating");
        }

        let fresh = self.acquire().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    /// Drop the cached token; the next `get_token` authenticates again
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Whether a token is currently cached
    pub async fn is_authenticated(&self) -> bool {
        self.cached_token.read().await.is_some()
    }

    /// Peek at the cached token without checking or refreshing it
    pub async fn cached_token(&self) -> Option<CachedToken> {
        self.cached_token.read().await.clone()
    }

    /// Credential mode selected by the configuration
    pub fn mode(&self) -> Result<CredentialMode> {
        self.config.credential_mode()
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Produce a new token without touching the cache
    async fn acquire(&self) -> Result<CachedToken> {
        let Some(credentials) = self.config.credentials() else {
            return match self.config.api_key() {
                Some(key) => {
                    debug!("Using configured API key as bearer token");
                    Ok(CachedToken::from_api_key(key))
                }
                None => {
                    error!("Error authenticating: no apikey or username/password provided");
                    Err(Error::config("no apikey or username/password provided"))
                }
            };
        };

        let body = serde_json::to_vec(&credentials).map_err(|e| {
            warn!(error = %e, "Error marshaling credentials");
            Error::serialization(e.to_string())
        })?;

        info!(
            path = %self.config.auth_path,
            username = %credentials.username,
            "Authenticating with username/password"
        );

        let reply = self
            .transport
            .post(&self.config.auth_path, body)
            .await
            .map_err(|e| {
                warn!(error = %e, "Error authenticating");
                Error::transport(e.to_string())
            })?;

        let response: AuthenticationResponse = serde_json::from_slice(&reply).map_err(|e| {
            warn!(error = %e, "Error unmarshaling authentication response");
            Error::deserialization(e.to_string())
        })?;

        if response.password_expired {
            warn!(username = %credentials.username, "Account password has expired");
            return Err(Error::ExpiredCredential);
        }

        if response.token.is_empty() {
            warn!("Authentication response did not contain a token");
            return Err(Error::deserialization(
                "authentication response did not contain a token",
            ));
        }

        debug!("Authentication succeeded");
        Ok(CachedToken::from_response(response))
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// API keys never expire; exchanged tokens are checked against their `exp`
fn needs_refresh(cached: &CachedToken) -> Result<bool> {
    if !cached.is_expiring() {
        return Ok(false);
    }
    is_token_expired(&cached.token)
        .inspect_err(|e| warn!(error = %e, "Error checking token expiration"))
}
