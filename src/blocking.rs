//! Blocking authenticator
//!
//! Wraps the async [`crate::auth::Authenticator`] with a private
//! current-thread runtime so synchronous callers can use it. Every call
//! blocks the calling thread until it completes. Do not use from inside an
//! async runtime; `block_on` panics there.

use crate::auth::{self, AuthTransport, CachedToken};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// Synchronous counterpart of [`crate::auth::Authenticator`]
#[derive(Debug)]
pub struct Authenticator {
    inner: auth::Authenticator,
    runtime: Runtime,
}

impl Authenticator {
    /// Create a blocking authenticator over the given transport
    pub fn new(config: ClientConfig, transport: Arc<dyn AuthTransport>) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            inner: auth::Authenticator::new(config, transport),
            runtime,
        })
    }

    /// Create a blocking authenticator that talks HTTP to `config.base_url`
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let http = Arc::new(HttpClient::new(&config)?);
        Self::new(config, http)
    }

    /// See [`crate::auth::Authenticator::authenticate`]
    pub fn authenticate(&self) -> Result<()> {
        self.runtime.block_on(self.inner.authenticate())
    }

    /// See [`crate::auth::Authenticator::get_token`]
    pub fn get_token(&self) -> Result<String> {
        self.runtime.block_on(self.inner.get_token())
    }

    /// Drop the cached token
    pub fn clear_cache(&self) {
        self.runtime.block_on(self.inner.clear_cache());
    }

    /// Whether a token is currently cached
    pub fn is_authenticated(&self) -> bool {
        self.runtime.block_on(self.inner.is_authenticated())
    }

    /// Peek at the cached token
    pub fn cached_token(&self) -> Option<CachedToken> {
        self.runtime.block_on(self.inner.cached_token())
    }
}
