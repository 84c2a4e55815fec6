//! Authenticated API client
//!
//! `ApiClient` pairs an [`HttpClient`] with an [`Authenticator`] so every call
//! carries a current bearer token.

use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Claroty REST API client
#[derive(Debug)]
pub struct ApiClient {
    http: Arc<HttpClient>,
    authenticator: Authenticator,
}

impl ApiClient {
    /// Create a client, validating the configuration first
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = Arc::new(HttpClient::new(&config)?);
        let authenticator = Authenticator::new(config, http.clone());
        Ok(Self {
            http,
            authenticator,
        })
    }

    /// Current bearer token, authenticating or refreshing as needed
    pub async fn token(&self) -> Result<String> {
        self.authenticator.get_token().await
    }

    /// Get the authenticator
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Get the HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Authenticated GET, parsing the JSON reply
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_json::<(), T>(Method::GET, path, None).await
    }

    /// Authenticated POST with a JSON body, parsing the JSON reply
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request_json(Method::POST, path, Some(body)).await
    }

    async fn request_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.authenticator.get_token().await?;
        debug!("{} {}", method, path);
        self.http
            .request_json(method, path, Some(token.as_str()), body)
            .await
    }
}
