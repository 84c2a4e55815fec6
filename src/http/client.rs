//! HTTP client for the Claroty REST API
//!
//! Thin wrapper over reqwest that handles:
//! - Joining request paths onto the configured base URL
//! - Timeouts, user agent and TLS settings from `ClientConfig`
//! - Turning non-success statuses into errors
//! - Serving as the transport for the credential exchange

use crate::auth::AuthTransport;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// HTTP client bound to one API base URL
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client from the given configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request, optionally with a bearer token and a JSON body
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<&B>,
    ) -> Result<Response> {
        let url = self.build_url(path);
        let mut req = self.client.request(method.clone(), &url);

        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }

        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let response = check_status(response).await?;
        debug!("Request succeeded: {} {}", method, url);
        Ok(response)
    }

    /// Send a request and parse the JSON reply
    pub async fn request_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<&B>,
    ) -> Result<T> {
        let response = self.send(method, path, bearer, body).await?;
        let json: T = response.json().await?;
        Ok(json)
    }

    /// POST a pre-serialized JSON body and return the raw reply
    pub async fn post_bytes(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let response = check_status(response).await?;
        debug!("Request succeeded: POST {}", url);
        Ok(response.bytes().await?.to_vec())
    }

    /// Build full URL from path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait]
impl AuthTransport for HttpClient {
    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        self.post_bytes(path, body).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Map non-success statuses to `Error::HttpStatus`, keeping the body
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::http_status(status.as_u16(), body))
}
