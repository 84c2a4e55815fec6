//! Client configuration
//!
//! `ClientConfig` describes where the API lives and which credentials to use.
//! It can be loaded from YAML or assembled with [`ClientConfig::builder`].
//!
//! ```yaml
//! base_url: https://ctd.example.com
//! username: admin
//! password: hunter2
//! timeout_secs: 30
//! ```

use crate::auth::Credentials;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default path of the authentication endpoint
pub const DEFAULT_AUTH_PATH: &str = "/auth/authenticate";

// ============================================================================
// Credential Mode
// ============================================================================

/// How the client obtains its bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialMode {
    /// The configured API key is used as the token, no exchange happens
    ApiKey,
    /// Username and password are exchanged for a token
    Password,
}

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for the API client
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. `https://ctd.example.com`
    pub base_url: String,

    /// Username for the credential exchange
    #[serde(default)]
    pub username: Option<String>,

    /// Password for the credential exchange
    #[serde(default)]
    pub password: Option<String>,

    /// Static API key, used verbatim as the bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// Path of the authentication endpoint
    #[serde(default = "default_auth_path")]
    pub auth_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept self-signed or otherwise invalid TLS certificates
    #[serde(default)]
    pub danger_accept_invalid_certs: bool,
}

fn default_auth_path() -> String {
    DEFAULT_AUTH_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("claroty-api-client/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    /// Start building a config for the given base URL
    pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self {
                base_url: base_url.into(),
                username: None,
                password: None,
                api_key: None,
                auth_path: default_auth_path(),
                timeout_secs: default_timeout_secs(),
                user_agent: default_user_agent(),
                danger_accept_invalid_certs: false,
            },
        }
    }

    /// Parse a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Username and password, when both are present and non-empty
    pub fn credentials(&self) -> Option<Credentials> {
        match (
            non_empty(self.username.as_deref()),
            non_empty(self.password.as_deref()),
        ) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            _ => None,
        }
    }

    /// The API key, when present and non-empty
    pub fn api_key(&self) -> Option<&str> {
        non_empty(self.api_key.as_deref())
    }

    /// Decide which credential mode this config selects.
    ///
    /// Username/password take precedence over an API key.
    pub fn credential_mode(&self) -> Result<CredentialMode> {
        if self.credentials().is_some() {
            Ok(CredentialMode::Password)
        } else if self.api_key().is_some() {
            Ok(CredentialMode::ApiKey)
        } else {
            Err(Error::config("no apikey or username/password provided"))
        }
    }

    /// Check that the base URL parses and that credentials are usable
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        self.credential_mode()?;
        Ok(())
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("auth_path", &self.auth_path)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "danger_accept_invalid_certs",
                &self.danger_accept_invalid_certs,
            )
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the username
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self
    }

    /// Set the password
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    /// Set the static API key
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Override the authentication endpoint path
    #[must_use]
    pub fn auth_path(mut self, path: impl Into<String>) -> Self {
        self.config.auth_path = path.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs();
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Accept invalid TLS certificates
    #[must_use]
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.danger_accept_invalid_certs = accept;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_from_yaml_defaults() {
        let config = ClientConfig::from_yaml_str(
            r"
base_url: https://ctd.example.com
username: admin
password: secret
",
        )
        .unwrap();

        assert_eq!(config.base_url, "https://ctd.example.com");
        assert_eq!(config.auth_path, "/auth/authenticate");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("claroty-api-client/"));
        assert!(!config.danger_accept_invalid_certs);
        assert_eq!(config.credential_mode().unwrap(), CredentialMode::Password);
    }

    #[test]
    fn test_from_yaml_missing_base_url() {
        let result = ClientConfig::from_yaml_str("api_key: abc\n");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://ctd.example.com").unwrap();
        writeln!(file, "api_key: static-key").unwrap();
        writeln!(file, "timeout_secs: 5").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_key(), Some("static-key"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.credential_mode().unwrap(), CredentialMode::ApiKey);
    }

    #[test]
    fn test_from_file_not_found() {
        let result = ClientConfig::from_file("/nonexistent/claroty.yaml");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_password_wins_over_api_key() {
        let config = ClientConfig::builder("https://ctd.example.com")
            .username("admin")
            .password("secret")
            .api_key("key")
            .build();
        assert_eq!(config.credential_mode().unwrap(), CredentialMode::Password);
    }

    #[test]
    fn test_username_without_password_falls_back_to_api_key() {
        let config = ClientConfig::builder("https://ctd.example.com")
            .username("admin")
            .api_key("key")
            .build();
        assert!(config.credentials().is_none());
        assert_eq!(config.credential_mode().unwrap(), CredentialMode::ApiKey);
    }

    #[test]
    fn test_no_credentials() {
        let config = ClientConfig::builder("https://ctd.example.com")
            .username("admin")
            .build();
        assert!(matches!(
            config.credential_mode(),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_empty_values_count_as_absent() {
        let config = ClientConfig::builder("https://ctd.example.com")
            .username("")
            .password("")
            .api_key("")
            .build();
        assert!(config.credentials().is_none());
        assert!(config.api_key().is_none());
        assert!(config.credential_mode().is_err());
    }

    #[test]
    fn test_validate() {
        let config = ClientConfig::builder("https://ctd.example.com")
            .api_key("key")
            .build();
        assert!(config.validate().is_ok());

        let config = ClientConfig::builder("not a url").api_key("key").build();
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let config = ClientConfig::builder("https://ctd.example.com")
            .api_key("key")
            .timeout(Duration::from_secs(0))
            .build();
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ClientConfig::builder("https://ctd.example.com")
            .username("admin")
            .password("hunter2")
            .api_key("sk-live-123")
            .build();
        let debug = format!("{config:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("sk-live-123"));
    }
}
