//! CLI runner - executes commands

use crate::auth::token_expiry;
use crate::cli::commands::{Cli, Commands};
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use chrono::Utc;
use serde_json::{json, Value};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Token => self.token().await,
            Commands::Inspect { token } => Self::inspect(token),
            Commands::Get { path } => self.get(path).await,
        }
    }

    /// Load the config file, if any, and overlay flags and env vars
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match (&self.cli.config, &self.cli.url) {
            (Some(path), _) => ClientConfig::from_file(path)?,
            (None, Some(url)) => ClientConfig::builder(url.clone()).build(),
            (None, None) => {
                return Err(Error::config(
                    "API URL not specified (use --url or --config)",
                ))
            }
        };

        if let Some(url) = &self.cli.url {
            config.base_url.clone_from(url);
        }
        if let Some(username) = &self.cli.username {
            config.username = Some(username.clone());
        }
        if let Some(password) = &self.cli.password {
            config.password = Some(password.clone());
        }
        if let Some(api_key) = &self.cli.api_key {
            config.api_key = Some(api_key.clone());
        }
        if self.cli.insecure {
            config.danger_accept_invalid_certs = true;
        }

        Ok(config)
    }

    async fn token(&self) -> Result<()> {
        let client = ApiClient::new(self.load_config()?)?;
        let token = client.token().await?;
        println!("{token}");
        Ok(())
    }

    fn inspect(token: &str) -> Result<()> {
        let expires_at = token_expiry(token)?;
        let report = json!({
            "expires_at": expires_at.to_rfc3339(),
            "expired": expires_at < Utc::now(),
        });
        println!("{report:#}");
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<()> {
        let client = ApiClient::new(self.load_config()?)?;
        let value: Value = client.get_json(path).await?;
        println!("{value:#}");
        Ok(())
    }
}
