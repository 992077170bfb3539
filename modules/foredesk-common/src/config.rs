use anyhow::{Context, Result};
use std::env;
use tracing::info;

const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub model: String,
}

impl Config {
    /// Load configuration from environment variables. Returns an error when
    /// the credential is missing so entry points can report it and exit
    /// without ever constructing an interpreter.
    pub fn from_env() -> Result<Self> {
        let anthropic_api_key = env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY environment variable is required")?;
        let model = env::var("FOREDESK_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            anthropic_api_key,
            model,
        })
    }

    /// Log the loaded configuration without exposing the credential.
    pub fn log_redacted(&self) {
        info!(
            model = self.model.as_str(),
            api_key_len = self.anthropic_api_key.len(),
            "Configuration loaded"
        );
    }
}
