mod client;
pub(crate) mod types;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::traits::CompletionBackend;
use client::ClaudeClient;
use types::{ChatRequest, WireMessage};

// =============================================================================
// Claude Agent
// =============================================================================

#[derive(Clone)]
pub struct Claude {
    api_key: String,
    model: String,
    base_url: Option<String>,
}

impl Claude {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> ClaudeClient {
        let client = ClaudeClient::new(&self.api_key);
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    /// One-shot completion: single user message in, reply text out.
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .max_tokens(max_tokens)
            .message(WireMessage::user(prompt));

        let response = self.client().chat(&request).await?;

        response
            .text()
            .ok_or_else(|| anyhow!("No text content in Claude response"))
    }
}

#[async_trait]
impl CompletionBackend for Claude {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        Claude::complete(self, prompt, max_tokens).await
    }
}
