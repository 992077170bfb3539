use anyhow::Result;
use async_trait::async_trait;

/// One prompt in, generated text out. The seam between callers and the
/// hosted model so callers can be driven by a stub in tests.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String>;
}
