use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info, warn};

use ai_client::{Claude, CompletionBackend};
use foredesk_common::{AgentError, Config, Interpretation, Turn};

use crate::prompt::PromptStyle;
use crate::reply::parse_reply;

/// The fixed reply returned whenever interpretation fails for any reason.
pub const FALLBACK_RESPONSE: &str = "I understand you're asking about resort operations. \
Could you be more specific about what changes you'd like to make to the forecast?";

/// Turns free-text operational messages into structured forecast adjustments
/// by asking the hosted model and parsing its reply.
///
/// Each interpreter owns its conversation history; give every caller its own
/// instance. The history is append-only and unbounded.
pub struct Interpreter {
    backend: Arc<dyn CompletionBackend>,
    style: PromptStyle,
    max_tokens: Option<u32>,
    history: Vec<Turn>,
}

impl Interpreter {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            style: PromptStyle::default(),
            max_tokens: None,
            history: Vec::new(),
        }
    }

    /// Build an interpreter backed by the live Claude API.
    pub fn from_config(config: &Config) -> Self {
        let claude = Claude::new(&config.anthropic_api_key, &config.model);
        Self::new(Arc::new(claude))
    }

    pub fn with_style(mut self, style: PromptStyle) -> Self {
        self.style = style;
        self
    }

    /// Override the output-token bound; defaults to the prompt style's budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Interpret one user message.
    ///
    /// Never fails from the caller's perspective: any upstream, parse, or
    /// validation error is logged and collapsed into the fixed fallback
    /// result with an empty modification list. The user turn and the chosen
    /// response text (real or fallback) are appended to the history in that
    /// order.
    pub async fn interpret(
        &mut self,
        message: &str,
        current_forecast: Option<&serde_json::Value>,
    ) -> Interpretation {
        // Accepted for interface compatibility; the prompt does not embed it.
        if current_forecast.is_some() {
            debug!("Forecast context supplied but not used in prompt construction");
        }

        let interpretation = match self.run(message).await {
            Ok(interpretation) => {
                info!(
                    modifications = interpretation.modifications.len(),
                    "Interpreted message"
                );
                interpretation
            }
            Err(e) => {
                warn!(
                    category = e.category(),
                    error = %e,
                    "Interpretation failed, returning fallback"
                );
                Interpretation {
                    response: FALLBACK_RESPONSE.to_string(),
                    modifications: Vec::new(),
                }
            }
        };

        self.history.push(Turn::user(message));
        self.history
            .push(Turn::assistant(interpretation.response.clone()));

        interpretation
    }

    async fn run(&self, message: &str) -> Result<Interpretation, AgentError> {
        let now = Local::now();
        let prompt = self.style.build(message, now.date_naive(), now.time());

        let max_tokens = self.max_tokens.unwrap_or_else(|| self.style.max_tokens());
        let text = self
            .backend
            .complete(&prompt, max_tokens)
            .await
            .map_err(AgentError::Upstream)?;

        parse_reply(&text, self.style)
    }
}
