use thiserror::Error;

/// Internal failure taxonomy for one interpretation attempt. Every variant
/// collapses to the same fallback result at the interpreter boundary; the
/// distinction exists for diagnostics only.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("upstream completion failed: {0}")]
    Upstream(#[source] anyhow::Error),

    #[error("no JSON object found in model reply")]
    NoJson,

    #[error("malformed model reply: {0}")]
    MalformedReply(#[from] serde_json::Error),

    #[error("invalid field in model reply: {0}")]
    InvalidField(String),
}

impl AgentError {
    /// Short tag for log lines.
    pub fn category(&self) -> &'static str {
        match self {
            AgentError::Upstream(_) => "upstream",
            AgentError::NoJson | AgentError::MalformedReply(_) => "parse",
            AgentError::InvalidField(_) => "validation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_stay_internal_shorthand() {
        assert_eq!(AgentError::NoJson.category(), "parse");
        assert_eq!(
            AgentError::InvalidField("unknown metric: spa".into()).category(),
            "validation"
        );
        assert_eq!(
            AgentError::Upstream(anyhow::anyhow!("connection refused")).category(),
            "upstream"
        );
    }
}
