use async_trait::async_trait;

/// Model-family prefixes the completion backend can serve.
pub const SUPPORTED_MODEL_PREFIXES: [&str; 2] = ["gpt", "chatgpt"];

/// Whether `model` belongs to a recognized model family.
pub fn is_supported_model(model: &str) -> bool {
    SUPPORTED_MODEL_PREFIXES
        .iter()
        .any(|prefix| model.starts_with(prefix))
}

/// Failures of a single completion call.
///
/// Every variant ends up as a reply string at the relay boundary; the tags
/// exist so structural failures (auth) can be logged distinctly from routine
/// API errors without changing user-visible behavior.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("unsupported model: {model}")]
    UnsupportedModel { model: String },

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Port for a single request/response exchange with a hosted language model.
///
/// The request carries exactly one user-role message with the raw prompt: no
/// system prompt, no conversation history, no sampling overrides.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Map `(model, prompt)` to generated text.
    ///
    /// Implementations must reject unrecognized model families with
    /// [`CompletionError::UnsupportedModel`] before any network I/O.
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_supported_families() {
        assert!(is_supported_model("gpt-4"));
        assert!(is_supported_model("gpt-3.5-turbo"));
        assert!(is_supported_model("chatgpt-4o-latest"));
    }

    #[test]
    fn rejects_other_families() {
        assert!(!is_supported_model("llama-3"));
        assert!(!is_supported_model("claude-3-opus"));
        assert!(!is_supported_model("Gpt-4"));
        assert!(!is_supported_model(""));
    }
}
