//! LLM backend boundary
//!
//! Provider-agnostic completion requests plus a config-driven factory.
//! Clients are constructed once at startup and injected into the stages
//! that need them; there is no global provider registry.

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod client;
mod error;
mod openai;
mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAiClient;
pub use types::{
    CompletionRequest, CompletionResponse, ContentBlock, Message, MessageContent, Role, StopReason, TokenUsage,
    ToolCall, ToolDefinition,
};

use crate::config::ResolvedLlmConfig;

/// Create an LLM client from a resolved provider configuration
///
/// Supports "anthropic", "openai", and "ollama" providers. Ollama is the
/// OpenAI-compatible client pointed at the configured base URL.
pub fn create_client(config: &ResolvedLlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "anthropic" => Ok(Arc::new(AnthropicClient::from_config(config)?)),
        "openai" | "ollama" => Ok(Arc::new(OpenAiClient::from_config(config)?)),
        other => Err(LlmError::InvalidResponse(format!(
            "Unknown LLM provider: '{}'. Supported: anthropic, openai, ollama",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_unknown_provider() {
        let config = ResolvedLlmConfig {
            provider: "bedrock".to_string(),
            model: "whatever".to_string(),
            api_key_env: "NOPE".to_string(),
            base_url: "http://localhost".to_string(),
            max_tokens: 1024,
            timeout_ms: 1000,
        };

        let result = create_client(&config);
        assert!(result.is_err());
    }
}
