//! Schema-constrained structured generation
//!
//! One plain LLM call whose output must parse and validate as a declared
//! artifact type. No retry happens here: a malformed response surfaces as
//! a [`GenerateError::SchemaValidation`] and the stage fails.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::llm::{CompletionRequest, LlmClient, Message};

use super::error::GenerateError;
use super::schema::OutputSchema;

/// Token ceiling for structured responses - large enough for a full
/// content bundle
pub const MAX_OUTPUT_TOKENS: u32 = 7048;

/// A type that can be produced by schema-constrained generation
pub trait StructuredOutput: DeserializeOwned {
    /// The schema the raw response is validated against before
    /// deserialization
    fn schema() -> OutputSchema;
}

/// Strip a surrounding markdown code fence, if present
///
/// Models sometimes wrap JSON in ```json ... ``` despite instructions.
/// Anything else is returned trimmed but untouched.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line
    let body = match body.find('\n') {
        Some(idx) => &body[idx + 1..],
        None => body,
    };
    body.trim()
}

/// Parse and validate a raw model response into `T`
///
/// Fence-stripping, then JSON parsing, then schema validation, then
/// deserialization. Every failure carries the schema name and a reason.
pub fn parse_structured<T: StructuredOutput>(raw: &str) -> Result<T, GenerateError> {
    let schema = T::schema();
    let cleaned = strip_code_fence(raw);

    let value: Value = serde_json::from_str(cleaned).map_err(|e| GenerateError::SchemaValidation {
        schema: schema.name,
        reason: format!("response is not valid JSON: {}", e),
    })?;

    schema.validate(&value).map_err(|errors| GenerateError::SchemaValidation {
        schema: schema.name,
        reason: errors.join("; "),
    })?;

    serde_json::from_value(value).map_err(|e| GenerateError::SchemaValidation {
        schema: schema.name,
        reason: format!("deserialization failed: {}", e),
    })
}

/// Generate a `T` from one plain LLM call
///
/// Appends the schema instruction to the user prompt, makes a single
/// completion call with no tools, and parses the response.
pub async fn generate_structured<T: StructuredOutput>(
    llm: &Arc<dyn LlmClient>,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<T, GenerateError> {
    let schema = T::schema();
    debug!(schema = %schema.name, "generate_structured: called");

    let prompt = format!("{}{}", user_prompt, schema.instruction());
    let request = CompletionRequest {
        system_prompt: system_prompt.to_string(),
        messages: vec![Message::user(prompt)],
        tools: vec![],
        max_tokens: MAX_OUTPUT_TOKENS,
    };

    let start = Instant::now();
    let response = llm.complete(request).await?;
    info!(
        model = %response.model,
        input_tokens = %response.usage.input_tokens,
        output_tokens = %response.usage.output_tokens,
        latency_ms = %start.elapsed().as_millis(),
        schema = %schema.name,
        "LLM_CALL: structured generation complete"
    );

    let raw = response.content.ok_or(GenerateError::SchemaValidation {
        schema: schema.name,
        reason: "model returned no text content".to_string(),
    })?;

    parse_structured(&raw)
}
