//! Generation error types

use thiserror::Error;

use crate::llm::LlmError;

/// Errors from structured generation and the tool loop
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Schema validation failed for {schema}: {reason}")]
    SchemaValidation {
        schema: &'static str,
        reason: String,
    },
}
