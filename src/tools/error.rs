//! Tool error types

use thiserror::Error;

/// Errors that can occur during tool execution
///
/// These never propagate past the registry's dispatch boundary; they are
/// converted into error observations for the model to reason around.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = ToolError::InvalidArgument("query is required".to_string());
        assert!(err.to_string().contains("query is required"));
    }

    #[test]
    fn test_api_error_message() {
        let err = ToolError::Api {
            status: 403,
            message: "forbidden".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("forbidden"));
    }
}
