//! Tool trait and observation record

use async_trait::async_trait;
use serde_json::Value;

use super::context::ToolContext;
use super::error::ToolError;

/// A tool that can be called by the LLM during a retrieval loop
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the model's tool_use name)
    fn name(&self) -> &'static str;

    /// Human-readable description, shown to the model
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool with the arguments as given
    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError>;
}

/// The canonical record of one tool invocation
///
/// Either the tool's return value or a structured error payload, tagged
/// with the tool name. Observations are folded back into the generation
/// context and into the loop's transcript.
#[derive(Debug, Clone)]
pub struct Observation {
    pub tool: String,
    pub content: String,
    pub is_error: bool,
}

impl Observation {
    /// Create a successful observation
    pub fn success(tool: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error observation with a `{"error": ...}` payload
    pub fn error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        let payload = serde_json::json!({ "error": message.into() });
        Self {
            tool: tool.into(),
            content: payload.to_string(),
            is_error: true,
        }
    }

    /// Render as one transcript line for the synthesis prompt
    pub fn transcript_entry(&self) -> String {
        format!("[{}] → {}", self.tool, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_success() {
        let obs = Observation::success("web_search", "ten results");
        assert!(!obs.is_error);
        assert_eq!(obs.transcript_entry(), "[web_search] → ten results");
    }

    #[test]
    fn test_observation_error_payload_is_json() {
        let obs = Observation::error("web_search", "connection refused");
        assert!(obs.is_error);
        let parsed: serde_json::Value = serde_json::from_str(&obs.content).unwrap();
        assert_eq!(parsed["error"], "connection refused");
    }
}
