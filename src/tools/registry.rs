//! ToolRegistry - stage-scoped capability set and dispatch boundary

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::llm::{ToolCall, ToolDefinition};

use super::context::ToolContext;
use super::traits::{Observation, Tool};

/// The set of tools one stage may invoke
///
/// Lookups happen only within this registry - there is no global tool
/// table. Dispatch never fails: unknown names and tool errors come back
/// as structured error observations.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry (for stages without tools, and tests)
    pub fn empty() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Add a tool to the registry
    pub fn add(&mut self, tool: Box<dyn Tool>) {
        debug!(tool_name = %tool.name(), "ToolRegistry::add: called");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Builder-style add, for registry construction
    pub fn with(mut self, tool: Box<dyn Tool>) -> Self {
        self.add(tool);
        self
    }

    /// Tool definitions for the LLM, sorted by name so request bodies
    /// are deterministic
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Sorted tool names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if the registry has no tools
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch one tool call
    ///
    /// Resolves the name within this registry only. An unknown name yields
    /// an "unknown tool" observation listing the available names; a tool
    /// error is captured as an error observation. Neither aborts the loop.
    pub async fn dispatch(&self, call: &ToolCall, ctx: &ToolContext) -> Observation {
        debug!(tool_name = %call.name, tool_id = %call.id, "ToolRegistry::dispatch: called");
        match self.tools.get(&call.name) {
            Some(tool) => match tool.execute(call.input.clone(), ctx).await {
                Ok(content) => {
                    debug!(tool_name = %call.name, result_len = %content.len(), "ToolRegistry::dispatch: tool succeeded");
                    Observation::success(&call.name, content)
                }
                Err(e) => {
                    warn!(tool_name = %call.name, error = %e, "ToolRegistry::dispatch: tool failed");
                    Observation::error(&call.name, e.to_string())
                }
            },
            None => {
                warn!(tool_name = %call.name, "ToolRegistry::dispatch: unknown tool");
                Observation::error(
                    &call.name,
                    format!("Unknown tool '{}'. Available: {:?}", call.name, self.names()),
                )
            }
        }
    }
}
