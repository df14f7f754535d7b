//! Bounded tool-calling loop with structured synthesis
//!
//! Drives a Thought → Action → Observation loop: the model proposes tool
//! calls, the registry dispatches them, and the results are folded back
//! into the conversation. The loop ends when the model answers without
//! tool calls or when the round ceiling is reached; either way, whatever
//! observations were collected feed a final plain structured-generation
//! call. The engine keeps no state between runs - the message history
//! lives inside a single `run()`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::llm::{CompletionRequest, ContentBlock, LlmClient, Message, StopReason};
use crate::tools::{ToolContext, ToolRegistry};

use super::error::GenerateError;
use super::structured::{generate_structured, StructuredOutput, MAX_OUTPUT_TOKENS};

/// The retrieval loop for one stage
pub struct ReactEngine {
    llm: Arc<dyn LlmClient>,
    registry: ToolRegistry,
    ctx: ToolContext,
    max_steps: usize,
}

impl ReactEngine {
    /// Create an engine bound to one capability set
    pub fn new(llm: Arc<dyn LlmClient>, registry: ToolRegistry, ctx: ToolContext, max_steps: usize) -> Self {
        debug!(max_steps = %max_steps, tools = ?registry.names(), "ReactEngine::new: called");
        Self {
            llm,
            registry,
            ctx,
            max_steps,
        }
    }

    /// Run the loop and return the observation transcript
    ///
    /// Each round makes one completion call. A response without tool
    /// calls ends the loop (its text, if any, joins the transcript); a
    /// response with tool calls has every call dispatched and the results
    /// returned to the model as tool-result blocks. Hitting the ceiling
    /// forces synthesis with whatever was collected.
    pub async fn run(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GenerateError> {
        let mut messages = vec![Message::user(user_prompt)];
        let mut transcript: Vec<String> = Vec::new();
        let tools = self.registry.definitions();

        let mut step = 0;
        while step < self.max_steps {
            step += 1;
            info!(step = %step, max_steps = %self.max_steps, "ReactEngine::run: round");

            let request = CompletionRequest {
                system_prompt: system_prompt.to_string(),
                messages: messages.clone(),
                tools: tools.clone(),
                max_tokens: MAX_OUTPUT_TOKENS,
            };
            let response = self.llm.complete(request).await?;
            info!(
                model = %response.model,
                input_tokens = %response.usage.input_tokens,
                output_tokens = %response.usage.output_tokens,
                stop_reason = ?response.stop_reason,
                "LLM_CALL: tool round complete"
            );

            if response.tool_calls.is_empty() {
                info!("ReactEngine::run: no tool calls, loop complete");
                if let Some(text) = response.content {
                    if !text.trim().is_empty() {
                        transcript.push(text);
                    }
                }
                return Ok(format_observations(&transcript));
            }

            // Echo the assistant turn back so the tool results attach to
            // their tool_use ids
            let mut assistant_blocks = Vec::new();
            if let Some(text) = &response.content {
                if !text.trim().is_empty() {
                    assistant_blocks.push(ContentBlock::text(text.clone()));
                }
            }
            for call in &response.tool_calls {
                assistant_blocks.push(ContentBlock::ToolUse {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    input: call.input.clone(),
                });
            }
            messages.push(Message::assistant_blocks(assistant_blocks));

            let mut result_blocks = Vec::new();
            for call in &response.tool_calls {
                info!(tool_name = %call.name, args = %call.input, "ReactEngine::run: tool call");
                let obs = self.registry.dispatch(call, &self.ctx).await;
                transcript.push(obs.transcript_entry());
                result_blocks.push(ContentBlock::tool_result(&call.id, &obs.content, obs.is_error));
            }
            messages.push(Message::user_blocks(result_blocks));

            if response.stop_reason == StopReason::MaxTokens {
                warn!("ReactEngine::run: response truncated at max_tokens");
            }
        }

        warn!(
            max_steps = %self.max_steps,
            "ReactEngine::run: ceiling reached, forcing synthesis with collected observations"
        );
        Ok(format_observations(&transcript))
    }
}

/// Render the transcript for the synthesis prompt
fn format_observations(transcript: &[String]) -> String {
    if transcript.is_empty() {
        return "No tool observations were collected.".to_string();
    }
    format!("TOOL OBSERVATIONS:\n{}", transcript.join("\n\n"))
}

/// Build the synthesis prompt from the original prompt and the transcript
fn build_synthesis_prompt(original_user_prompt: &str, observations: &str) -> String {
    format!(
        "{}\n\n---\n\
         The following real-time data was retrieved via tool calls. \
         Incorporate it into your analysis. Do not ignore or contradict it.\n\n{}",
        original_user_prompt, observations
    )
}

/// Tool-augmented structured generation
///
/// Runs the retrieval loop, then makes one plain structured call whose
/// prompt carries the observation transcript. Schema enforcement happens
/// only on that final call - the loop itself deals in free text.
pub async fn generate_with_tools<T: StructuredOutput>(
    llm: &Arc<dyn LlmClient>,
    registry: ToolRegistry,
    ctx: ToolContext,
    max_steps: usize,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<T, GenerateError> {
    let engine = ReactEngine::new(Arc::clone(llm), registry, ctx, max_steps);
    let observations = engine.run(system_prompt, user_prompt).await?;
    info!(observations_len = %observations.len(), "generate_with_tools: loop complete");

    let enriched = build_synthesis_prompt(user_prompt, &observations);
    generate_structured(llm, system_prompt, &enriched).await
}
