//! Campaign Pipeline - Multi-Stage Campaign Content Generation
//!
//! Orchestrates a fixed sequence of content-generation stages - research,
//! strategy, content, quality review, publication, analytics - over shared
//! campaign state, with one conditional quality gate between review and
//! publication.
//!
//! # Core Concepts
//!
//! - **Fixed Stage Order**: research → strategy → content → quality →
//!   (gate) → publish → analytics; the gate is the only branch
//! - **Schema-Constrained Output**: every generated artifact is validated
//!   against its declared schema before it enters state
//! - **Bounded Tool Loop**: retrieval stages run a tool-calling loop with
//!   a hard round ceiling; observations feed one final synthesis call
//! - **Stage-Scoped Tools**: each stage sees only its own capability set
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait and the Anthropic/OpenAI implementations
//! - [`generate`] - schema-constrained generation and the tool loop
//! - [`tools`] - tool trait, registries, and the builtin tools
//! - [`domain`] - campaign input and stage artifact types
//! - [`pipeline`] - state, stages, gate, and the engine
//! - [`stages`] - the six stage executors
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod generate;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod stages;
pub mod tools;

// Re-export commonly used types
pub use config::{Config, LlmConfig, ResolvedLlmConfig};
pub use domain::{
    AnalyticsReport, BrandContext, CampaignRequest, ContentBundle, PublicationRecord, QaReport, ResearchReport,
    StrategyPlan,
};
pub use generate::{GenerateError, OutputSchema, StructuredOutput};
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAiClient};
pub use pipeline::{
    CampaignState, GateVerdict, PipelineEngine, RunFailure, RunOutcome, Stage, StageArtifact, StageError, StageName,
    TerminalStatus,
};
pub use tools::{Observation, Tool, ToolContext, ToolError, ToolRegistry};
