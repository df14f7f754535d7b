//! Stage trait and stage names

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::generate::GenerateError;

use super::state::{CampaignState, StageArtifact};

/// The stages in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageName {
    Research,
    Strategy,
    Content,
    Quality,
    Publish,
    Analytics,
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StageName::Research => "research",
            StageName::Strategy => "strategy",
            StageName::Content => "content",
            StageName::Quality => "quality",
            StageName::Publish => "publish",
            StageName::Analytics => "analytics",
        };
        f.write_str(s)
    }
}

/// Errors from stage execution
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Generation failed: {0}")]
    Generate(#[from] GenerateError),

    #[error("Missing upstream artifact: {0} has not run")]
    MissingUpstream(StageName),

    #[error("Prompt rendering failed: {0}")]
    Prompt(#[from] handlebars::RenderError),
}

/// One pipeline stage
///
/// Stages read upstream slots and return an artifact; the engine records
/// it. A stage never writes state directly.
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> StageName;

    async fn execute(&self, state: &CampaignState) -> Result<StageArtifact, StageError>;
}
