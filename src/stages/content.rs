//! Content stage - tool-augmented creative generation

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ContentBundle;
use crate::generate::generate_with_tools;
use crate::llm::LlmClient;
use crate::pipeline::{CampaignState, Stage, StageArtifact, StageError, StageName};
use crate::prompts::{Prompts, CONTENT_SYSTEM};
use crate::tools::builtin::content_tools;
use crate::tools::ToolContext;

pub struct ContentStage {
    llm: Arc<dyn LlmClient>,
    prompts: Prompts,
    ctx: ToolContext,
    max_steps: usize,
}

impl ContentStage {
    pub fn new(llm: Arc<dyn LlmClient>, ctx: ToolContext, max_steps: usize) -> Self {
        Self {
            llm,
            prompts: Prompts::new(),
            ctx,
            max_steps,
        }
    }
}

#[async_trait]
impl Stage for ContentStage {
    fn name(&self) -> StageName {
        StageName::Content
    }

    async fn execute(&self, state: &CampaignState) -> Result<StageArtifact, StageError> {
        debug!(run_id = %state.run_id, "ContentStage::execute: called");
        let strategy = state
            .strategy
            .as_ref()
            .ok_or(StageError::MissingUpstream(StageName::Strategy))?;
        let user_prompt = self.prompts.content_user(strategy)?;

        let bundle: ContentBundle = generate_with_tools(
            &self.llm,
            content_tools(),
            self.ctx.clone(),
            self.max_steps,
            CONTENT_SYSTEM,
            &user_prompt,
        )
        .await?;

        Ok(StageArtifact::Content(bundle))
    }
}
