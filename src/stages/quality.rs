//! Quality stage - plain structured review of the content bundle

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::QaReport;
use crate::generate::generate_structured;
use crate::llm::LlmClient;
use crate::pipeline::{CampaignState, Stage, StageArtifact, StageError, StageName};
use crate::prompts::{Prompts, QUALITY_SYSTEM};

pub struct QualityStage {
    llm: Arc<dyn LlmClient>,
    prompts: Prompts,
}

impl QualityStage {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            prompts: Prompts::new(),
        }
    }
}

#[async_trait]
impl Stage for QualityStage {
    fn name(&self) -> StageName {
        StageName::Quality
    }

    async fn execute(&self, state: &CampaignState) -> Result<StageArtifact, StageError> {
        debug!(run_id = %state.run_id, "QualityStage::execute: called");
        let content = state
            .content
            .as_ref()
            .ok_or(StageError::MissingUpstream(StageName::Content))?;
        let user_prompt = self.prompts.quality_user(&state.request, content)?;

        let report: QaReport = generate_structured(&self.llm, QUALITY_SYSTEM, &user_prompt).await?;
        Ok(StageArtifact::Qa(report))
    }
}
