//! Analytics stage - plain structured performance forecast

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::AnalyticsReport;
use crate::generate::generate_structured;
use crate::llm::LlmClient;
use crate::pipeline::{CampaignState, Stage, StageArtifact, StageError, StageName};
use crate::prompts::{Prompts, ANALYTICS_SYSTEM};

pub struct AnalyticsStage {
    llm: Arc<dyn LlmClient>,
    prompts: Prompts,
}

impl AnalyticsStage {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            prompts: Prompts::new(),
        }
    }
}

#[async_trait]
impl Stage for AnalyticsStage {
    fn name(&self) -> StageName {
        StageName::Analytics
    }

    async fn execute(&self, state: &CampaignState) -> Result<StageArtifact, StageError> {
        debug!(run_id = %state.run_id, "AnalyticsStage::execute: called");
        let content = state
            .content
            .as_ref()
            .ok_or(StageError::MissingUpstream(StageName::Content))?;
        let user_prompt = self.prompts.analytics_user(&state.request, content)?;

        let report: AnalyticsReport = generate_structured(&self.llm, ANALYTICS_SYSTEM, &user_prompt).await?;
        Ok(StageArtifact::Analytics(report))
    }
}
