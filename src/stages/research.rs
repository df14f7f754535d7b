//! Research stage - tool-augmented market research

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ResearchReport;
use crate::generate::generate_with_tools;
use crate::llm::LlmClient;
use crate::pipeline::{CampaignState, Stage, StageArtifact, StageError, StageName};
use crate::prompts::{Prompts, RESEARCH_SYSTEM};
use crate::tools::builtin::research_tools;
use crate::tools::ToolContext;

pub struct ResearchStage {
    llm: Arc<dyn LlmClient>,
    prompts: Prompts,
    ctx: ToolContext,
    max_steps: usize,
}

impl ResearchStage {
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
impl Stage for ResearchStage {
    fn name(&self) -> StageName {
        StageName::Research
    }

    async fn execute(&self, state: &CampaignState) -> Result<StageArtifact, StageError> {
        debug!(run_id = %state.run_id, "ResearchStage::execute: called");
        let user_prompt = self.prompts.research_user(&state.request)?;

        let report: ResearchReport = generate_with_tools(
            &self.llm,
            research_tools(),
            self.ctx.clone(),
            self.max_steps,
            RESEARCH_SYSTEM,
            &user_prompt,
        )
        .await?;

        Ok(StageArtifact::Research(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BrandContext, CampaignRequest};
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{CompletionResponse, StopReason, TokenUsage};

    fn state() -> CampaignState {
        CampaignState::new(CampaignRequest {
            goal: "grow signups".to_string(),
            target_audience: "runners".to_string(),
            budget: 10_000.0,
            brand: BrandContext::default(),
        })
    }

    fn text_response(content: &str) -> CompletionResponse {
        CompletionResponse {
            content: Some(content.to_string()),
            tool_calls: vec![],
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
            model: "mock-model".to_string(),
        }
    }

    fn report_json() -> String {
        serde_json::json!({
            "target_audience": "urban runners 25-40 who track every workout",
            "market_size": 186000.0,
            "growth_rate": 14.5,
            "key_insights": ["a", "b", "c"],
            "competitors": [
                {"name": "Stride", "positioning": "premium"},
                {"name": "PacePal", "positioning": "budget"}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_research_stage_produces_report() {
        // Round 1: model answers without tools; then synthesis
        let mock = Arc::new(MockLlmClient::new(vec![
            text_response("nothing to look up"),
            text_response(&report_json()),
        ]));
        let client: Arc<dyn LlmClient> = mock.clone();
        let stage = ResearchStage::new(client, ToolContext::new(BrandContext::default(), None).unwrap(), 6);

        let artifact = stage.execute(&state()).await.unwrap();
        assert!(matches!(artifact, StageArtifact::Research(_)));

        // First round offered the research capability set
        let requests = mock.requests();
        let names: Vec<&str> = requests[0].tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["competitor_lookup", "web_search"]);
    }

    #[tokio::test]
    async fn test_research_stage_schema_failure_is_stage_error() {
        let mock = Arc::new(MockLlmClient::new(vec![
            text_response(""),
            text_response("{\"target_audience\": \"too short\"}"),
        ]));
        let client: Arc<dyn LlmClient> = mock.clone();
        let stage = ResearchStage::new(client, ToolContext::new(BrandContext::default(), None).unwrap(), 6);

        let err = stage.execute(&state()).await.unwrap_err();
        assert!(matches!(err, StageError::Generate(_)));
    }
}
