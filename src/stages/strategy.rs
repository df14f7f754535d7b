//! Strategy stage - tool-augmented growth strategy

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::StrategyPlan;
use crate::generate::generate_with_tools;
use crate::llm::LlmClient;
use crate::pipeline::{CampaignState, Stage, StageArtifact, StageError, StageName};
use crate::prompts::{Prompts, STRATEGY_SYSTEM};
use crate::tools::builtin::strategy_tools;
use crate::tools::ToolContext;

pub struct StrategyStage {
    llm: Arc<dyn LlmClient>,
    prompts: Prompts,
    ctx: ToolContext,
    max_steps: usize,
}

impl StrategyStage {
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
impl Stage for StrategyStage {
    fn name(&self) -> StageName {
        StageName::Strategy
    }

    async fn execute(&self, state: &CampaignState) -> Result<StageArtifact, StageError> {
        debug!(run_id = %state.run_id, "StrategyStage::execute: called");
        let research = state
            .research
            .as_ref()
            .ok_or(StageError::MissingUpstream(StageName::Research))?;
        let user_prompt = self.prompts.strategy_user(&state.request, research)?;

        let plan: StrategyPlan = generate_with_tools(
            &self.llm,
            strategy_tools(),
            self.ctx.clone(),
            self.max_steps,
            STRATEGY_SYSTEM,
            &user_prompt,
        )
        .await?;

        Ok(StageArtifact::Strategy(plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BrandContext, CampaignRequest, Competitor, ResearchReport};
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{CompletionResponse, StopReason, TokenUsage};
    use crate::pipeline::StageArtifact;

    fn state_with_research() -> CampaignState {
        let mut state = CampaignState::new(CampaignRequest {
            goal: "grow signups".to_string(),
            target_audience: "runners".to_string(),
            budget: 10_000.0,
            brand: BrandContext::default(),
        });
        state
            .record(StageArtifact::Research(ResearchReport {
                target_audience: "urban runners who track everything".to_string(),
                market_size: 186_000.0,
                growth_rate: 14.5,
                key_insights: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                competitors: vec![
                    Competitor {
                        name: "Stride".to_string(),
                        positioning: "premium".to_string(),
                    },
                    Competitor {
                        name: "PacePal".to_string(),
                        positioning: "budget".to_string(),
                    },
                ],
            }))
            .unwrap();
        state
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

    #[tokio::test]
    async fn test_strategy_requires_research() {
        let client: Arc<dyn LlmClient> = Arc::new(MockLlmClient::new(vec![]));
        let stage = StrategyStage::new(client, ToolContext::new(BrandContext::default(), None).unwrap(), 6);
        let state = CampaignState::new(CampaignRequest {
            goal: "g".to_string(),
            target_audience: "t".to_string(),
            budget: 1.0,
            brand: BrandContext::default(),
        });

        let err = stage.execute(&state).await.unwrap_err();
        assert!(matches!(err, StageError::MissingUpstream(StageName::Research)));
    }

    #[tokio::test]
    async fn test_strategy_stage_produces_plan() {
        let plan_json = serde_json::json!({
            "summary": "Own the recovery moment.",
            "objectives": ["5k signups in 30 days", "CTR above 2% by week 4"],
            "tactics": ["t1", "t2", "t3"],
            "channels": ["tiktok"]
        })
        .to_string();
        let mock = Arc::new(MockLlmClient::new(vec![
            text_response("no lookups needed"),
            text_response(&plan_json),
        ]));
        let client: Arc<dyn LlmClient> = mock.clone();
        let stage = StrategyStage::new(client, ToolContext::new(BrandContext::default(), None).unwrap(), 6);

        let artifact = stage.execute(&state_with_research()).await.unwrap();
        assert!(matches!(artifact, StageArtifact::Strategy(_)));

        // Offered only the brand-history capability set
        let names: Vec<String> = mock.requests()[0].tools.iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["brand_memory", "past_campaigns"]);
        // Research findings reach the prompt
        let prompt = mock.requests()[0].messages[0].content.as_text().unwrap().to_string();
        assert!(prompt.contains("Stride"));
    }
}
