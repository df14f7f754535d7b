//! Past campaigns tool

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::tools::{Tool, ToolContext, ToolError};

/// Recent campaign history for the brand
pub struct PastCampaignsTool;

/// Hard ceiling regardless of what the model passes
const MAX_LIMIT: u64 = 10;
const DEFAULT_LIMIT: u64 = 5;

#[async_trait]
impl Tool for PastCampaignsTool {
    fn name(&self) -> &'static str {
        "past_campaigns"
    }

    fn description(&self) -> &'static str {
        "Fetch recent campaign history for the brand: names, summaries, and outcomes. \
         Always call this AFTER brand_memory to build a complete picture before \
         forming strategy. Avoid repeating what failed and build on what worked."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Number of recent campaigns to return, default 5, max 10"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let limit = input["limit"].as_u64().unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
        debug!(brand = %ctx.brand.name, %limit, "PastCampaignsTool::execute: called");

        let campaigns = &ctx.brand.past_campaigns;
        if campaigns.is_empty() {
            info!(brand = %ctx.brand.name, "PastCampaignsTool::execute: no history");
            return Ok(json!({
                "campaign_count": 0,
                "campaigns": [],
                "note": "No previous campaigns found. This is the brand's first campaign - \
                         form strategy from brand memory alone.",
            })
            .to_string());
        }

        let summaries: Vec<Value> = campaigns
            .iter()
            .take(limit)
            .map(|c| {
                json!({
                    "name": c.name,
                    "summary": c.summary,
                    "outcome": c.outcome,
                })
            })
            .collect();

        info!(brand = %ctx.brand.name, found = %summaries.len(), "PastCampaignsTool::execute: success");
        Ok(json!({
            "campaign_count": summaries.len(),
            "campaigns": summaries,
        })
        .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BrandContext, PastCampaign};

    fn brand_with_campaigns(count: usize) -> BrandContext {
        BrandContext {
            past_campaigns: (0..count)
                .map(|i| PastCampaign {
                    name: format!("campaign-{i}"),
                    summary: "s".to_string(),
                    outcome: "met goals".to_string(),
                })
                .collect(),
            ..BrandContext::default()
        }
    }

    #[tokio::test]
    async fn test_empty_history_note() {
        let ctx = ToolContext::new(BrandContext::default(), None).unwrap();
        let raw = PastCampaignsTool.execute(json!({}), &ctx).await.unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["campaign_count"], 0);
        assert!(parsed["note"].as_str().unwrap().contains("first campaign"));
    }

    #[tokio::test]
    async fn test_limit_ceiling_enforced() {
        let ctx = ToolContext::new(brand_with_campaigns(20), None).unwrap();
        let raw = PastCampaignsTool.execute(json!({"limit": 50}), &ctx).await.unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["campaign_count"], 10);
    }

    #[tokio::test]
    async fn test_default_limit() {
        let ctx = ToolContext::new(brand_with_campaigns(8), None).unwrap();
        let raw = PastCampaignsTool.execute(json!({}), &ctx).await.unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["campaign_count"], 5);
    }
}
