//! Brand memory tool

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::tools::{Tool, ToolContext, ToolError};

/// Full brand memory: identity, insight notes, guidelines
///
/// Reads from the run's brand snapshot - nothing leaves the process.
pub struct BrandMemoryTool;

#[async_trait]
impl Tool for BrandMemoryTool {
    fn name(&self) -> &'static str {
        "brand_memory"
    }

    fn description(&self) -> &'static str {
        "Fetch complete brand memory: identity, insight notes gathered from previous \
         campaigns, and brand guidelines (visual style, preferred channels, content \
         restrictions). Always call this FIRST before forming any strategy. Respect \
         content_restrictions absolutely, align with preferred_channels, and build \
         on the recorded insights."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        debug!(brand = %ctx.brand.name, "BrandMemoryTool::execute: called");
        let brand = &ctx.brand;

        let result = json!({
            "name": brand.name,
            "industry": brand.industry,
            "description": brand.description,
            "tone_of_voice": brand.tone_of_voice,
            "memory_notes": brand.memory_notes,
            "guidelines": {
                "visual_style": brand.guidelines.visual_style,
                "preferred_channels": brand.guidelines.preferred_channels,
                "content_restrictions": brand.guidelines.content_restrictions,
            },
            "past_campaign_count": brand.past_campaigns.len(),
        });

        info!(
            brand = %brand.name,
            notes = %brand.memory_notes.len(),
            "BrandMemoryTool::execute: success"
        );
        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BrandContext;

    #[tokio::test]
    async fn test_returns_brand_snapshot() {
        let brand = BrandContext {
            name: "Acme".to_string(),
            memory_notes: vec!["video outperforms static".to_string()],
            ..BrandContext::default()
        };
        let ctx = ToolContext::new(brand, None).unwrap();

        let raw = BrandMemoryTool.execute(json!({}), &ctx).await.unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["name"], "Acme");
        assert_eq!(parsed["memory_notes"][0], "video outperforms static");
    }
}
