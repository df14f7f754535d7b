//! Brand tone tool

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::tools::{Tool, ToolContext, ToolError};

/// Voice and tone reference for copywriting
pub struct BrandToneTool;

#[async_trait]
impl Tool for BrandToneTool {
    fn name(&self) -> &'static str {
        "brand_tone"
    }

    fn description(&self) -> &'static str {
        "Fetch the brand's tone of voice and identity summary. Use this to keep \
         every headline, body, and call-to-action in the brand's voice. Call it \
         before drafting copy and keep the wording consistent across assets."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        debug!(brand = %ctx.brand.name, "BrandToneTool::execute: called");
        let brand = &ctx.brand;

        let result = json!({
            "name": brand.name,
            "industry": brand.industry,
            "description": brand.description,
            "tone_of_voice": brand.tone_of_voice,
        });

        info!(brand = %brand.name, "BrandToneTool::execute: success");
        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BrandContext;

    #[tokio::test]
    async fn test_returns_tone() {
        let brand = BrandContext {
            name: "Acme".to_string(),
            tone_of_voice: "direct, warm, never salesy".to_string(),
            ..BrandContext::default()
        };
        let ctx = ToolContext::new(brand, None).unwrap();

        let raw = BrandToneTool.execute(json!({}), &ctx).await.unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["tone_of_voice"], "direct, warm, never salesy");
    }
}
