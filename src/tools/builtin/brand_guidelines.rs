//! Brand guidelines tool

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::tools::{Tool, ToolContext, ToolError};

/// Style rules and hard content restrictions
pub struct BrandGuidelinesTool;

#[async_trait]
impl Tool for BrandGuidelinesTool {
    fn name(&self) -> &'static str {
        "brand_guidelines"
    }

    fn description(&self) -> &'static str {
        "Fetch brand guidelines: visual style direction, preferred publishing \
         channels, and content restrictions that must never be violated. Always \
         call this BEFORE writing any copy. Content restrictions are hard rules; \
         violating them means the campaign fails quality review."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        debug!(brand = %ctx.brand.name, "BrandGuidelinesTool::execute: called");
        let guidelines = &ctx.brand.guidelines;

        let result = json!({
            "visual_style": guidelines.visual_style,
            "preferred_channels": guidelines.preferred_channels,
            "content_restrictions": guidelines.content_restrictions,
        });

        info!(
            brand = %ctx.brand.name,
            restrictions = %guidelines.content_restrictions.len(),
            "BrandGuidelinesTool::execute: success"
        );
        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BrandContext, BrandGuidelines};

    #[tokio::test]
    async fn test_returns_guidelines() {
        let brand = BrandContext {
            guidelines: BrandGuidelines {
                visual_style: "clean, high-contrast".to_string(),
                preferred_channels: vec!["instagram".to_string()],
                content_restrictions: vec!["no medical claims".to_string()],
            },
            ..BrandContext::default()
        };
        let ctx = ToolContext::new(brand, None).unwrap();

        let raw = BrandGuidelinesTool.execute(json!({}), &ctx).await.unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["content_restrictions"][0], "no medical claims");
    }
}
