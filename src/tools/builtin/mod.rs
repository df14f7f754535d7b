//! Builtin tools and the per-stage capability sets
//!
//! Each stage gets only its own registry - that is the hard boundary. A
//! stage cannot call a tool outside its set; a hallucinated name comes
//! back as a structured error observation and the model reasons around it.

mod brand_guidelines;
mod brand_memory;
mod brand_tone;
mod competitor_lookup;
mod past_campaigns;
mod web_search;

pub use brand_guidelines::BrandGuidelinesTool;
pub use brand_memory::BrandMemoryTool;
pub use brand_tone::BrandToneTool;
pub use competitor_lookup::CompetitorLookupTool;
pub use past_campaigns::PastCampaignsTool;
pub use web_search::WebSearchTool;

use serde_json::Value;

use super::{ToolContext, ToolError, ToolRegistry};

pub(crate) const SERPER_BASE_URL: &str = "https://google.serper.dev";

/// One Serper.dev POST, returning the parsed body
pub(crate) async fn serper_post(ctx: &ToolContext, url: &str, body: &Value) -> Result<Value, ToolError> {
    let api_key = ctx.serper_api_key.as_deref().ok_or_else(|| {
        ToolError::MissingCredential(
            "SERPER_API_KEY not set. Get a free key at https://serper.dev".to_string(),
        )
    })?;

    let response = ctx.http.post(url).header("X-API-KEY", api_key).json(body).send().await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ToolError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}

/// Capability set for the research stage - external lookups only
pub fn research_tools() -> ToolRegistry {
    ToolRegistry::empty()
        .with(Box::new(WebSearchTool))
        .with(Box::new(CompetitorLookupTool))
}

/// Capability set for the strategy stage - brand history only
pub fn strategy_tools() -> ToolRegistry {
    ToolRegistry::empty()
        .with(Box::new(BrandMemoryTool))
        .with(Box::new(PastCampaignsTool))
}

/// Capability set for the content stage - brand voice only
pub fn content_tools() -> ToolRegistry {
    ToolRegistry::empty()
        .with(Box::new(BrandGuidelinesTool))
        .with(Box::new(BrandToneTool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_set() {
        let registry = research_tools();
        assert_eq!(registry.names(), vec!["competitor_lookup", "web_search"]);
    }

    #[test]
    fn test_strategy_set() {
        let registry = strategy_tools();
        assert_eq!(registry.names(), vec!["brand_memory", "past_campaigns"]);
    }

    #[test]
    fn test_content_set() {
        let registry = content_tools();
        assert_eq!(registry.names(), vec!["brand_guidelines", "brand_tone"]);
    }

    #[test]
    fn test_sets_are_disjoint() {
        let research = research_tools();
        for name in strategy_tools().names().iter().chain(content_tools().names().iter()) {
            assert!(!research.has_tool(name));
        }
    }
}
