//! Web search via Serper.dev

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::tools::{Tool, ToolContext, ToolError};

use super::{serper_post, SERPER_BASE_URL};

/// Broad market search - sizes, growth rates, trends
///
/// Competitor-specific profiling belongs to `competitor_lookup`.
pub struct WebSearchTool;

const DEFAULT_NUM_RESULTS: u64 = 5;
const MAX_NUM_RESULTS: u64 = 10;

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn description(&self) -> &'static str {
        "Search the web for current market data, industry statistics, growth rates, \
         trend information, and news. Returns result snippets with source URLs. \
         Use for market size and valuation figures, industry growth rate data, and \
         recent market trends. Set search_type to \"news\" for recent news articles only. \
         Do NOT use for competitor-specific research - use competitor_lookup for that. \
         Be precise in the query: include year, industry, and metric type."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Specific search query, e.g. \"fitness app market size 2026 USD\""
                },
                "search_type": {
                    "type": "string",
                    "enum": ["search", "news"],
                    "description": "Search index: \"search\" for broad web (default), \"news\" for recent articles"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Number of results, default 5, max 10"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let query = input["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArgument("query is required".to_string()))?;
        let search_type = input["search_type"].as_str().unwrap_or("search");
        if search_type != "search" && search_type != "news" {
            return Err(ToolError::InvalidArgument(format!(
                "search_type must be \"search\" or \"news\", got {search_type:?}"
            )));
        }
        let num = input["num_results"]
            .as_u64()
            .unwrap_or(DEFAULT_NUM_RESULTS)
            .min(MAX_NUM_RESULTS);

        debug!(%query, %search_type, %num, "WebSearchTool::execute: called");

        let url = format!("{}/{}", SERPER_BASE_URL, search_type);
        let body = json!({ "q": query, "num": num });
        let data = serper_post(ctx, &url, &body).await?;

        let results: Vec<Value> = match search_type {
            "news" => data["news"]
                .as_array()
                .into_iter()
                .flatten()
                .take(num as usize)
                .map(|r| {
                    json!({
                        "title": r["title"],
                        "source": r["source"],
                        "date": r["date"],
                        "snippet": r["snippet"],
                        "link": r["link"],
                    })
                })
                .collect(),
            _ => data["organic"]
                .as_array()
                .into_iter()
                .flatten()
                .take(num as usize)
                .map(|r| {
                    json!({
                        "title": r["title"],
                        "snippet": r["snippet"],
                        "link": r["link"],
                    })
                })
                .collect(),
        };

        info!(%query, result_count = %results.len(), "WebSearchTool::execute: success");

        let shaped = json!({
            "query": query,
            "search_type": search_type,
            "answer": data["answerBox"]["answer"],
            "results": results,
        });
        Ok(shaped.to_string())
    }
}
