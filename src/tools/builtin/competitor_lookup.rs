//! Competitor intelligence via Serper.dev

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::tools::{Tool, ToolContext, ToolError};

use super::{serper_post, SERPER_BASE_URL};

/// Structured profile of one competitor
///
/// Two targeted searches per call: a general search for the knowledge
/// graph and organic positioning signals, and a news search for recent
/// strategic moves.
pub struct CompetitorLookupTool;

#[async_trait]
impl Tool for CompetitorLookupTool {
    fn name(&self) -> &'static str {
        "competitor_lookup"
    }

    fn description(&self) -> &'static str {
        "Fetch structured competitor intelligence for a specific company via Google \
         Search. Returns a company overview from the knowledge graph, top organic \
         positioning signals, and recent news articles (funding, launches, pivots). \
         Call separately for EACH competitor to profile; aim for at least 3 for a \
         complete analysis. Do NOT use for broad market research - use web_search \
         for that."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company_name": {
                    "type": "string",
                    "description": "Exact company name as commonly known, e.g. \"HubSpot\""
                }
            },
            "required": ["company_name"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let company = input["company_name"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArgument("company_name is required".to_string()))?;
        debug!(%company, "CompetitorLookupTool::execute: called");

        let body = json!({ "q": company, "num": 5 });
        let search = serper_post(ctx, &format!("{SERPER_BASE_URL}/search"), &body).await?;
        let news = serper_post(ctx, &format!("{SERPER_BASE_URL}/news"), &body).await?;

        let kg = &search["knowledgeGraph"];
        let overview = json!({
            "description": kg["description"],
            "founded": kg["attributes"]["Founded"],
            "headquarters": kg["attributes"]["Headquarters"],
            "ceo": kg["attributes"]["CEO"],
            "employees": kg["attributes"]["Number of employees"],
            "website": kg["website"],
            "top_organic": search["organic"]
                .as_array()
                .into_iter()
                .flatten()
                .take(3)
                .map(|r| json!({
                    "title": r["title"],
                    "snippet": r["snippet"],
                    "link": r["link"],
                }))
                .collect::<Vec<Value>>(),
        });

        let recent_news: Vec<Value> = news["news"]
            .as_array()
            .into_iter()
            .flatten()
            .take(5)
            .map(|r| {
                json!({
                    "title": r["title"],
                    "source": r["source"],
                    "date": r["date"],
                    "snippet": r["snippet"],
                    "link": r["link"],
                })
            })
            .collect();

        info!(
            %company,
            has_knowledge_graph = %overview["description"].is_string(),
            news_count = %recent_news.len(),
            "CompetitorLookupTool::execute: success"
        );

        let shaped = json!({
            "company": company,
            "overview": overview,
            "recent_news": recent_news,
        });
        Ok(shaped.to_string())
    }
}
