//! Prompt templates
//!
//! Embedded Handlebars templates, one pair (system + user) per generation
//! stage. Upstream artifacts are passed into the user templates as
//! pretty-printed JSON.

use handlebars::{no_escape, Handlebars, RenderError};
use serde::Serialize;
use tracing::debug;

use crate::domain::{CampaignRequest, ContentBundle, ResearchReport, StrategyPlan};

pub const RESEARCH_SYSTEM: &str = "You are a senior market research analyst.";

const RESEARCH_USER: &str = "\
Conduct market research for the following campaign.

Brand: {{brand_name}} ({{industry}})
Brand description: {{description}}
Campaign goal: {{goal}}
Target audience: {{target_audience}}
Budget (USD): {{budget}}

Use your tools to ground every figure in current data: search for market \
size and growth-rate estimates, and profile the most relevant competitors \
one by one before answering.";

pub const STRATEGY_SYSTEM: &str = "\
You are a CMO designing a growth strategy. Your task is to produce structured \
strategy output in valid JSON only - no markdown, no code fences, no commentary.

Output rules:
- summary: One string - executive summary of the growth strategy.
- objectives: An array of strings only, e.g. [\"Increase MQLs by 20%\", \"Improve lead quality\"]. \
Each objective is one string - not objects with value/currency or other keys.
- tactics: An array of strings only, e.g. [\"Launch ABM campaigns\", \"Optimize landing pages\"]. \
Tactical recommendations as plain strings.
- channels: An array of strings only, e.g. [\"LinkedIn\", \"Email\", \"Web\"]. \
Recommended channels as plain strings.

All of objectives, tactics, and channels must be arrays of strings - never a \
single object or mixed types.";

const STRATEGY_USER: &str = "\
Based on the following market research, create a growth strategy for this campaign.

Campaign goal: {{goal}}
Budget (USD): {{budget}}

Research:
{{research}}

Consult the brand's memory and campaign history before deciding - avoid \
repeating what failed and build on what worked. Objectives must be \
measurable and achievable within the stated budget.";

pub const CONTENT_SYSTEM: &str = "\
You are a performance marketing copywriter. Your task is to produce campaign \
content as valid JSON only - no markdown, no code fences, no commentary.

Output rules:
- assets: An array of objects. Each object has exactly four string keys:
  - headline: Primary headline (string).
  - body: Main body copy (string).
  - call_to_action: Call-to-action statement (string).
  - channel: Publishing channel name, e.g. \"LinkedIn\", \"Email\" (string).

Each asset must be an object with headline, body, call_to_action, and \
channel - all strings. No extra keys.";

const CONTENT_USER: &str = "\
Based on the following growth strategy, create campaign content assets.

Strategy:
{{strategy}}

Check the brand guidelines and tone of voice before drafting. Content \
restrictions are hard rules. Create at least one asset per recommended \
channel; each asset is one object with those four keys.";

pub const QUALITY_SYSTEM: &str = "\
You are an exacting brand compliance reviewer. You review campaign content \
before publication and report findings in valid JSON only.

Classify every finding:
- critical_issues: defects that must block publication - brand guideline \
violations, restricted claims, factual errors, missing or empty copy.
- recommendations: advisory improvements that do not block publication.

Never inflate a style preference into a critical issue, and never downgrade \
a restriction violation into a recommendation.";

const QUALITY_USER: &str = "\
Review the following campaign content for the brand \"{{brand_name}}\".

Tone of voice: {{tone_of_voice}}
Content restrictions:
{{restrictions}}

Content:
{{content}}

Report every critical issue and every recommendation you find. If the \
content is publishable as-is, critical_issues must be an empty array.";

pub const ANALYTICS_SYSTEM: &str = "\
You are a marketing performance analyst. You forecast campaign performance \
from the published assets and report it in valid JSON only. Keep every \
figure realistic for the budget and channels - do not inflate.";

const ANALYTICS_USER: &str = "\
Forecast the performance of this published campaign.

Campaign goal: {{goal}}
Budget (USD): {{budget}}

Published content:
{{content}}

Provide a per-channel breakdown covering every channel that received an \
asset, plus the overall totals. Rates are percentages between 0 and 100.";

#[derive(Serialize)]
struct ResearchVars<'a> {
    brand_name: &'a str,
    industry: &'a str,
    description: &'a str,
    goal: &'a str,
    target_audience: &'a str,
    budget: f64,
}

#[derive(Serialize)]
struct StrategyVars<'a> {
    goal: &'a str,
    budget: f64,
    research: String,
}

#[derive(Serialize)]
struct ContentVars {
    strategy: String,
}

#[derive(Serialize)]
struct QualityVars<'a> {
    brand_name: &'a str,
    tone_of_voice: &'a str,
    restrictions: String,
    content: String,
}

#[derive(Serialize)]
struct AnalyticsVars<'a> {
    goal: &'a str,
    budget: f64,
    content: String,
}

/// Renders the embedded templates
pub struct Prompts {
    hbs: Handlebars<'static>,
}

impl Default for Prompts {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompts {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        // Prompts are plain text, not HTML
        hbs.register_escape_fn(no_escape);
        Self { hbs }
    }

    fn render(&self, template: &str, vars: &impl Serialize) -> Result<String, RenderError> {
        self.hbs.render_template(template, vars)
    }

    pub fn research_user(&self, request: &CampaignRequest) -> Result<String, RenderError> {
        debug!("Prompts::research_user: called");
        self.render(
            RESEARCH_USER,
            &ResearchVars {
                brand_name: &request.brand.name,
                industry: &request.brand.industry,
                description: &request.brand.description,
                goal: &request.goal,
                target_audience: &request.target_audience,
                budget: request.budget,
            },
        )
    }

    pub fn strategy_user(
        &self,
        request: &CampaignRequest,
        research: &ResearchReport,
    ) -> Result<String, RenderError> {
        debug!("Prompts::strategy_user: called");
        self.render(
            STRATEGY_USER,
            &StrategyVars {
                goal: &request.goal,
                budget: request.budget,
                research: pretty_json(research),
            },
        )
    }

    pub fn content_user(&self, strategy: &StrategyPlan) -> Result<String, RenderError> {
        debug!("Prompts::content_user: called");
        self.render(
            CONTENT_USER,
            &ContentVars {
                strategy: pretty_json(strategy),
            },
        )
    }

    pub fn quality_user(
        &self,
        request: &CampaignRequest,
        content: &ContentBundle,
    ) -> Result<String, RenderError> {
        debug!("Prompts::quality_user: called");
        let restrictions = if request.brand.guidelines.content_restrictions.is_empty() {
            "(none declared)".to_string()
        } else {
            request
                .brand
                .guidelines
                .content_restrictions
                .iter()
                .map(|r| format!("- {r}"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        self.render(
            QUALITY_USER,
            &QualityVars {
                brand_name: &request.brand.name,
                tone_of_voice: &request.brand.tone_of_voice,
                restrictions,
                content: pretty_json(content),
            },
        )
    }

    pub fn analytics_user(
        &self,
        request: &CampaignRequest,
        content: &ContentBundle,
    ) -> Result<String, RenderError> {
        debug!("Prompts::analytics_user: called");
        self.render(
            ANALYTICS_USER,
            &AnalyticsVars {
                goal: &request.goal,
                budget: request.budget,
                content: pretty_json(content),
            },
        )
    }
}

fn pretty_json(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BrandContext, BrandGuidelines, Competitor, ContentAsset};

    fn request() -> CampaignRequest {
        CampaignRequest {
            goal: "grow signups".to_string(),
            target_audience: "urban runners".to_string(),
            budget: 25_000.0,
            brand: BrandContext {
                name: "Acme".to_string(),
                industry: "fitness tech".to_string(),
                tone_of_voice: "direct & warm".to_string(),
                guidelines: BrandGuidelines {
                    content_restrictions: vec!["no medical claims".to_string()],
                    ..BrandGuidelines::default()
                },
                ..BrandContext::default()
            },
        }
    }

    fn bundle() -> ContentBundle {
        ContentBundle {
            assets: vec![ContentAsset {
                headline: "Run further".to_string(),
                body: "b".to_string(),
                call_to_action: "c".to_string(),
                channel: "instagram".to_string(),
            }],
        }
    }

    #[test]
    fn test_research_user_carries_request() {
        let prompt = Prompts::new().research_user(&request()).unwrap();
        assert!(prompt.contains("Acme"));
        assert!(prompt.contains("grow signups"));
        assert!(prompt.contains("urban runners"));
        assert!(prompt.contains("25000"));
    }

    #[test]
    fn test_strategy_user_embeds_research_json() {
        let research = ResearchReport {
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
        };
        let prompt = Prompts::new().strategy_user(&request(), &research).unwrap();
        assert!(prompt.contains("Stride"));
        assert!(prompt.contains("186000"));
    }

    #[test]
    fn test_quality_user_lists_restrictions() {
        let prompt = Prompts::new().quality_user(&request(), &bundle()).unwrap();
        assert!(prompt.contains("- no medical claims"));
        assert!(prompt.contains("Run further"));
        // no_escape keeps plain text intact
        assert!(prompt.contains("direct & warm"));
    }

    #[test]
    fn test_quality_user_without_restrictions() {
        let mut req = request();
        req.brand.guidelines.content_restrictions.clear();
        let prompt = Prompts::new().quality_user(&req, &bundle()).unwrap();
        assert!(prompt.contains("(none declared)"));
    }

    #[test]
    fn test_analytics_user_embeds_content() {
        let prompt = Prompts::new().analytics_user(&request(), &bundle()).unwrap();
        assert!(prompt.contains("instagram"));
        assert!(prompt.contains("between 0 and 100"));
    }
}
