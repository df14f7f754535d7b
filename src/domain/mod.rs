//! Domain types - campaign input and the stage artifacts
//!
//! Each artifact that comes out of a generation call implements
//! [`StructuredOutput`](crate::generate::StructuredOutput) so its schema
//! is enforced before the value is recorded into pipeline state.

mod analytics;
mod campaign;
mod content;
mod publication;
mod qa;
mod research;
mod strategy;

pub use analytics::{AnalyticsReport, ChannelPerformance};
pub use campaign::{BrandContext, BrandGuidelines, CampaignRequest, PastCampaign};
pub use content::{ContentAsset, ContentBundle};
pub use publication::PublicationRecord;
pub use qa::QaReport;
pub use research::{Competitor, ResearchReport};
pub use strategy::StrategyPlan;

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;
    use crate::generate::{parse_structured, StructuredOutput};

    /// A serialized artifact must satisfy its own schema and survive
    /// re-parsing through the same path generated output takes.
    fn assert_round_trip<T: StructuredOutput + Serialize>(value: &T) {
        let schema = T::schema();
        let json = serde_json::to_value(value).unwrap();
        if let Err(violations) = schema.validate(&json) {
            panic!("serialized {} failed its own schema: {violations:?}", schema.name);
        }
        let reparsed: T = parse_structured(&json.to_string()).unwrap();
        assert_eq!(json, serde_json::to_value(&reparsed).unwrap());
    }

    #[test]
    fn test_research_report_round_trips() {
        assert_round_trip(&ResearchReport {
            target_audience: "urban runners 25-40 who track every workout".to_string(),
            market_size: 186_000.0,
            growth_rate: 14.5,
            key_insights: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            competitors: vec![
                Competitor {
                    name: "Stride".to_string(),
                    positioning: "premium, weak on community".to_string(),
                },
                Competitor {
                    name: "PacePal".to_string(),
                    positioning: "budget, no coaching".to_string(),
                },
            ],
        });
    }

    #[test]
    fn test_strategy_plan_round_trips() {
        assert_round_trip(&StrategyPlan {
            summary: "Own the post-run recovery moment.".to_string(),
            objectives: vec!["5k signups within 30 days".to_string(), "CTR above 2%".to_string()],
            tactics: vec![
                "40% budget to TikTok paid".to_string(),
                "weekly influencer run clubs".to_string(),
                "retarget site visitors".to_string(),
            ],
            channels: vec!["tiktok".to_string(), "instagram".to_string()],
        });
    }

    #[test]
    fn test_content_bundle_round_trips() {
        assert_round_trip(&ContentBundle {
            assets: vec![ContentAsset {
                headline: "Run further".to_string(),
                body: "Your recovery, measured.".to_string(),
                call_to_action: "Start free".to_string(),
                channel: "instagram".to_string(),
            }],
        });
    }

    #[test]
    fn test_qa_report_round_trips() {
        assert_round_trip(&QaReport {
            critical_issues: vec!["restricted health claim in asset 2".to_string()],
            recommendations: vec!["tighten the CTA".to_string()],
        });
    }

    #[test]
    fn test_analytics_report_round_trips() {
        assert_round_trip(&AnalyticsReport {
            total_impressions: 120_000,
            total_clicks: 3_400,
            overall_ctr: 2.8,
            conversion_rate: 1.1,
            channel_breakdown: vec![ChannelPerformance {
                channel_name: "instagram".to_string(),
                impressions: 80_000,
                clicks: 2_400,
                ctr: 3.0,
            }],
        });
    }
}
