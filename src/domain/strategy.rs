//! Strategy stage artifact

use serde::{Deserialize, Serialize};

use crate::generate::{FieldSpec, FieldType, OutputSchema, StructuredOutput};

/// The campaign strategy built on top of the research findings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyPlan {
    /// Executive summary of the approach and its key bet
    pub summary: String,

    /// Measurable objectives tied to the campaign goal
    pub objectives: Vec<String>,

    /// Concrete executable actions, each implying budget allocation
    pub tactics: Vec<String>,

    /// Channels selected for this campaign
    pub channels: Vec<String>,
}

impl StructuredOutput for StrategyPlan {
    fn schema() -> OutputSchema {
        OutputSchema {
            name: "StrategyPlan",
            fields: vec![
                FieldSpec::new("summary", FieldType::string()),
                FieldSpec::new("objectives", FieldType::array_min(FieldType::string(), 2)),
                FieldSpec::new("tactics", FieldType::array_min(FieldType::string(), 3)),
                FieldSpec::new("channels", FieldType::array_min(FieldType::string(), 1)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::parse_structured;

    #[test]
    fn test_valid_plan_parses() {
        let raw = serde_json::json!({
            "summary": "Own the post-run recovery moment.",
            "objectives": ["5k signups within 30 days", "CTR above 2% by week 4"],
            "tactics": ["40% budget to TikTok paid", "weekly influencer run clubs", "retarget site visitors"],
            "channels": ["tiktok", "instagram"]
        })
        .to_string();
        let plan: StrategyPlan = parse_structured(&raw).unwrap();
        assert_eq!(plan.channels, vec!["tiktok", "instagram"]);
    }

    #[test]
    fn test_too_few_tactics_rejected() {
        let raw = serde_json::json!({
            "summary": "Own the post-run recovery moment.",
            "objectives": ["5k signups within 30 days", "CTR above 2% by week 4"],
            "tactics": ["40% budget to TikTok paid"],
            "channels": ["tiktok"]
        })
        .to_string();
        assert!(parse_structured::<StrategyPlan>(&raw).is_err());
    }
}
