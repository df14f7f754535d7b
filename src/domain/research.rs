//! Research stage artifact

use serde::{Deserialize, Serialize};

use crate::generate::{FieldSpec, FieldType, OutputSchema, StructuredOutput};

/// Market research findings for the campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResearchReport {
    /// Specific profile of the primary audience, beyond broad demographics
    pub target_audience: String,

    /// Total addressable market in USD millions
    pub market_size: f64,

    /// Annual CAGR percentage for the relevant segment
    pub growth_rate: f64,

    /// Actionable insights that inform the strategy
    pub key_insights: Vec<String>,

    /// Most relevant direct and indirect competitors
    pub competitors: Vec<Competitor>,
}

/// One competitor and the gap it leaves open
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Competitor {
    pub name: String,
    pub positioning: String,
}

impl StructuredOutput for ResearchReport {
    fn schema() -> OutputSchema {
        OutputSchema {
            name: "ResearchReport",
            fields: vec![
                FieldSpec::new("target_audience", FieldType::string_bounded(10, 500)),
                FieldSpec::new("market_size", FieldType::Number {
                    min: Some(0.0),
                    max: None,
                }),
                FieldSpec::new("growth_rate", FieldType::number_range(0.0, 100.0)),
                FieldSpec::new("key_insights", FieldType::array_min(FieldType::string(), 3)),
                FieldSpec::new(
                    "competitors",
                    FieldType::array_min(
                        FieldType::Object(vec![
                            FieldSpec::new("name", FieldType::string()),
                            FieldSpec::new("positioning", FieldType::string()),
                        ]),
                        2,
                    ),
                ),
            ],
        }
    }
}
