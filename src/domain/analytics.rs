//! Analytics stage artifact

use serde::{Deserialize, Serialize};

use crate::generate::{FieldSpec, FieldType, OutputSchema, StructuredOutput};

/// Projected campaign performance across channels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsReport {
    pub total_impressions: u64,
    pub total_clicks: u64,

    /// Click-through rate percentage
    pub overall_ctr: f64,

    /// Conversion rate percentage
    pub conversion_rate: f64,

    pub channel_breakdown: Vec<ChannelPerformance>,
}

/// Performance metrics for one channel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelPerformance {
    pub channel_name: String,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
}

impl StructuredOutput for AnalyticsReport {
    fn schema() -> OutputSchema {
        OutputSchema {
            name: "AnalyticsReport",
            fields: vec![
                FieldSpec::new("total_impressions", FieldType::integer_min(0)),
                FieldSpec::new("total_clicks", FieldType::integer_min(0)),
                FieldSpec::new("overall_ctr", FieldType::number_range(0.0, 100.0)),
                FieldSpec::new("conversion_rate", FieldType::number_range(0.0, 100.0)),
                FieldSpec::new(
                    "channel_breakdown",
                    FieldType::array_min(
                        FieldType::Object(vec![
                            FieldSpec::new("channel_name", FieldType::string()),
                            FieldSpec::new("impressions", FieldType::integer_min(0)),
                            FieldSpec::new("clicks", FieldType::integer_min(0)),
                            FieldSpec::new("ctr", FieldType::number_range(0.0, 100.0)),
                        ]),
                        1,
                    ),
                ),
            ],
        }
    }
}
