//! Content stage artifact

use serde::{Deserialize, Serialize};

use crate::generate::{FieldSpec, FieldType, OutputSchema, StructuredOutput};

/// The generated creative for the campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentBundle {
    pub assets: Vec<ContentAsset>,
}

/// One piece of creative targeted at a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentAsset {
    pub headline: String,
    pub body: String,
    pub call_to_action: String,
    pub channel: String,
}

impl StructuredOutput for ContentBundle {
    fn schema() -> OutputSchema {
        OutputSchema {
            name: "ContentBundle",
            fields: vec![FieldSpec::new(
                "assets",
                FieldType::array_min(
                    FieldType::Object(vec![
                        FieldSpec::new("headline", FieldType::string()),
                        FieldSpec::new("body", FieldType::string()),
                        FieldSpec::new("call_to_action", FieldType::string()),
                        FieldSpec::new("channel", FieldType::string()),
                    ]),
                    1,
                ),
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::parse_structured;

    #[test]
    fn test_valid_bundle_parses() {
        let raw = serde_json::json!({
            "assets": [{
                "headline": "Run further",
                "body": "Your recovery, measured.",
                "call_to_action": "Start free",
                "channel": "instagram"
            }]
        })
        .to_string();
        let bundle: ContentBundle = parse_structured(&raw).unwrap();
        assert_eq!(bundle.assets.len(), 1);
        assert_eq!(bundle.assets[0].channel, "instagram");
    }

    #[test]
    fn test_empty_assets_rejected() {
        let raw = serde_json::json!({ "assets": [] }).to_string();
        assert!(parse_structured::<ContentBundle>(&raw).is_err());
    }

    #[test]
    fn test_asset_missing_field_rejected() {
        let raw = serde_json::json!({
            "assets": [{
                "headline": "Run further",
                "body": "Your recovery, measured.",
                "channel": "instagram"
            }]
        })
        .to_string();
        assert!(parse_structured::<ContentBundle>(&raw).is_err());
    }
}
