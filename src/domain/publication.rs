//! Publication stage artifact

use serde::{Deserialize, Serialize};

use crate::domain::ContentBundle;

/// Record of what was published where
///
/// Derived locally from the approved content bundle - publication is a
/// bookkeeping step, not a generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationRecord {
    /// Number of assets published
    pub published_assets: u32,

    /// Distinct channels the assets went out on, in first-seen order
    pub channels: Vec<String>,
}

impl PublicationRecord {
    /// Build the record from an approved bundle
    pub fn from_bundle(bundle: &ContentBundle) -> Self {
        let mut channels: Vec<String> = Vec::new();
        for asset in &bundle.assets {
            if !channels.contains(&asset.channel) {
                channels.push(asset.channel.clone());
            }
        }
        Self {
            published_assets: bundle.assets.len() as u32,
            channels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentAsset;

    fn asset(channel: &str) -> ContentAsset {
        ContentAsset {
            headline: "h".to_string(),
            body: "b".to_string(),
            call_to_action: "c".to_string(),
            channel: channel.to_string(),
        }
    }

    #[test]
    fn test_from_bundle_counts_and_dedupes_channels() {
        let bundle = ContentBundle {
            assets: vec![asset("instagram"), asset("tiktok"), asset("instagram")],
        };
        let record = PublicationRecord::from_bundle(&bundle);
        assert_eq!(record.published_assets, 3);
        assert_eq!(record.channels, vec!["instagram", "tiktok"]);
    }
}
