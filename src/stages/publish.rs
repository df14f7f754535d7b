//! Publish stage - local bookkeeping, no generation call

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::PublicationRecord;
use crate::pipeline::{CampaignState, Stage, StageArtifact, StageError, StageName};

pub struct PublishStage;

#[async_trait]
impl Stage for PublishStage {
    fn name(&self) -> StageName {
        StageName::Publish
    }

    async fn execute(&self, state: &CampaignState) -> Result<StageArtifact, StageError> {
        debug!(run_id = %state.run_id, "PublishStage::execute: called");
        let content = state
            .content
            .as_ref()
            .ok_or(StageError::MissingUpstream(StageName::Content))?;

        let record = PublicationRecord::from_bundle(content);
        info!(
            run_id = %state.run_id,
            published_assets = %record.published_assets,
            channels = ?record.channels,
            "PublishStage::execute: published"
        );
        Ok(StageArtifact::Publication(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BrandContext, CampaignRequest, ContentAsset, ContentBundle};

    fn state_with_content() -> CampaignState {
        let mut state = CampaignState::new(CampaignRequest {
            goal: "g".to_string(),
            target_audience: "t".to_string(),
            budget: 1.0,
            brand: BrandContext::default(),
        });
        state
            .record(StageArtifact::Content(ContentBundle {
                assets: vec![
                    ContentAsset {
                        headline: "h".to_string(),
                        body: "b".to_string(),
                        call_to_action: "c".to_string(),
                        channel: "email".to_string(),
                    },
                    ContentAsset {
                        headline: "h2".to_string(),
                        body: "b2".to_string(),
                        call_to_action: "c2".to_string(),
                        channel: "email".to_string(),
                    },
                ],
            }))
            .unwrap();
        state
    }

    #[tokio::test]
    async fn test_publish_derives_record_locally() {
        let artifact = PublishStage.execute(&state_with_content()).await.unwrap();
        match artifact {
            StageArtifact::Publication(record) => {
                assert_eq!(record.published_assets, 2);
                assert_eq!(record.channels, vec!["email"]);
            }
            other => panic!("expected publication, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_publish_requires_content() {
        let state = CampaignState::new(CampaignRequest {
            goal: "g".to_string(),
            target_audience: "t".to_string(),
            budget: 1.0,
            brand: BrandContext::default(),
        });
        let err = PublishStage.execute(&state).await.unwrap_err();
        assert!(matches!(err, StageError::MissingUpstream(StageName::Content)));
    }
}
