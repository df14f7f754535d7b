//! Shared pipeline state

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    AnalyticsReport, CampaignRequest, ContentBundle, PublicationRecord, QaReport, ResearchReport,
    StrategyPlan,
};

use super::stage::StageName;

/// One validated artifact coming out of a stage
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "artifact")]
pub enum StageArtifact {
    Research(ResearchReport),
    Strategy(StrategyPlan),
    Content(ContentBundle),
    Qa(QaReport),
    Publication(PublicationRecord),
    Analytics(AnalyticsReport),
}

impl StageArtifact {
    /// Which slot this artifact belongs to
    pub fn slot(&self) -> StageName {
        match self {
            StageArtifact::Research(_) => StageName::Research,
            StageArtifact::Strategy(_) => StageName::Strategy,
            StageArtifact::Content(_) => StageName::Content,
            StageArtifact::Qa(_) => StageName::Quality,
            StageArtifact::Publication(_) => StageName::Publish,
            StageArtifact::Analytics(_) => StageName::Analytics,
        }
    }
}

/// A slot was written twice
#[derive(Debug, Error)]
#[error("Slot {slot} is already populated")]
pub struct SlotOccupied {
    pub slot: StageName,
}

/// The state one pipeline run accumulates
///
/// One optional field per artifact slot. Slots are written exactly once,
/// through [`CampaignState::record`]; stages read upstream slots but the
/// engine owns all writes.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignState {
    pub run_id: Uuid,
    pub request: CampaignRequest,

    pub research: Option<ResearchReport>,
    pub strategy: Option<StrategyPlan>,
    pub content: Option<ContentBundle>,
    pub qa_report: Option<QaReport>,
    pub publication: Option<PublicationRecord>,
    pub analytics: Option<AnalyticsReport>,
}

impl CampaignState {
    /// Fresh state for one run
    pub fn new(request: CampaignRequest) -> Self {
        let run_id = Uuid::new_v4();
        debug!(%run_id, goal = %request.goal, "CampaignState::new: called");
        Self {
            run_id,
            request,
            research: None,
            strategy: None,
            content: None,
            qa_report: None,
            publication: None,
            analytics: None,
        }
    }

    /// Record a stage artifact into its slot
    ///
    /// Fails if the slot is already populated - slots are write-at-most-once.
    pub fn record(&mut self, artifact: StageArtifact) -> Result<(), SlotOccupied> {
        let slot = artifact.slot();
        debug!(%slot, "CampaignState::record: called");

        macro_rules! set_once {
            ($field:ident, $value:expr) => {{
                if self.$field.is_some() {
                    return Err(SlotOccupied { slot });
                }
                self.$field = Some($value);
            }};
        }

        match artifact {
            StageArtifact::Research(v) => set_once!(research, v),
            StageArtifact::Strategy(v) => set_once!(strategy, v),
            StageArtifact::Content(v) => set_once!(content, v),
            StageArtifact::Qa(v) => set_once!(qa_report, v),
            StageArtifact::Publication(v) => set_once!(publication, v),
            StageArtifact::Analytics(v) => set_once!(analytics, v),
        }
        Ok(())
    }
}
