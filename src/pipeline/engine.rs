//! Pipeline engine - fixed stage order with one conditional gate

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::domain::CampaignRequest;

use super::gate::GateVerdict;
use super::stage::{Stage, StageName};
use super::state::CampaignState;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalStatus {
    Completed,
    Failed,
}

/// Why a run failed
///
/// A gate halt and a stage fault are distinct outcomes: the first means
/// the pipeline worked and rejected the content, the second means a stage
/// itself broke.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum RunFailure {
    QualityGate { critical_issues: Vec<String> },
    StageFault { stage: StageName, message: String },
}

/// The result of one pipeline run
#[derive(Debug, Serialize)]
pub struct RunOutcome {
    pub state: CampaignState,
    pub status: TerminalStatus,
    pub failure: Option<RunFailure>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

/// Drives the stages in fixed order
///
/// research → strategy → content → quality → (gate) → publish → analytics.
/// The engine owns all state writes; a stage error or a gate halt ends
/// the run with a `Failed` status, anything else runs to `Completed`.
pub struct PipelineEngine {
    stages: Vec<Box<dyn Stage>>,
}

impl PipelineEngine {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Execute one run to a terminal status
    pub async fn run(&self, request: CampaignRequest) -> RunOutcome {
        let started_at = Utc::now();
        let run_start = Instant::now();
        let mut state = CampaignState::new(request);
        info!(run_id = %state.run_id, goal = %state.request.goal, "PipelineEngine::run: started");

        let mut failure: Option<RunFailure> = None;

        for stage in &self.stages {
            let name = stage.name();
            info!(run_id = %state.run_id, stage = %name, "PipelineEngine::run: stage started");
            let stage_start = Instant::now();

            let artifact = match stage.execute(&state).await {
                Ok(artifact) => artifact,
                Err(e) => {
                    error!(run_id = %state.run_id, stage = %name, error = %e, "PipelineEngine::run: stage fault");
                    failure = Some(RunFailure::StageFault {
                        stage: name,
                        message: e.to_string(),
                    });
                    break;
                }
            };

            if let Err(e) = state.record(artifact) {
                error!(run_id = %state.run_id, stage = %name, error = %e, "PipelineEngine::run: record failed");
                failure = Some(RunFailure::StageFault {
                    stage: name,
                    message: e.to_string(),
                });
                break;
            }

            info!(
                run_id = %state.run_id,
                stage = %name,
                elapsed_ms = %stage_start.elapsed().as_millis(),
                "PipelineEngine::run: stage complete"
            );

            if name == StageName::Quality {
                // The quality slot was just recorded
                let verdict = state
                    .qa_report
                    .as_ref()
                    .map(GateVerdict::from_report)
                    .unwrap_or(GateVerdict::Proceed { recommendations: vec![] });
                if let GateVerdict::Halt { critical_issues } = verdict {
                    info!(
                        run_id = %state.run_id,
                        critical = %critical_issues.len(),
                        "PipelineEngine::run: quality gate halted the run"
                    );
                    failure = Some(RunFailure::QualityGate { critical_issues });
                    break;
                }
            }
        }

        let status = if failure.is_none() {
            TerminalStatus::Completed
        } else {
            TerminalStatus::Failed
        };
        let duration_ms = run_start.elapsed().as_millis() as u64;
        info!(run_id = %state.run_id, status = ?status, %duration_ms, "PipelineEngine::run: finished");

        RunOutcome {
            state,
            status,
            failure,
            started_at,
            duration_ms,
        }
    }
}
