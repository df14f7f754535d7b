//! Pipeline orchestration - state, stages, gate, and the engine

mod engine;
mod gate;
mod stage;
mod state;

pub use engine::{PipelineEngine, RunFailure, RunOutcome, TerminalStatus};
pub use gate::GateVerdict;
pub use stage::{Stage, StageError, StageName};
pub use state::{CampaignState, SlotOccupied, StageArtifact};
