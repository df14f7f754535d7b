//! Stage executors
//!
//! Generation mode is fixed per stage: research, strategy, and content
//! run the tool loop; quality and analytics are single plain calls;
//! publish is local bookkeeping.

mod analytics;
mod content;
mod publish;
mod quality;
mod research;
mod strategy;

pub use analytics::AnalyticsStage;
pub use content::ContentStage;
pub use publish::PublishStage;
pub use quality::QualityStage;
pub use research::ResearchStage;
pub use strategy::StrategyStage;
