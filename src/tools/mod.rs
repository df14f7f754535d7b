//! Tool system for retrieval-augmented stages
//!
//! Each tool-using stage gets its own `ToolRegistry` - the hard boundary
//! between that stage and the universe of callable tools. A stage cannot
//! invoke a tool outside its registry; unknown names and tool failures
//! become structured observations, never errors that escape the dispatch
//! boundary.

mod context;
mod error;
mod registry;
mod traits;

pub mod builtin;

pub use context::ToolContext;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use traits::{Observation, Tool};
