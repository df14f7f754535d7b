//! Generation port - schema-constrained output and the tool loop
//!
//! Two entry points: [`generate_structured`] for one plain call parsed
//! into a declared artifact type, and [`generate_with_tools`] for the
//! bounded retrieval loop followed by the same structured synthesis.

mod error;
mod react;
pub mod schema;
mod structured;

pub use error::GenerateError;
pub use react::{generate_with_tools, ReactEngine};
pub use schema::{FieldSpec, FieldType, OutputSchema};
pub use structured::{generate_structured, parse_structured, strip_code_fence, StructuredOutput, MAX_OUTPUT_TOKENS};
