//! ToolContext - shared resources for tool execution

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::error::ToolError;
use crate::domain::BrandContext;

/// Timeout for tool HTTP calls - fail fast so a stalled dependency
/// cannot hang the retrieval loop
const HTTP_TIMEOUT_SECS: u64 = 10;

/// Context passed to every tool execution within one pipeline run
///
/// Carries the HTTP client for external lookups, the brand-context
/// snapshot the internal tools read from, and API credentials.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Shared HTTP client with a bounded timeout
    pub http: Client,

    /// Brand snapshot provided with the campaign request
    pub brand: BrandContext,

    /// Serper.dev API key for the search tools, if configured
    pub serper_api_key: Option<String>,
}

impl ToolContext {
    /// Create a context for one run
    ///
    /// Fails if the HTTP client cannot be built; a client without the
    /// timeout is never substituted.
    pub fn new(brand: BrandContext, serper_api_key: Option<String>) -> Result<Self, ToolError> {
        debug!(brand = %brand.name, has_serper_key = %serper_api_key.is_some(), "ToolContext::new: called");
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            brand,
            serper_api_key,
        })
    }
}
