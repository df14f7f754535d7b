//! Campaign request and brand context

use serde::{Deserialize, Serialize};

/// The immutable input to one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRequest {
    /// What the campaign is trying to achieve
    pub goal: String,

    /// Who the campaign targets
    pub target_audience: String,

    /// Budget in USD
    pub budget: f64,

    /// Brand snapshot the internal tools read from
    pub brand: BrandContext,
}

/// Brand snapshot provided with the request
///
/// This is the only brand data the run sees - the internal tools
/// (brand_memory, past_campaigns, brand_guidelines, brand_tone) read from
/// it rather than from any external store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandContext {
    pub name: String,
    pub industry: String,
    pub description: String,
    pub tone_of_voice: String,
    pub guidelines: BrandGuidelines,
    pub memory_notes: Vec<String>,
    pub past_campaigns: Vec<PastCampaign>,
}

/// Brand style rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandGuidelines {
    pub visual_style: String,
    pub preferred_channels: Vec<String>,
    pub content_restrictions: Vec<String>,
}

/// A past campaign and how it went
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PastCampaign {
    pub name: String,
    pub summary: String,
    pub outcome: String,
}
