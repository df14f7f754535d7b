//! Configuration types and loading

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default LLM backend for every stage
    pub llm: LlmConfig,

    /// Per-stage overrides, keyed by stage name
    pub stages: HashMap<String, StageLlmOverride>,

    /// Pipeline behavior
    pub pipeline: PipelineConfig,

    /// Tool credentials
    pub tools: ToolsConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.max_tool_steps == 0 {
            return Err(eyre::eyre!("pipeline.max-tool-steps must be at least 1"));
        }
        for stage in ["research", "strategy", "content", "quality", "analytics"] {
            let resolved = self.resolve_llm(stage);
            resolved
                .api_key()
                .wrap_err_with(|| format!("LLM credentials missing for the {stage} stage"))?;
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .campaign-pipeline.yml
        let local_config = PathBuf::from(".campaign-pipeline.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/campaign-pipeline/campaign-pipeline.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("campaign-pipeline").join("campaign-pipeline.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Resolve the LLM backend for one stage
    ///
    /// Starts from the base `llm` section; any field set in the stage's
    /// override wins.
    pub fn resolve_llm(&self, stage: &str) -> ResolvedLlmConfig {
        let base = &self.llm;
        let overrides = self.stages.get(stage);

        let pick_string = |get: fn(&StageLlmOverride) -> Option<&String>, default: &String| {
            overrides.and_then(get).cloned().unwrap_or_else(|| default.clone())
        };

        ResolvedLlmConfig {
            provider: pick_string(|o| o.provider.as_ref(), &base.provider),
            model: pick_string(|o| o.model.as_ref(), &base.model),
            api_key_env: pick_string(|o| o.api_key_env.as_ref(), &base.api_key_env),
            base_url: pick_string(|o| o.base_url.as_ref(), &base.base_url),
            max_tokens: overrides.and_then(|o| o.max_tokens).unwrap_or(base.max_tokens),
            timeout_ms: overrides.and_then(|o| o.timeout_ms).unwrap_or(base.timeout_ms),
        }
    }
}

/// Default LLM backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: "anthropic", "openai", or "ollama"
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 8192,
            timeout_ms: 120_000,
        }
    }
}

/// Partial LLM settings for one stage - unset fields fall back to `llm`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageLlmOverride {
    pub provider: Option<String>,
    pub model: Option<String>,

    #[serde(rename = "api-key-env")]
    pub api_key_env: Option<String>,

    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    #[serde(rename = "max-tokens")]
    pub max_tokens: Option<u32>,

    #[serde(rename = "timeout-ms")]
    pub timeout_ms: Option<u64>,
}

/// Pipeline behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Round ceiling for the tool-calling loop
    #[serde(rename = "max-tool-steps")]
    pub max_tool_steps: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { max_tool_steps: 6 }
    }
}

/// Tool credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Environment variable containing the Serper.dev API key
    #[serde(rename = "serper-api-key-env")]
    pub serper_api_key_env: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            serper_api_key_env: "SERPER_API_KEY".to_string(),
        }
    }
}

impl ToolsConfig {
    /// Serper key, if the environment has one
    pub fn serper_api_key(&self) -> Option<String> {
        std::env::var(&self.serper_api_key_env).ok()
    }
}

/// The fully-resolved LLM settings for one stage
#[derive(Debug, Clone)]
pub struct ResolvedLlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

impl ResolvedLlmConfig {
    /// Read the API key from the environment
    ///
    /// Ollama runs without authentication, so a missing variable falls
    /// back to a placeholder for that provider only.
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) => Ok(key),
            Err(_) if self.provider == "ollama" => Ok("ollama".to_string()),
            Err(_) => Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.api_key_env
            )),
        }
    }
}
