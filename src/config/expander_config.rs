//! Expander configuration
//!
//! TOML-based configuration with environment variable override support.
//! Priority: environment variables > --config file (or the default config
//! file when present) > Defaults.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::path_resolver;

/// How the model output is turned into variations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMode {
    /// Take the generated text of the first choice as the single variation
    #[default]
    Raw,
    /// Ask for `ParaphrasedQuery` tool calls and return each paraphrase
    Structured,
}

impl std::str::FromStr for ExpansionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(ExpansionMode::Raw),
            "structured" => Ok(ExpansionMode::Structured),
            other => Err(anyhow!(
                "Invalid expansion mode '{}'. Valid modes: [\"raw\", \"structured\"]",
                other
            )),
        }
    }
}

/// Endpoint and generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpanderConfig {
    /// Remote model identifier
    #[serde(default = "default_model")]
    model: String,

    /// Inference endpoint base URL; the model id is appended to it
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Sampling temperature (0.0 = deterministic decoding)
    #[serde(default)]
    temperature: f32,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_new_tokens")]
    max_new_tokens: u32,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Output extraction mode
    #[serde(default)]
    mode: ExpansionMode,
}

fn default_model() -> String {
    "HuggingFaceH4/zephyr-7b-beta".to_string()
}

fn default_base_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_max_new_tokens() -> u32 {
    512
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: 0.0,
            max_new_tokens: default_max_new_tokens(),
            timeout_secs: default_timeout_secs(),
            mode: ExpansionMode::default(),
        }
    }
}

impl ExpanderConfig {
    /// Environment variable holding the endpoint credential
    pub const TOKEN_ENV: &'static str = "HUGGINGFACEHUB_API_TOKEN";

    /// Create config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: ExpanderConfig = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
        Ok(config)
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply every `QUERY_EXPANDER_*` variable that is set, whatever its value
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("QUERY_EXPANDER_MODEL") {
            self.model = model;
        }

        if let Ok(base_url) = std::env::var("QUERY_EXPANDER_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("QUERY_EXPANDER_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid QUERY_EXPANDER_TIMEOUT_SECS: {}", timeout),
            }
        }

        if let Ok(mode) = std::env::var("QUERY_EXPANDER_MODE") {
            match mode.parse() {
                Ok(mode) => self.mode = mode,
                Err(e) => tracing::warn!("Ignoring QUERY_EXPANDER_MODE: {}", e),
            }
        }

        self
    }

    /// Load the effective configuration.
    ///
    /// An explicit path must exist; the default config path is only read when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file_config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match path_resolver::default_config_path() {
                Some(default_path) if default_path.exists() => {
                    tracing::debug!("Loading config from {}", default_path.display());
                    Self::from_file(&default_path)?
                }
                _ => Self::default(),
            },
        };

        let config = file_config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Override model
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Override base_url
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Override mode
    pub fn with_mode(mut self, mode: ExpansionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override timeout_secs
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(anyhow!("model must not be empty"));
        }

        if self.temperature < 0.0 {
            return Err(anyhow!("temperature must not be negative"));
        }

        if self.max_new_tokens == 0 {
            return Err(anyhow!("max_new_tokens must be greater than 0"));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than 0"));
        }

        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| anyhow!("Failed to serialize config: {}", e))
    }

    // Getters
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_new_tokens(&self) -> u32 {
        self.max_new_tokens
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn mode(&self) -> ExpansionMode {
        self.mode
    }
}
