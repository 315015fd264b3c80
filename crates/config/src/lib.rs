//! Configuration loading and validation for swimdeck.
//!
//! Loads configuration from a TOML file with `SWIMDECK_*` environment
//! variable overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// The root configuration structure.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Provider base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for both decision and streaming calls
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens per model response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Provider context window in tokens
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Ceiling on DECIDING ⇄ EXECUTING_TOOLS rounds per request
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_context_window() -> usize {
    16_384
}
fn default_max_tool_rounds() -> u32 {
    8
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            context_window: default_context_window(),
            max_tool_rounds: default_max_tool_rounds(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "api_key",
                &match self.api_key {
                    Some(_) => "[REDACTED]",
                    None => "None",
                },
            )
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("context_window", &self.context_window)
            .field("max_tool_rounds", &self.max_tool_rounds)
            .finish()
    }
}

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Load configuration from a TOML file, apply environment overrides,
    /// and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str(&raw)?
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `SWIMDECK_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("SWIMDECK_API_KEY") {
            self.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("SWIMDECK_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(model) = std::env::var("SWIMDECK_MODEL") {
            self.model = model;
        }
        if let Ok(window) = std::env::var("SWIMDECK_CONTEXT_WINDOW")
            && let Ok(parsed) = window.parse()
        {
            self.context_window = parsed;
        }
        if let Ok(rounds) = std::env::var("SWIMDECK_MAX_TOOL_ROUNDS")
            && let Ok(parsed) = rounds.parse()
        {
            self.max_tool_rounds = parsed;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".into()));
        }
        if self.context_window == 0 {
            return Err(ConfigError::Invalid(
                "context_window must be greater than zero".into(),
            ));
        }
        if self.max_tool_rounds == 0 {
            return Err(ConfigError::Invalid(
                "max_tool_rounds must be at least 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature {} out of range 0.0–2.0",
                self.temperature
            )));
        }
        Ok(())
    }
}
