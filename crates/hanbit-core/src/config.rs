//! Configuration management for Hanbit.
//!
//! Configuration is loaded from the platform config dir (e.g.
//! `~/.config/hanbit/config.toml` on Linux) with sensible defaults. API keys
//! support `${ENV_VAR}` indirection so the file can be committed without
//! secrets.

use crate::error::ConfigError;
use crate::llm::resolve_env_var;
use crate::request::{ProviderCredentials, MAX_TEMPERATURE, MAX_VARIATIONS, MIN_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Hanbit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Request defaults
    pub defaults: DefaultsConfig,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories, falling back to
    /// `~/.hanbit/config.toml` if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "hanbit", "hanbit")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| {
                std::env::var("HOME")
                    .map(|home| PathBuf::from(home).join(".hanbit").join("config.toml"))
                    .unwrap_or_else(|_| PathBuf::from(".hanbit/config.toml"))
            })
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check configured defaults against the request invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.defaults.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "defaults.temperature must be between {MIN_TEMPERATURE} and {MAX_TEMPERATURE}, got {}",
                self.defaults.temperature
            )));
        }
        if self.defaults.variations == 0 || self.defaults.variations > MAX_VARIATIONS {
            return Err(ConfigError::ValidationError(format!(
                "defaults.variations must be between 1 and {MAX_VARIATIONS}, got {}",
                self.defaults.variations
            )));
        }
        Ok(())
    }

    /// Resolve configured API keys into per-provider credentials.
    ///
    /// `${ENV_VAR}` values are read from the environment; unset variables
    /// resolve to absent, which is only an error if that provider is later
    /// selected.
    pub fn credentials(&self) -> ProviderCredentials {
        ProviderCredentials {
            gemini: self
                .llm
                .gemini
                .as_ref()
                .and_then(|c| resolve_env_var(&c.api_key)),
            openai: self
                .llm
                .openai
                .as_ref()
                .and_then(|c| resolve_env_var(&c.api_key)),
            anthropic: self
                .llm
                .anthropic
                .as_ref()
                .and_then(|c| resolve_env_var(&c.api_key)),
        }
    }
}

/// Request defaults applied when the caller doesn't override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Model identifier passed to the selected provider
    pub model: String,

    /// Number of prompt variants per run
    pub variations: u32,

    /// LLM sampling temperature
    pub temperature: f32,

    /// User negative prompt
    pub negative_prompt: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash-latest".to_string(),
            variations: 1,
            temperature: 0.7,
            negative_prompt: "blurry, distortion, cartoon".to_string(),
        }
    }
}

/// LLM provider configurations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Gemini configuration
    pub gemini: Option<GeminiConfig>,

    /// OpenAI configuration
    pub openai: Option<OpenAiConfig>,

    /// Anthropic configuration
    pub anthropic: Option<AnthropicConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            gemini: Some(GeminiConfig::default()),
            openai: Some(OpenAiConfig::default()),
            anthropic: Some(AnthropicConfig::default()),
        }
    }
}

/// Gemini configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: "${GEMINI_API_KEY}".to_string(),
        }
    }
}

/// OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: "${OPENAI_API_KEY}".to_string(),
        }
    }
}

/// Anthropic configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: "${ANTHROPIC_API_KEY}".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
