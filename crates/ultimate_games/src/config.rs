//! Application configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};
use ultimate_tictactoe::Difficulty;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Computer player settings.
    advisor: AdvisorSettings,
    /// Remote strategy analysis settings.
    analysis: AnalysisSettings,
}

/// Settings for the computer-controlled side.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorSettings {
    /// Default difficulty.
    difficulty: Difficulty,
    /// Fixed seed for reproducible play; random when absent.
    seed: Option<u64>,
    /// Artificial pause before each computer move, in milliseconds.
    think_delay_ms: u64,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            seed: None,
            think_delay_ms: 0,
        }
    }
}

impl AdvisorSettings {
    /// Think delay as a duration.
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}

/// Settings for the language-model analysis call.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// LLM provider (openai or anthropic).
    provider: LlmProvider,
    /// LLM model name.
    model: String,
    /// Maximum tokens for the analysis text.
    max_tokens: u32,
    /// Retries after the first failed attempt.
    max_retries: u32,
    /// Delay before the first retry, doubled on each further retry.
    initial_backoff_ms: u64,
    /// Let the model search the web and cite sources. OpenAI requires a
    /// search-enabled model for this.
    web_search: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAI,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            max_retries: 3,
            initial_backoff_ms: 1000,
            web_search: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(provider = ?config.analysis.provider, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads the file if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Creates LLM configuration from the analysis settings.
    /// Requires OPENAI_API_KEY or ANTHROPIC_API_KEY environment variable.
    #[instrument(
        skip(self),
        fields(provider = ?self.analysis.provider, model = %self.analysis.model)
    )]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        let settings = &self.analysis;
        let var = match settings.provider {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        };
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            settings.provider,
            api_key,
            settings.model.clone(),
            settings.max_tokens,
        )
        .with_retry(
            settings.max_retries,
            Duration::from_millis(settings.initial_backoff_ms),
        )
        .with_web_search(settings.web_search))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
