//! Ultimate Games library - driver and analysis around the rules engine.
//!
//! # Architecture
//!
//! - **Config**: TOML settings for the advisor and the analysis call
//! - **Self-play**: engine-versus-engine matches
//! - **Analysis**: position summaries sent to an LLM for coaching prose

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod llm_client;
pub mod selfplay;

pub use analysis::{Analysis, LlmAnalyst, StrategyAnalyst, analyze_game};
pub use config::{AdvisorSettings, AnalysisSettings, AppConfig, ConfigError};
pub use llm_client::{Citation, Completion, LlmClient, LlmConfig, LlmError, LlmProvider};
pub use selfplay::play_match;
