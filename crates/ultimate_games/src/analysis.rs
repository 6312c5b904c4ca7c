//! Natural-language strategy analysis of a game position.
//!
//! The engine's text summary goes out, free-text advice comes back. Nothing
//! here feeds into move selection.

use crate::llm_client::{Citation, Completion, LlmClient, LlmError};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use ultimate_tictactoe::GameState;

/// System prompt sent with every analysis request.
pub const SYSTEM_PROMPT: &str = "You are an expert Ultimate Tic-Tac-Toe coach. \
The user sends a position: nine local boards numbered 0-8 in row-major order, \
each shown as three rows where X is Black, O is White and . is empty. \
The square a player takes decides which local board the opponent must play \
in next; a decided board gives the opponent a free choice. \
Explain the key threats for both sides and recommend a plan for the player \
to move in a few short paragraphs.";

/// Advice returned by an analyst.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Free-text advice.
    pub advice: String,
    /// Sources the advice cites, possibly empty.
    pub citations: Vec<Citation>,
}

impl From<Completion> for Analysis {
    fn from(completion: Completion) -> Self {
        Self {
            advice: completion.text,
            citations: completion.citations,
        }
    }
}

/// Anything that can turn a position summary into advice.
#[async_trait::async_trait]
pub trait StrategyAnalyst: Send + Sync {
    /// Analyzes a position given as summary text.
    async fn analyze(&self, summary: &str) -> Result<Analysis, LlmError>;
}

/// Analyst backed by a language model.
#[derive(Debug, Clone)]
pub struct LlmAnalyst {
    client: LlmClient,
}

impl LlmAnalyst {
    /// Creates an analyst using the given client.
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl StrategyAnalyst for LlmAnalyst {
    async fn analyze(&self, summary: &str) -> Result<Analysis, LlmError> {
        let completion = self.client.generate(SYSTEM_PROMPT, summary).await?;
        Ok(completion.into())
    }
}

/// Summarizes the game and asks the analyst about it.
#[instrument(skip_all, fields(moves = state.move_count()))]
pub async fn analyze_game(
    analyst: &dyn StrategyAnalyst,
    state: &GameState,
) -> Result<Analysis, LlmError> {
    let analysis = analyst.analyze(&state.summary()).await?;
    info!(citations = analysis.citations.len(), "Analysis received");
    Ok(analysis)
}
