//! Move selection for the computer-controlled side.
//!
//! The advisor only ever reads a [`GameState`]; every hypothetical is played
//! out on a copy of the board. Difficulty picks between a uniformly random
//! legal move and a one-ply heuristic with random tie-breaking.

pub mod score;

pub use score::score_move;

use crate::{GameState, Move, Status};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How hard the advisor tries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random legal move.
    Easy,
    /// Immediate global win, then global block, then heuristic score.
    #[default]
    Hard,
}

/// Error returned when the advisor has nothing to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AdvisorError {
    /// The game is over or no legal move exists.
    #[display("No legal move available")]
    NoLegalMove,
}

impl std::error::Error for AdvisorError {}

/// All legal moves in scan order (board index, then square index).
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    state.legal_moves()
}

/// Legal moves for a live game, or `NoLegalMove`.
fn candidates(state: &GameState) -> Result<Vec<Move>, AdvisorError> {
    let moves = state.legal_moves();
    if moves.is_empty() {
        return Err(AdvisorError::NoLegalMove);
    }
    Ok(moves)
}

/// Picks a legal move uniformly at random.
#[instrument(skip(state, rng))]
pub fn random_move<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Result<Move, AdvisorError> {
    let moves = candidates(state)?;
    moves.choose(rng).copied().ok_or(AdvisorError::NoLegalMove)
}

/// Picks the best move by the one-ply heuristic.
///
/// 1. The first move (in scan order) that wins the game outright.
/// 2. Otherwise the first square where the opponent's mark would win the
///    game outright.
/// 3. Otherwise a uniformly random move among those with the top
///    [`score_move`].
#[instrument(skip(state, rng), fields(mover = ?state.current_player()))]
pub fn best_move<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Result<Move, AdvisorError> {
    let moves = candidates(state)?;
    let mover = state.current_player();
    let opponent = mover.opponent();

    if let Some(mv) = moves
        .iter()
        .copied()
        .find(|mv| state.simulate(*mv, mover).status() == Status::Won(mover))
    {
        debug!(%mv, "Winning move");
        return Ok(mv);
    }

    if let Some(mv) = moves
        .iter()
        .copied()
        .find(|mv| state.simulate(*mv, opponent).status() == Status::Won(opponent))
    {
        debug!(%mv, "Blocking opponent's winning move");
        return Ok(mv);
    }

    let mut best_score = i32::MIN;
    let mut best = Vec::new();
    for mv in moves {
        let score = score_move(state, mv);
        if score > best_score {
            best_score = score;
            best.clear();
        }
        if score == best_score {
            best.push(mv);
        }
    }

    let choice = best.choose(rng).copied().ok_or(AdvisorError::NoLegalMove)?;
    debug!(%choice, score = best_score, ties = best.len(), "Heuristic move");
    Ok(choice)
}

/// Picks a move at the given difficulty.
///
/// # Errors
///
/// `AdvisorError::NoLegalMove` if the game is already over.
pub fn select_move<R: Rng + ?Sized>(
    state: &GameState,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Move, AdvisorError> {
    match difficulty {
        Difficulty::Easy => random_move(state, rng),
        Difficulty::Hard => best_move(state, rng),
    }
}

/// A move advisor with its own random source.
#[derive(Debug, Clone)]
pub struct Advisor {
    difficulty: Difficulty,
    rng: StdRng,
}

impl Advisor {
    /// Creates an advisor seeded from the operating system.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an advisor with a fixed seed, for reproducible games.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Picks a move for the side to move.
    #[instrument(skip(self, state), fields(difficulty = %self.difficulty))]
    pub fn choose(&mut self, state: &GameState) -> Result<Move, AdvisorError> {
        select_move(state, self.difficulty, &mut self.rng)
    }
}
