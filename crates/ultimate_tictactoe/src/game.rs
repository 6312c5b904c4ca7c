//! Game state and the single state transition: applying a move.

use super::action::{Move, MoveError};
use super::contracts::{Contract, LegalMove, MoveContract};
use super::{GlobalBoard, Mark, Position, Square, Status};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A mark completed a line of local boards.
    Winner(Mark),
    /// Every local board decided with no meta-line.
    Tie,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "{} wins", mark),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}

/// Complete game state.
///
/// Value semantics: applying a move returns a new state and leaves the
/// receiver untouched, so a rejected move is always a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: GlobalBoard,
    pub(crate) current_player: Mark,
    pub(crate) forced_board: Option<Position>,
    pub(crate) status: Status,
    pub(crate) last_move: Option<Move>,
}

impl GameState {
    /// Creates a fresh game: all boards empty, Black to move, no forced board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: GlobalBoard::new(),
            current_player: Mark::Black,
            forced_board: None,
            status: Status::Undecided,
            last_move: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &GlobalBoard {
        &self.board
    }

    /// Returns the mark to move.
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// The board the current player must play in; `None` means any
    /// undecided board.
    pub fn forced_board(&self) -> Option<Position> {
        self.forced_board
    }

    /// Returns the meta-board status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The most recent move, for highlighting only.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Returns true once the meta-board is decided.
    pub fn is_over(&self) -> bool {
        self.status.is_decided()
    }

    /// Returns the outcome of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Undecided => None,
            Status::Won(mark) => Some(Outcome::Winner(mark)),
            Status::Tied => Some(Outcome::Tie),
        }
    }

    /// Number of moves applied so far.
    pub fn move_count(&self) -> usize {
        self.board
            .boards()
            .iter()
            .flat_map(|b| b.squares().iter())
            .filter(|s| **s != Square::Empty)
            .count()
    }

    /// Validates a move, reporting why it is rejected.
    pub fn check_move(&self, mv: Move) -> Result<(), MoveError> {
        LegalMove::check(&mv, self)
    }

    /// Returns true if the move may be applied.
    pub fn is_legal(&self, mv: Move) -> bool {
        self.check_move(mv).is_ok()
    }

    /// All legal moves in scan order (board index, then square index).
    #[instrument(level = "trace", skip(self))]
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        let boards: Vec<Position> = match self.forced_board {
            Some(board) => vec![board],
            None => Position::ALL.to_vec(),
        };
        boards
            .into_iter()
            .filter(|b| !self.board.board(*b).is_decided())
            .flat_map(|b| {
                self.board
                    .board(b)
                    .empty_positions()
                    .map(move |s| Move::new(b, s))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Applies a move for the current player and returns the next state.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always (`LegalMove`)
    /// - Postconditions checked in debug builds only
    ///
    /// # Errors
    ///
    /// `MoveError::GameOver` once the game is decided, or one of the
    /// illegal-move variants. `self` is unchanged either way.
    #[instrument(skip(self), fields(player = ?self.current_player, forced = ?self.forced_board))]
    pub fn apply_move(&self, mv: Move) -> Result<GameState, MoveError> {
        MoveContract::pre(self, &mv)?;

        let mut next = self.clone();
        let mover = self.current_player;
        next.board.place(mv.board, mv.square, mover);

        let local = next.board.board(mv.board).status();
        if local.is_decided() {
            debug!(board = %mv.board, status = %local, "Local board decided");
        }

        next.status = next.board.status();
        next.forced_board = next.sent_to(mv.square);
        next.current_player = mover.opponent();
        next.last_move = Some(mv);

        if let Some(outcome) = next.outcome() {
            info!(%outcome, moves = next.move_count(), "Game over");
        }

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        Ok(next)
    }

    /// Replays moves from a fresh game.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(moves: &[Move]) -> Result<GameState, MoveError> {
        moves
            .iter()
            .try_fold(GameState::new(), |state, mv| state.apply_move(*mv))
    }

    /// The forced board after a move landing on `square`.
    pub(crate) fn sent_to(&self, square: Position) -> Option<Position> {
        if self.board.board(square).is_decided() {
            None
        } else {
            Some(square)
        }
    }

    /// Board after hypothetically placing `mark` at `mv`, ignoring turn order.
    pub(crate) fn simulate(&self, mv: Move, mark: Mark) -> GlobalBoard {
        let mut board = self.board;
        board.place(mv.board, mv.square, mark);
        board
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
