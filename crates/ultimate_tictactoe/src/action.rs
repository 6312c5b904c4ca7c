//! First-class action types for Ultimate Tic-Tac-Toe.
//!
//! A move names a cell; the mark placed there is always the current
//! player's. Moves can be validated independently of execution.

use super::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A move: one square on one local board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    /// The local board (global index).
    pub board: Position,
    /// The square inside that board (local index).
    pub square: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(board: Position, square: Position) -> Self {
        Self { board, square }
    }

    /// Creates a move from raw indices, `None` if either is out of 0-8.
    pub fn from_indices(board: usize, square: usize) -> Option<Self> {
        Some(Self::new(
            Position::from_index(board)?,
            Position::from_index(square)?,
        ))
    }

    /// Returns the local board of this move.
    pub fn board(&self) -> Position {
        self.board
    }

    /// Returns the square of this move.
    pub fn square(&self) -> Position {
        self.square
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.board.to_index(), self.square.to_index())
    }
}

/// Error parsing a move from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invalid move {:?}: expected \"board,square\" with both in 0-8", _0)]
pub struct MoveParseError(pub String);

impl std::error::Error for MoveParseError {}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MoveParseError(s.to_string());
        let (board, square) = s.split_once(',').ok_or_else(err)?;
        let board = Position::from_label_or_number(board).ok_or_else(err)?;
        let square = Position::from_label_or_number(square).ok_or_else(err)?;
        Ok(Self::new(board, square))
    }
}

/// Error that can occur when validating or applying a move.
///
/// `GameOver` is the only terminal-state error; every other variant means
/// the move itself was illegal in a live game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game already has a global result.
    #[display("Game is already over")]
    GameOver,

    /// The target local board is already won or tied.
    #[display("Board {} is already decided", _0)]
    BoardDecided(Position),

    /// The target square is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Move),

    /// The move is outside the board the player was sent to.
    #[display("Must play in board {}, not {}", expected, actual)]
    WrongBoard {
        /// The forced board.
        expected: Position,
        /// The board that was attempted.
        actual: Position,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl MoveError {
    /// True for rejections of an illegal move in a game still in progress.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            MoveError::BoardDecided(_) | MoveError::SquareOccupied(_) | MoveError::WrongBoard { .. }
        )
    }
}

impl std::error::Error for MoveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        let mv: Move = "4, 0".parse().expect("valid move");
        assert_eq!(mv, Move::new(Position::Center, Position::TopLeft));
        assert_eq!(mv.to_string(), "4,0");
    }

    #[test]
    fn test_parse_move_by_label() {
        let mv: Move = "center,bottom-right".parse().expect("valid move");
        assert_eq!(mv, Move::new(Position::Center, Position::BottomRight));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!("9,0".parse::<Move>().is_err());
        assert!("4".parse::<Move>().is_err());
        assert!("a,b".parse::<Move>().is_err());
    }

    #[test]
    fn test_from_indices() {
        assert_eq!(
            Move::from_indices(8, 2),
            Some(Move::new(Position::BottomRight, Position::TopRight))
        );
        assert_eq!(Move::from_indices(0, 9), None);
    }

    #[test]
    fn test_error_classification() {
        assert!(!MoveError::GameOver.is_illegal_move());
        assert!(MoveError::BoardDecided(Position::Center).is_illegal_move());
    }
}
