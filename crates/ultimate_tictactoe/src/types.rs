//! Core domain types for Ultimate Tic-Tac-Toe.

use super::position::Position;
use super::rules;
use serde::{Deserialize, Serialize};

/// A player's mark. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Mark {
    /// Black (moves first, rendered `X`).
    Black,
    /// White (moves second, rendered `O`).
    White,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Black => Mark::White,
            Mark::White => Mark::Black,
        }
    }

    /// Single-character symbol used in text summaries.
    pub fn symbol(self) -> char {
        match self {
            Mark::Black => 'X',
            Mark::White => 'O',
        }
    }
}

/// A square on a local board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Outcome of a local board or of the meta-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    /// Still open.
    #[default]
    Undecided,
    /// Three in a row for this mark.
    Won(Mark),
    /// Full (or, for the meta-board, all nine decided) with no line.
    Tied,
}

impl Status {
    /// Returns true once the status is terminal.
    pub fn is_decided(self) -> bool {
        self != Status::Undecided
    }

    /// Returns the winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Status::Won(mark) => Some(mark),
            Status::Undecided | Status::Tied => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Undecided => write!(f, "undecided"),
            Status::Won(mark) => write!(f, "won by {} ({})", mark, mark.symbol()),
            Status::Tied => write!(f, "tied"),
        }
    }
}

/// One inner 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalBoard {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
    status: Status,
}

impl LocalBoard {
    /// Creates a new empty, undecided board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns the board's status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns true once the board is won or tied.
    pub fn is_decided(&self) -> bool {
        self.status.is_decided()
    }

    /// Empty positions in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|pos| self.is_empty(*pos))
    }

    /// Places a mark and re-derives the status (unchecked).
    ///
    /// A decided status is never recomputed, so it cannot revert.
    pub(crate) fn place(&mut self, pos: Position, mark: Mark) {
        self.squares[pos.to_index()] = Square::Occupied(mark);
        if !self.status.is_decided() {
            self.status = rules::local_status(&self.squares);
        }
    }
}

/// The 3x3 arrangement of local boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalBoard {
    boards: [LocalBoard; 9],
}

impl GlobalBoard {
    /// Creates a board of nine empty local boards.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the local board at the given meta position.
    pub fn board(&self, pos: Position) -> &LocalBoard {
        &self.boards[pos.to_index()]
    }

    /// Returns all local boards in row-major order.
    pub fn boards(&self) -> &[LocalBoard; 9] {
        &self.boards
    }

    /// Statuses of the nine local boards, treated as meta-cells.
    pub fn statuses(&self) -> [Status; 9] {
        self.boards.map(|board| board.status())
    }

    /// Derives the meta-board status from the local statuses.
    pub fn status(&self) -> Status {
        rules::global_status(&self.statuses())
    }

    /// Places a mark at (board, square) without legality checks.
    pub(crate) fn place(&mut self, board: Position, square: Position, mark: Mark) {
        self.boards[board.to_index()].place(square, mark);
    }
}
