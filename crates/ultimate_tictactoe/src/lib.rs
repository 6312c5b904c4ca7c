//! Ultimate Tic-Tac-Toe rules engine and move advisor.
//!
//! Nine local 3x3 boards arranged in a 3x3 meta-grid. The square a player
//! picks decides which local board the opponent must play in next; winning
//! three local boards in a row wins the game.
//!
//! # Architecture
//!
//! - **Engine**: [`GameState`] owns the board and applies moves through a
//!   precondition/postcondition [`contracts`] layer.
//! - **Rules**: pure line and tie detection shared by both board levels.
//! - **Advisor**: [`advisor`] reads a state and proposes a move.
//!
//! # Example
//!
//! ```
//! use ultimate_tictactoe::{GameState, Move, Position, advisor::{Advisor, Difficulty}};
//!
//! let game = GameState::new();
//! let game = game.apply_move(Move::new(Position::Center, Position::Center))?;
//! assert_eq!(game.forced_board(), Some(Position::Center));
//!
//! let mut advisor = Advisor::seeded(Difficulty::Hard, 1);
//! let reply = advisor.choose(&game)?;
//! assert!(game.is_legal(reply));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod advisor;
pub mod contracts;
mod game;
pub mod invariants;
mod position;
pub mod rules;
mod summary;
mod types;

pub use action::{Move, MoveError, MoveParseError};
pub use advisor::{Advisor, AdvisorError, Difficulty};
pub use game::{GameState, Outcome};
pub use position::Position;
pub use summary::{EMPTY_SYMBOL, render_local};
pub use types::{GlobalBoard, LocalBoard, Mark, Square, Status};
