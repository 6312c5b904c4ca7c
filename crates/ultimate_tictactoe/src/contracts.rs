//! Contract-based validation for Ultimate Tic-Tac-Toe.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::game::GameState;
use super::invariants::{InvariantSet, UltimateInvariants};
use super::{Position, Square};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The meta-board must still be undecided.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects every move once the game has a result.
    pub fn check(_mov: &Move, game: &GameState) -> Result<(), MoveError> {
        if game.is_over() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: The target local board must be undecided.
pub struct BoardUndecided;

impl BoardUndecided {
    /// Rejects moves into won or tied boards.
    pub fn check(mov: &Move, game: &GameState) -> Result<(), MoveError> {
        if game.board().board(mov.board).is_decided() {
            Err(MoveError::BoardDecided(mov.board))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The square must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects moves onto occupied squares.
    pub fn check(mov: &Move, game: &GameState) -> Result<(), MoveError> {
        if game.board().board(mov.board).is_empty(mov.square) {
            Ok(())
        } else {
            Err(MoveError::SquareOccupied(*mov))
        }
    }
}

/// Precondition: The move must be in the forced board, if there is one.
pub struct InForcedBoard;

impl InForcedBoard {
    /// Rejects moves outside the board the player was sent to.
    pub fn check(mov: &Move, game: &GameState) -> Result<(), MoveError> {
        match game.forced_board() {
            Some(expected) if expected != mov.board => Err(MoveError::WrongBoard {
                expected,
                actual: mov.board,
            }),
            _ => Ok(()),
        }
    }
}

/// Composite precondition for a legal move.
///
/// Checked in order, so a finished game always reports `GameOver`.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(level = "trace", skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), MoveError> {
        GameNotOver::check(mov, game)?;
        BoardUndecided::check(mov, game)?;
        SquareIsEmpty::check(mov, game)?;
        InForcedBoard::check(mov, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition postcondition
// ─────────────────────────────────────────────────────────────

/// Postcondition: exactly one square went from empty to the mover's mark,
/// and no other square changed.
pub struct MonotonicBoard;

impl MonotonicBoard {
    /// Compares the two boards square by square.
    pub fn holds(before: &GameState, after: &GameState) -> bool {
        let mover = Square::Occupied(before.current_player());
        let mut placed = 0;
        for b in Position::ALL {
            let (old, new) = (before.board().board(b), after.board().board(b));
            for s in Position::ALL {
                match (old.get(s), new.get(s)) {
                    (x, y) if x == y => {}
                    (Square::Empty, y) if y == mover => placed += 1,
                    _ => {
                        warn!(board = %b, square = %s, "Square overwritten");
                        return false;
                    }
                }
            }
        }
        placed == 1
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Game not over
/// - Target board undecided
/// - Square empty
/// - Inside the forced board
///
/// Postconditions:
/// - Board changed monotonically by one square
/// - Statuses, turn order and forced board all consistent
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(game: &GameState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        if !MonotonicBoard::holds(before, after) {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: board changed non-monotonically".to_string(),
            ));
        }
        UltimateInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Status};

    fn mv(board: usize, square: usize) -> Move {
        Move::from_indices(board, square).expect("indices in range")
    }

    #[test]
    fn test_precondition_empty_square() {
        let game = GameState::new();
        assert!(MoveContract::pre(&game, &mv(4, 4)).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let game = GameState::new();
        let game = game.apply_move(mv(4, 4)).expect("legal");
        assert!(matches!(
            MoveContract::pre(&game, &mv(4, 4)),
            Err(MoveError::SquareOccupied(_))
        ));
    }

    #[test]
    fn test_precondition_wrong_board() {
        let game = GameState::new().apply_move(mv(0, 4)).expect("legal");
        assert_eq!(
            MoveContract::pre(&game, &mv(0, 0)),
            Err(MoveError::WrongBoard {
                expected: Position::Center,
                actual: Position::TopLeft,
            })
        );
    }

    #[test]
    fn test_game_over_reported_first() {
        let mut game = GameState::new();
        game.status = Status::Won(Mark::White);
        assert_eq!(MoveContract::pre(&game, &mv(4, 4)), Err(MoveError::GameOver));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let game = GameState::new();
        let after = game.apply_move(mv(4, 4)).expect("legal");
        assert!(MoveContract::post(&game, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_overwrite() {
        let game = GameState::new().apply_move(mv(4, 4)).expect("legal");
        let mut after = game.apply_move(mv(4, 0)).expect("legal");

        // Overwrite Black's first mark with White.
        after.board.place(Position::Center, Position::Center, Mark::White);
        assert!(MoveContract::post(&game, &after).is_err());
    }
}
