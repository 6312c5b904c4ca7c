//! Status consistency: stored statuses match what the squares say.

use super::super::{GameState, rules};
use super::Invariant;

/// Invariant: every local status and the global status are exactly what
/// the rules derive from the current squares.
///
/// Because decided boards never receive further marks, re-deriving a
/// decided status always reproduces it.
pub struct StatusConsistentInvariant;

impl Invariant<GameState> for StatusConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        let board = game.board();
        let locals_agree = board
            .boards()
            .iter()
            .all(|b| b.status() == rules::local_status(b.squares()));

        locals_agree && game.status() == rules::global_status(&board.statuses())
    }

    fn description() -> &'static str {
        "Local and global statuses agree with the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Status};

    #[test]
    fn test_fresh_game_holds() {
        assert!(StatusConsistentInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_premature_global_result_violates() {
        let mut game = GameState::new();
        game.status = Status::Won(Mark::Black);
        assert!(!StatusConsistentInvariant::holds(&game));
    }
}
