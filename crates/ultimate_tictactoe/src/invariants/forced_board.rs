//! Forced board invariant: the next board is chosen by the last square.

use super::super::GameState;
use super::Invariant;

/// Invariant: the forced board is the last move's square, unless that
/// board is decided (or there is no last move), in which case play is free.
pub struct ForcedBoardInvariant;

impl Invariant<GameState> for ForcedBoardInvariant {
    fn holds(game: &GameState) -> bool {
        let expected = game.last_move().and_then(|mv| game.sent_to(mv.square));
        game.forced_board() == expected
    }

    fn description() -> &'static str {
        "Forced board follows the last move's square"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Position};

    #[test]
    fn test_follows_last_square() {
        let game = GameState::new()
            .apply_move(Move::new(Position::TopLeft, Position::BottomRight))
            .expect("legal");
        assert_eq!(game.forced_board(), Some(Position::BottomRight));
        assert!(ForcedBoardInvariant::holds(&game));
    }

    #[test]
    fn test_stale_forced_board_violates() {
        let mut game = GameState::new();
        game.forced_board = Some(Position::Center);
        assert!(!ForcedBoardInvariant::holds(&game));
    }
}
