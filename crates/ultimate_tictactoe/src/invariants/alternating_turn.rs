//! Alternating turn invariant: Black, White, Black, White, ...

use super::super::{GameState, Mark, Square};
use super::Invariant;

/// Invariant: Marks alternate, Black first.
///
/// Without a move history this is read off the board: Black has either as
/// many marks as White (Black to move) or exactly one more (White to move).
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        let count = |mark: Mark| {
            game.board()
                .boards()
                .iter()
                .flat_map(|b| b.squares().iter())
                .filter(|s| **s == Square::Occupied(mark))
                .count()
        };
        let (black, white) = (count(Mark::Black), count(Mark::White));

        match game.current_player() {
            Mark::Black => black == white,
            Mark::White => black == white + 1,
        }
    }

    fn description() -> &'static str {
        "Marks alternate turns (Black, White, Black, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Position};

    #[test]
    fn test_empty_game_holds() {
        assert!(AlternatingTurnInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_single_move_holds() {
        let game = GameState::new()
            .apply_move(Move::new(Position::Center, Position::Center))
            .expect("legal");
        assert!(AlternatingTurnInvariant::holds(&game));
        assert_eq!(game.current_player(), Mark::White);
    }

    #[test]
    fn test_wrong_side_to_move_violates() {
        let mut game = GameState::new()
            .apply_move(Move::new(Position::Center, Position::Center))
            .expect("legal");
        game.current_player = Mark::Black;
        assert!(!AlternatingTurnInvariant::holds(&game));
    }
}
