//! One-ply heuristic scoring of candidate moves.

use crate::rules::would_win;
use crate::{GameState, LocalBoard, Mark, Move, Position, Status};
use tracing::instrument;

/// Completing a line on the move's own local board.
pub const LOCAL_WIN: i32 = 300;
/// Taking the square the opponent needs to complete a line there.
pub const LOCAL_BLOCK: i32 = 150;
/// Sending the opponent to a decided board, i.e. giving them a free choice.
pub const FREE_CHOICE: i32 = 50;
/// Playing the center square (which sends to the center board).
pub const CENTER: i32 = 10;
/// Sending the opponent to a board they can win in one move.
pub const OPEN_WIN_PENALTY: i32 = -500;
/// Floor for moves that earned nothing and were not penalized.
pub const NEUTRAL: i32 = 1;

/// Would `mark` at `square` complete a line on this local board?
fn completes_line(board: &LocalBoard, square: Position, mark: Mark) -> bool {
    let mut trial = *board;
    trial.place(square, mark);
    trial.status() == Status::Won(mark)
}

/// Scores a legal move for the side to move.
///
/// Local win and local block are exclusive; the rest are additive. The
/// send target is inspected after the move, so a move that decides its
/// own board and sends there counts as a free choice.
#[instrument(level = "trace", skip(state), ret)]
pub fn score_move(state: &GameState, mv: Move) -> i32 {
    let mover = state.current_player();
    let opponent = mover.opponent();
    let local = state.board().board(mv.board);

    let mut score = 0;
    if completes_line(local, mv.square, mover) {
        score += LOCAL_WIN;
    } else if completes_line(local, mv.square, opponent) {
        score += LOCAL_BLOCK;
    }

    let after = state.simulate(mv, mover);
    let target = after.board(mv.square);
    if target.is_decided() {
        score += FREE_CHOICE;
    }
    if mv.square == Position::Center {
        score += CENTER;
    }

    let hands_over_win = !target.is_decided() && would_win(target.squares(), opponent);
    if hands_over_win {
        score += OPEN_WIN_PENALTY;
    } else if score <= 0 {
        score = NEUTRAL;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::tests::position;

    #[test]
    fn test_local_block_scored_for_opponent_line_only() {
        // Board 4: Black at 0,1; White at 6,7. White to move in board 4.
        let state = position(&[(4, 0), (4, 1), (0, 4)], &[(4, 6), (4, 7)], Mark::White, Some(4));
        let at = |l| Move::from_indices(4, l).expect("in range");

        assert_eq!(score_move(&state, at(8)), LOCAL_WIN);
        assert_eq!(score_move(&state, at(2)), LOCAL_BLOCK);
        assert_eq!(score_move(&state, at(5)), NEUTRAL);
        assert_eq!(score_move(&state, at(3)), NEUTRAL);
    }

    #[test]
    fn test_sending_to_own_board_with_open_line_is_penalized() {
        let state = position(&[(4, 0), (4, 1), (0, 4)], &[(4, 6), (4, 7)], Mark::White, Some(4));
        let center = Move::from_indices(4, 4).expect("in range");
        // Black can still take square 2 of board 4 after White plays the center.
        assert_eq!(score_move(&state, center), CENTER + OPEN_WIN_PENALTY);
    }

    #[test]
    fn test_free_choice_bonus_when_target_decided() {
        // Board 1 won by White; Black sends White there from board 0.
        let state = position(
            &[(5, 5), (6, 6), (7, 7)],
            &[(1, 0), (1, 1), (1, 2)],
            Mark::Black,
            Some(0),
        );
        let mv = Move::from_indices(0, 1).expect("in range");
        assert_eq!(score_move(&state, mv), FREE_CHOICE);
    }

    #[test]
    fn test_deciding_own_target_counts_as_free_choice() {
        // Black completes board 2 on square 2, which sends White to board 2.
        let state = position(&[(2, 0), (2, 1)], &[(3, 3), (5, 5)], Mark::Black, Some(2));
        let mv = Move::from_indices(2, 2).expect("in range");
        assert_eq!(score_move(&state, mv), LOCAL_WIN + FREE_CHOICE);
    }

    #[test]
    fn test_scoring_does_not_mutate_state() {
        let state = position(&[(4, 0)], &[], Mark::White, Some(0));
        let before = state.clone();
        let _ = score_move(&state, Move::from_indices(0, 4).expect("in range"));
        assert_eq!(state, before);
    }
}
