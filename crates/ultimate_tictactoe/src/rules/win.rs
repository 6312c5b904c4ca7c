//! Win detection for local boards and the meta-board.

use crate::{Mark, Position, Square, Status};
use tracing::instrument;

/// The eight three-in-a-row patterns: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the mark owning a full line, reading each cell through `owner`.
fn line_owner<T: Copy>(cells: &[T; 9], owner: impl Fn(T) -> Option<Mark>) -> Option<Mark> {
    LINES.iter().find_map(|[a, b, c]| {
        let first = owner(cells[a.to_index()])?;
        let full = owner(cells[b.to_index()]) == Some(first)
            && owner(cells[c.to_index()]) == Some(first);
        full.then_some(first)
    })
}

/// Checks if there is a winner among nine squares.
///
/// Returns `Some(mark)` if the mark has three in a row, `None` otherwise.
#[instrument(level = "trace")]
pub fn check_winner(squares: &[Square; 9]) -> Option<Mark> {
    line_owner(squares, Square::mark)
}

/// Checks for a line on the meta-board.
///
/// Tied local boards belong to nobody, so they never complete a line.
#[instrument(level = "trace")]
pub fn meta_winner(statuses: &[Status; 9]) -> Option<Mark> {
    line_owner(statuses, Status::winner)
}

/// One-ply win test: can `mark` complete a line by filling one empty square?
///
/// Works on a copy; the caller's squares are untouched.
#[instrument(level = "trace")]
pub fn would_win(squares: &[Square; 9], mark: Mark) -> bool {
    Position::ALL.iter().any(|pos| {
        let i = pos.to_index();
        if squares[i] != Square::Empty {
            return false;
        }
        let mut trial = *squares;
        trial[i] = Square::Occupied(mark);
        check_winner(&trial) == Some(mark)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares(marks: &[(usize, Mark)]) -> [Square; 9] {
        let mut squares = [Square::Empty; 9];
        for (i, mark) in marks {
            squares[*i] = Square::Occupied(*mark);
        }
        squares
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&[Square::Empty; 9]), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = squares(&[(0, Mark::Black), (1, Mark::Black), (2, Mark::Black)]);
        assert_eq!(check_winner(&board), Some(Mark::Black));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = squares(&[(2, Mark::White), (4, Mark::White), (6, Mark::White)]);
        assert_eq!(check_winner(&board), Some(Mark::White));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = squares(&[(0, Mark::Black), (1, Mark::White), (2, Mark::Black)]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_would_win_needs_open_square() {
        let open = squares(&[(0, Mark::Black), (1, Mark::Black)]);
        assert!(would_win(&open, Mark::Black));
        assert!(!would_win(&open, Mark::White));

        let blocked = squares(&[(0, Mark::Black), (1, Mark::Black), (2, Mark::White)]);
        assert!(!would_win(&blocked, Mark::Black));
    }

    #[test]
    fn test_would_win_leaves_input_untouched() {
        let board = squares(&[(3, Mark::White), (4, Mark::White)]);
        let before = board;
        assert!(would_win(&board, Mark::White));
        assert_eq!(board, before);
    }

    #[test]
    fn test_tied_meta_cells_never_match() {
        let statuses = [
            Status::Tied,
            Status::Tied,
            Status::Tied,
            Status::Undecided,
            Status::Undecided,
            Status::Undecided,
            Status::Undecided,
            Status::Undecided,
            Status::Undecided,
        ];
        assert_eq!(meta_winner(&statuses), None);
    }

    #[test]
    fn test_meta_line_of_wins() {
        let mut statuses = [Status::Undecided; 9];
        statuses[2] = Status::Won(Mark::White);
        statuses[5] = Status::Won(Mark::White);
        statuses[8] = Status::Won(Mark::White);
        assert_eq!(meta_winner(&statuses), Some(Mark::White));
    }
}
