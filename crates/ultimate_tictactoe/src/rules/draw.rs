//! Tie detection and status resolution.

use super::win::{check_winner, meta_winner};
use crate::{Square, Status};
use tracing::instrument;

/// Checks if all nine squares are occupied.
pub fn is_full(squares: &[Square; 9]) -> bool {
    squares.iter().all(|s| *s != Square::Empty)
}

/// Resolves a local board: a line wins, otherwise a full board ties.
#[instrument(level = "trace")]
pub fn local_status(squares: &[Square; 9]) -> Status {
    if let Some(winner) = check_winner(squares) {
        Status::Won(winner)
    } else if is_full(squares) {
        Status::Tied
    } else {
        Status::Undecided
    }
}

/// Resolves the meta-board from the nine local statuses.
///
/// Tied boards cannot be part of a winning line but do count toward a
/// meta-tie once every board is decided.
#[instrument(level = "trace")]
pub fn global_status(statuses: &[Status; 9]) -> Status {
    if let Some(winner) = meta_winner(statuses) {
        Status::Won(winner)
    } else if statuses.iter().all(|s| s.is_decided()) {
        Status::Tied
    } else {
        Status::Undecided
    }
}
