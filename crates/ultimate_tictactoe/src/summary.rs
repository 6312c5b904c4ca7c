//! Deterministic text rendering of a game state.
//!
//! This is the only input the remote strategy analysis needs. `X` is Black,
//! `O` is White and `.` is an empty square.

use super::{GameState, LocalBoard, Position, Square};
use std::fmt::Write;
use tracing::instrument;

/// Marker for an empty square.
pub const EMPTY_SYMBOL: char = '.';

fn square_symbol(square: Square) -> char {
    square.mark().map_or(EMPTY_SYMBOL, |mark| mark.symbol())
}

/// Renders one local board as three rows of three symbols.
pub fn render_local(board: &LocalBoard) -> String {
    board
        .squares()
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|s| square_symbol(*s).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl GameState {
    /// Text summary of the whole game, annotated with the forced board.
    ///
    /// The same state always yields byte-identical text.
    #[instrument(skip(self))]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let mover = self.current_player();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "To move: {} ({})", mover, mover.symbol());
        let _ = match self.forced_board() {
            Some(board) => writeln!(out, "Forced board: {} ({})", board.to_index(), board),
            None => writeln!(out, "Forced board: any"),
        };
        let _ = writeln!(out, "Game: {}", self.status());

        for pos in Position::ALL {
            let board = self.board().board(pos);
            let forced = if self.forced_board() == Some(pos) {
                " [forced]"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "\nBoard {} ({}): {}{}",
                pos.to_index(),
                pos,
                board.status(),
                forced
            );
            let _ = writeln!(out, "{}", render_local(board));
        }
        out
    }
}
