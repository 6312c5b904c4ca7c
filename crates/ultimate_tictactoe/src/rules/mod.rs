//! Game rules for Ultimate Tic-Tac-Toe.
//!
//! Pure functions over squares and statuses. The same line table drives
//! both the local check (squares) and the meta check (local statuses), so
//! rules stay separate from board storage.

pub mod draw;
pub mod win;

pub use draw::{global_status, is_full, local_status};
pub use win::{LINES, check_winner, meta_winner, would_win};
