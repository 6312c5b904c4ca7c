//! Engine-versus-engine play.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info, instrument};
use ultimate_tictactoe::{Advisor, GameState, Mark};

/// Plays a full game between two advisors and returns the final state.
///
/// `think_delay` is slept before every move to pace the game for a watcher.
#[instrument(skip_all, fields(black = %black.difficulty(), white = %white.difficulty()))]
pub async fn play_match(
    black: &mut Advisor,
    white: &mut Advisor,
    think_delay: Duration,
) -> Result<GameState> {
    info!("Starting match");
    let mut game = GameState::new();

    while !game.is_over() {
        if !think_delay.is_zero() {
            tokio::time::sleep(think_delay).await;
        }

        let mover = game.current_player();
        let advisor = match mover {
            Mark::Black => &mut *black,
            Mark::White => &mut *white,
        };
        let mv = advisor
            .choose(&game)
            .with_context(|| format!("{} has no move", mover))?;
        debug!(%mover, %mv, "Move chosen");

        game = game
            .apply_move(mv)
            .with_context(|| format!("{} proposed rejected move {}", mover, mv))?;
    }

    info!(outcome = ?game.outcome(), moves = game.move_count(), "Match finished");
    Ok(game)
}
