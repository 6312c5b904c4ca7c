//! Command-line interface for ultimate_games.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ultimate_tictactoe::{Difficulty, Move};

/// Ultimate Games - Ultimate Tic-Tac-Toe engine, advisor and coach
#[derive(Parser, Debug)]
#[command(name = "ultimate_games")]
#[command(about = "Ultimate Tic-Tac-Toe engine, advisor and coach", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
///
/// Moves are written `board,square` with both in 0-8, e.g. `4,4`.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a full game between two computer players
    Selfplay {
        /// Difficulty for Black (defaults to the configured difficulty)
        #[arg(long)]
        black: Option<Difficulty>,

        /// Difficulty for White (defaults to the configured difficulty)
        #[arg(long)]
        white: Option<Difficulty>,

        /// Seed for reproducible games (overrides the config)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the final state as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Replay moves and print the advisor's suggestion
    Suggest {
        /// Moves played so far
        moves: Vec<Move>,

        /// Difficulty (defaults to the configured difficulty)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed for tie-breaking (overrides the config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Replay moves and print the position summary
    Summary {
        /// Moves played so far
        moves: Vec<Move>,
    },

    /// Replay moves and ask the LLM coach about the position
    Analyze {
        /// Moves played so far
        moves: Vec<Move>,
    },
}
