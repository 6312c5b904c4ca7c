//! Ultimate Games - Unified CLI
//!
//! Headless driver around the Ultimate Tic-Tac-Toe engine.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use ultimate_games::cli::{Cli, Command};
use ultimate_games::{AppConfig, LlmAnalyst, LlmClient, analyze_game, play_match};
use ultimate_tictactoe::{Advisor, Difficulty, GameState, Move};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Command::Selfplay {
            black,
            white,
            seed,
            json,
        } => run_selfplay(&config, black, white, seed, json).await,
        Command::Suggest {
            moves,
            difficulty,
            seed,
        } => run_suggest(&config, &moves, difficulty, seed),
        Command::Summary { moves } => {
            print!("{}", replay(&moves)?.summary());
            Ok(())
        }
        Command::Analyze { moves } => run_analyze(&config, &moves).await,
    }
}

fn replay(moves: &[Move]) -> Result<GameState> {
    GameState::replay(moves).context("Move list is not a legal game")
}

fn advisor(difficulty: Difficulty, seed: Option<u64>) -> Advisor {
    match seed {
        Some(seed) => Advisor::seeded(difficulty, seed),
        None => Advisor::new(difficulty),
    }
}

/// Run an engine-versus-engine game
#[instrument(skip(config))]
async fn run_selfplay(
    config: &AppConfig,
    black: Option<Difficulty>,
    white: Option<Difficulty>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let settings = config.advisor();
    let default = *settings.difficulty();
    let seed = seed.or(*settings.seed());

    let mut black = advisor(black.unwrap_or(default), seed);
    let mut white = advisor(white.unwrap_or(default), seed.map(|s| s.wrapping_add(1)));
    let game = play_match(&mut black, &mut white, settings.think_delay()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&game)?);
    } else {
        print!("{}", game.summary());
        if let Some(outcome) = game.outcome() {
            println!("\nResult: {} after {} moves", outcome, game.move_count());
        }
    }
    Ok(())
}

/// Print the advisor's move for a replayed position
#[instrument(skip(config, moves))]
fn run_suggest(
    config: &AppConfig,
    moves: &[Move],
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
) -> Result<()> {
    let game = replay(moves)?;
    let difficulty = difficulty.unwrap_or(*config.advisor().difficulty());
    let mut advisor = advisor(difficulty, seed.or(*config.advisor().seed()));

    let mv = advisor.choose(&game).context("No move to suggest")?;
    info!(%mv, %difficulty, "Suggested move");
    println!("{}", mv);
    Ok(())
}

/// Send the position summary to the LLM coach
#[instrument(skip(config, moves))]
async fn run_analyze(config: &AppConfig, moves: &[Move]) -> Result<()> {
    let game = replay(moves)?;
    let llm_config = config.create_llm_config()?;
    let analyst = LlmAnalyst::new(LlmClient::new(llm_config));

    let analysis = analyze_game(&analyst, &game).await?;
    println!("{}", analysis.advice);
    if !analysis.citations.is_empty() {
        println!("\nSources:");
        for citation in &analysis.citations {
            match &citation.title {
                Some(title) => println!("- {} <{}>", title, citation.url),
                None => println!("- {}", citation.url),
            }
        }
    }
    Ok(())
}
