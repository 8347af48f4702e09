//! Checkers-AI: a checkers engine with minimax and MCTS players.
//!
//! ## Usage
//!
//! - `checkers-ai` - Show a demo
//! - `checkers-ai protocol` - Play over the text protocol on stdin/stdout
//! - `checkers-ai self-play` - Let the AI play both sides
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use checkers_ai::ai::{AiConfig, Algorithm, choose_move};
use checkers_ai::constants::{DEFAULT_DEPTH, DEFAULT_SIMULATIONS};
use checkers_ai::game::Game;
use checkers_ai::protocol::ProtocolEngine;

/// Checkers-AI: a checkers engine with minimax and MCTS players
#[derive(Parser)]
#[command(name = "checkers-ai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search algorithm for the AI (minimax or mcts)
    #[arg(long, global = true, default_value = "minimax")]
    algorithm: Algorithm,

    /// Minimax search depth
    #[arg(long, global = true, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,

    /// MCTS iterations per move
    #[arg(long, global = true, default_value_t = DEFAULT_SIMULATIONS, value_parser = parse_simulations)]
    simulations: usize,

    /// Seed for MCTS playouts
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play over the line protocol on stdin/stdout
    Protocol,
    /// Run a short demo of both algorithms
    Demo,
    /// Let the AI play against itself
    SelfPlay {
        /// Stop after this many plies
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
    },
}

fn parse_simulations(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err("must be at least 1".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AiConfig {
        algorithm: cli.algorithm,
        depth: cli.depth,
        simulations: cli.simulations,
        seed: cli.seed,
    };

    match cli.command {
        Some(Commands::Protocol) => {
            let mut engine = ProtocolEngine::new(config);
            engine.run().context("protocol loop failed")?;
        }
        Some(Commands::SelfPlay { max_plies }) => self_play(&config, max_plies),
        Some(Commands::Demo) | None => run_demo(&config)?,
    }
    Ok(())
}

fn run_demo(config: &AiConfig) -> Result<()> {
    println!("Checkers-AI: minimax and MCTS checkers engine\n");

    let mut game = Game::new();
    println!("=== Starting position ===");
    println!("{}", game.board());

    println!("=== Brown plays (5, 0) -> (4, 1) ===");
    game.select(5, 0)?;
    game.select(4, 1)?;
    println!("{}", game.board());

    let mut rng = config.rng();
    for algorithm in [Algorithm::Minimax, Algorithm::Mcts] {
        let ai = AiConfig {
            algorithm,
            ..config.clone()
        };
        println!("=== White answers with {algorithm} ===");
        match choose_move(game.board(), game.turn(), &ai, &mut rng) {
            Some(board) => {
                println!("{board}");
                println!("Evaluation: {:+.1}\n", board.evaluate());
            }
            None => println!("No move available\n"),
        }
    }
    Ok(())
}

fn self_play(config: &AiConfig, max_plies: usize) {
    let mut game = Game::new();
    let mut rng = config.rng();

    for ply in 0..max_plies {
        if let Some(outcome) = game.winner() {
            info!(ply, %outcome, "game finished");
            println!("{}", game.board());
            println!("Winner: {outcome}");
            return;
        }
        let side = game.turn();
        let Some(board) = choose_move(game.board(), side, config, &mut rng) else {
            println!("{side} has no move");
            return;
        };
        game.apply_board(board);
        info!(ply, %side, eval = game.board().evaluate(), "ply played");
    }

    println!("{}", game.board());
    println!("No result after {max_plies} plies");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_budgets_must_be_positive() {
        assert!(Cli::try_parse_from(["checkers-ai", "--depth", "0"]).is_err());
        assert!(Cli::try_parse_from(["checkers-ai", "--simulations", "0"]).is_err());

        let cli = Cli::try_parse_from(["checkers-ai", "--depth", "2", "demo"]).unwrap();
        assert_eq!(cli.depth, 2);
        assert_eq!(cli.simulations, DEFAULT_SIMULATIONS);
    }
}
