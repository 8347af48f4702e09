//! AI move selection.
//!
//! The algorithm and its budgets are carried in an explicit [`AiConfig`]
//! value that the driver passes in for every decision.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use crate::board::Board;
use crate::constants::{DEFAULT_DEPTH, DEFAULT_SIMULATIONS};
use crate::mcts::tree_search;
use crate::minimax::minimax;
use crate::piece::Side;

/// Search strategy used for the automated player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    Minimax,
    Mcts,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown algorithm '{0}' (expected 'minimax' or 'mcts')")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "mcts" => Ok(Algorithm::Mcts),
            other => Err(UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "minimax"),
            Algorithm::Mcts => write!(f, "mcts"),
        }
    }
}

/// Search settings for one AI player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiConfig {
    pub algorithm: Algorithm,
    /// Minimax depth in plies
    pub depth: u32,
    /// MCTS iterations
    pub simulations: usize,
    /// Seed for MCTS playouts; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            depth: DEFAULT_DEPTH,
            simulations: DEFAULT_SIMULATIONS,
            seed: None,
        }
    }
}

impl AiConfig {
    /// Random generator for this configuration.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

/// Pick the board after `side`'s move, or `None` if `side` cannot move.
pub fn choose_move(
    board: &Board,
    side: Side,
    config: &AiConfig,
    rng: &mut fastrand::Rng,
) -> Option<Board> {
    let chosen = match config.algorithm {
        Algorithm::Minimax => {
            let result = minimax(board, config.depth, side == Side::White);
            // a decided board comes back unchanged; that is not a move
            result.board.filter(|next| next != board)
        }
        Algorithm::Mcts => tree_search(board, side, config.simulations, rng),
    };
    info!(
        %side,
        algorithm = %config.algorithm,
        found = chosen.is_some(),
        eval = chosen.as_ref().map(Board::evaluate),
        "ai move chosen"
    );
    chosen
}
