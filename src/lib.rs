//! Checkers-AI: a checkers engine with minimax and MCTS players.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, evaluation weights and search budgets
//! - [`piece`] - Sides, squares and pieces
//! - [`board`] - Board state, move legality and terminal detection
//! - [`movegen`] - All boards reachable by a side in one turn
//! - [`minimax`] - Fixed-depth minimax (and alpha-beta) search
//! - [`mcts`] - Monte Carlo Tree Search
//! - [`playout`] - Random game simulation for MCTS
//! - [`ai`] - Algorithm selection for the automated player
//! - [`game`] - Turn tracking and move entry
//! - [`protocol`] - Text protocol for playing over stdin/stdout
//!
//! ## Example
//!
//! ```
//! use checkers_ai::board::Board;
//! use checkers_ai::minimax::minimax;
//! use checkers_ai::mcts::tree_search;
//! use checkers_ai::piece::Side;
//!
//! // Brown opens
//! let mut board = Board::new();
//! board.play((5, 0), (4, 1)).unwrap();
//!
//! // White answers with minimax...
//! let result = minimax(&board, 3, true);
//! assert!(result.board.is_some());
//!
//! // ...or with MCTS
//! let mut rng = fastrand::Rng::with_seed(1);
//! let next = tree_search(&board, Side::White, 50, &mut rng);
//! assert!(next.is_some());
//! ```

pub mod ai;
pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod mcts;
pub mod minimax;
pub mod movegen;
pub mod piece;
pub mod playout;
pub mod protocol;
