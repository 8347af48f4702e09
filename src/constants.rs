//! Constants for board geometry, evaluation weights, and search budgets.
//!
//! The board is always the standard 8x8 checkers board; only the dark squares
//! (where `row + col` is odd) are ever occupied.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of rows on the board.
pub const ROWS: usize = 8;

/// Number of columns on the board.
pub const COLS: usize = 8;

/// Rows filled with pieces for each side at the start of a game.
pub const STARTING_ROWS: usize = 3;

/// Pieces each side starts with (three rows of four dark squares).
pub const PIECES_PER_SIDE: u32 = 12;

// =============================================================================
// Evaluation
// =============================================================================

/// Extra weight of a king on top of its value as a piece.
pub const KING_WEIGHT: f64 = 0.5;

// =============================================================================
// Search Budgets
// =============================================================================

/// Default minimax search depth (plies).
pub const DEFAULT_DEPTH: u32 = 4;

/// Default number of MCTS iterations per move.
pub const DEFAULT_SIMULATIONS: usize = 20;

/// Added to visit counts in the selection ratio so unvisited nodes don't divide by zero.
pub const SELECTION_EPSILON: f64 = 1e-6;

/// Upper bound on plies in one random playout.
///
/// Playouts only move the searching side, so a lone king can otherwise shuffle forever.
pub const MAX_PLAYOUT_PLIES: usize = 150;

// =============================================================================
// Text Form
// =============================================================================

/// Empty square.
pub const EMPTY: char = '.';

/// Brown man / king.
pub const BROWN_MAN: char = 'b';
pub const BROWN_KING: char = 'B';

/// White man / king.
pub const WHITE_MAN: char = 'w';
pub const WHITE_KING: char = 'W';
