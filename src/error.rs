//! Error types for board operations.

use thiserror::Error;

use crate::piece::Square;

/// Errors raised by the board model and the game driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinates outside the 8x8 grid
    #[error("Square ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    /// No piece where one was expected
    #[error("No piece at square ({row}, {col})")]
    NoPiece { row: usize, col: usize },

    /// Destination already holds a piece
    #[error("Square ({row}, {col}) is occupied")]
    Occupied { row: usize, col: usize },

    /// Destination is not among the piece's valid moves
    #[error("Illegal move from {from:?} to {to:?}")]
    IllegalMove { from: Square, to: Square },

    /// Malformed text-form board
    #[error("Invalid board layout: {message}")]
    Parse { message: String },
}

/// Result type alias for board operations
pub type BoardResult<T> = Result<T, BoardError>;
