//! Sides, squares and pieces.

use std::fmt;
use std::str::FromStr;

/// A square on the board as `(row, col)`.
pub type Square = (usize, usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Starts on rows 5-7 and moves toward row 0. Moves first.
    Brown,
    /// Starts on rows 0-2 and moves toward row 7.
    White,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Brown => Side::White,
            Side::White => Side::Brown,
        }
    }

    /// Row step of a forward move for an unpromoted piece.
    pub fn forward(self) -> isize {
        match self {
            Side::Brown => -1,
            Side::White => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Brown => write!(f, "brown"),
            Side::White => write!(f, "white"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brown" | "b" => Ok(Side::Brown),
            "white" | "w" => Ok(Side::White),
            other => Err(format!("unknown side: {other}")),
        }
    }
}

/// A checkers piece.
///
/// Position and king flag only change through [`crate::board::Board`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    side: Side,
    row: u8,
    col: u8,
    king: bool,
}

impl Piece {
    pub(crate) fn new(side: Side, row: usize, col: usize) -> Self {
        Self {
            side,
            row: row as u8,
            col: col as u8,
            king: false,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }

    pub fn col(&self) -> usize {
        self.col as usize
    }

    pub fn square(&self) -> Square {
        (self.row(), self.col())
    }

    pub fn is_king(&self) -> bool {
        self.king
    }

    pub(crate) fn relocate(&mut self, row: usize, col: usize) {
        self.row = row as u8;
        self.col = col as u8;
    }

    /// Promote to king. Returns `true` only on the first promotion.
    pub(crate) fn make_king(&mut self) -> bool {
        let promoted = !self.king;
        self.king = true;
        promoted
    }

    /// Diagonal directions this piece may travel, as `(row_step, col_step)`.
    ///
    /// Order: up-left, up-right, down-left, down-right.
    pub fn directions(&self) -> Vec<(isize, isize)> {
        [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .into_iter()
            .filter(|&(dr, _)| self.king || dr == self.side.forward())
            .collect()
    }
}
