//! Checkers board model.
//!
//! This module owns the canonical game state:
//! - Piece placement on an 8x8 grid of optional pieces
//! - Live piece and king counts per side, maintained on every move and capture
//! - Move legality via diagonal ray-walks, including multi-jump chains
//! - Terminal-state detection
//!
//! A [`Board`] is a plain value. Cloning it copies every piece, so search code
//! can explore sibling branches on independent copies.

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    BROWN_KING, BROWN_MAN, COLS, EMPTY, KING_WEIGHT, PIECES_PER_SIDE, ROWS, STARTING_ROWS,
    WHITE_KING, WHITE_MAN,
};
use crate::error::{BoardError, BoardResult};
use crate::piece::{Piece, Side, Square};

/// A destination square and the pieces captured on the way there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub dest: Square,
    /// Captured pieces in capture order. Empty for a simple move.
    pub captured: Vec<Piece>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// Valid moves of a single piece, keyed by destination.
///
/// Destinations keep the order in which they were first discovered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidMoves {
    moves: Vec<Move>,
}

impl ValidMoves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a destination. A destination reached again keeps the longer chain.
    fn record(&mut self, dest: Square, captured: Vec<Piece>) {
        match self.moves.iter_mut().find(|m| m.dest == dest) {
            Some(existing) => {
                if captured.len() > existing.captured.len() {
                    existing.captured = captured;
                }
            }
            None => self.moves.push(Move { dest, captured }),
        }
    }

    /// Pieces captured when moving to `dest`, or `None` if `dest` is not valid.
    pub fn get(&self, dest: Square) -> Option<&[Piece]> {
        self.moves
            .iter()
            .find(|m| m.dest == dest)
            .map(|m| m.captured.as_slice())
    }

    pub fn contains(&self, dest: Square) -> bool {
        self.get(dest).is_some()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn has_captures(&self) -> bool {
        self.moves.iter().any(Move::is_capture)
    }

    /// Keep only the capturing destinations.
    pub fn captures_only(self) -> ValidMoves {
        ValidMoves {
            moves: self.moves.into_iter().filter(Move::is_capture).collect(),
        }
    }

    /// Destination squares in discovery order.
    pub fn destinations(&self) -> Vec<Square> {
        self.moves.iter().map(|m| m.dest).collect()
    }
}

impl IntoIterator for ValidMoves {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidMoves {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

/// Terminal result of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(side) => write!(f, "{side}"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// A checkers position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; COLS]; ROWS],
    brown_left: u32,
    white_left: u32,
    brown_kings: u32,
    white_kings: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Step one square from `from`, or `None` when that leaves the board.
fn step(from: Square, dr: isize, dc: isize) -> Option<Square> {
    let row = from.0.checked_add_signed(dr)?;
    let col = from.1.checked_add_signed(dc)?;
    (row < ROWS && col < COLS).then_some((row, col))
}

fn check_bounds(row: usize, col: usize) -> BoardResult<()> {
    if row >= ROWS || col >= COLS {
        return Err(BoardError::OutOfBounds { row, col });
    }
    Ok(())
}

/// Dark squares are the only playable ones.
pub fn is_playable(row: usize, col: usize) -> bool {
    row < ROWS && col < COLS && (row + col) % 2 == 1
}

impl Board {
    /// The standard starting position: 12 pieces per side on their three back rows.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..ROWS {
            for col in 0..COLS {
                if !is_playable(row, col) {
                    continue;
                }
                if row < STARTING_ROWS {
                    board.grid[row][col] = Some(Piece::new(Side::White, row, col));
                } else if row >= ROWS - STARTING_ROWS {
                    board.grid[row][col] = Some(Piece::new(Side::Brown, row, col));
                }
            }
        }
        board.brown_left = PIECES_PER_SIDE;
        board.white_left = PIECES_PER_SIDE;
        board
    }

    /// A board with no pieces.
    pub fn empty() -> Self {
        Self {
            grid: [[None; COLS]; ROWS],
            brown_left: 0,
            white_left: 0,
            brown_kings: 0,
            white_kings: 0,
        }
    }

    fn cell(&self, (row, col): Square) -> Option<Piece> {
        self.grid[row][col]
    }

    /// The piece at `(row, col)`, if any.
    pub fn get_piece(&self, row: usize, col: usize) -> BoardResult<Option<Piece>> {
        check_bounds(row, col)?;
        Ok(self.grid[row][col])
    }

    /// All pieces of `side` in row-major order.
    pub fn pieces(&self, side: Side) -> Vec<Piece> {
        self.grid
            .iter()
            .flat_map(|row| row.iter())
            .filter_map(|cell| *cell)
            .filter(|piece| piece.side() == side)
            .collect()
    }

    /// Live pieces of `side`.
    pub fn count(&self, side: Side) -> u32 {
        match side {
            Side::Brown => self.brown_left,
            Side::White => self.white_left,
        }
    }

    /// Live kings of `side`.
    pub fn kings(&self, side: Side) -> u32 {
        match side {
            Side::Brown => self.brown_kings,
            Side::White => self.white_kings,
        }
    }

    fn count_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::Brown => &mut self.brown_left,
            Side::White => &mut self.white_left,
        }
    }

    fn kings_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::Brown => &mut self.brown_kings,
            Side::White => &mut self.white_kings,
        }
    }

    /// Relocate `piece` to `(row, col)`, promoting it on either edge row.
    ///
    /// Checkers rules are not consulted here; see [`Board::play`] for a checked move.
    /// Returns the piece as it now stands on the board.
    ///
    /// # Errors
    /// - `OutOfBounds` if the destination is off the board
    /// - `NoPiece` if `piece` is not on the board at its recorded square
    /// - `Occupied` if the destination holds another piece
    pub fn move_piece(&mut self, piece: &Piece, row: usize, col: usize) -> BoardResult<Piece> {
        check_bounds(row, col)?;
        let (from_row, from_col) = piece.square();
        let mut moving = self
            .get_piece(from_row, from_col)?
            .filter(|p| p.side() == piece.side())
            .ok_or(BoardError::NoPiece {
                row: from_row,
                col: from_col,
            })?;

        if (row, col) != (from_row, from_col) && self.grid[row][col].is_some() {
            return Err(BoardError::Occupied { row, col });
        }

        self.grid[from_row][from_col] = None;
        moving.relocate(row, col);
        if (row == 0 || row == ROWS - 1) && moving.make_king() {
            *self.kings_mut(moving.side()) += 1;
        }
        self.grid[row][col] = Some(moving);
        Ok(moving)
    }

    /// Remove captured pieces. Squares that are already empty are skipped.
    pub fn remove(&mut self, pieces: &[Piece]) {
        for piece in pieces {
            let (row, col) = piece.square();
            if row >= ROWS || col >= COLS {
                continue;
            }
            if let Some(taken) = self.grid[row][col].take() {
                let left = self.count_mut(taken.side());
                *left = left.saturating_sub(1);
                if taken.is_king() {
                    let kings = self.kings_mut(taken.side());
                    *kings = kings.saturating_sub(1);
                }
            }
        }
    }

    /// Move the piece at `from` to `to` if that is one of its valid moves.
    ///
    /// Captured pieces are removed and returned.
    pub fn play(&mut self, from: Square, to: Square) -> BoardResult<Vec<Piece>> {
        let piece = self.get_piece(from.0, from.1)?.ok_or(BoardError::NoPiece {
            row: from.0,
            col: from.1,
        })?;
        check_bounds(to.0, to.1)?;
        let captured = self
            .valid_moves(&piece)
            .get(to)
            .map(<[Piece]>::to_vec)
            .ok_or(BoardError::IllegalMove { from, to })?;

        self.move_piece(&piece, to.0, to.1)?;
        self.remove(&captured);
        Ok(captured)
    }

    /// Static evaluation: material difference plus a half point per king. Positive favours White.
    pub fn evaluate(&self) -> f64 {
        let men = self.white_left as f64 - self.brown_left as f64;
        let kings = self.white_kings as f64 - self.brown_kings as f64;
        men + KING_WEIGHT * kings
    }

    /// Whether any piece of `side` has a valid move.
    pub fn has_moves(&self, side: Side) -> bool {
        self.pieces(side)
            .iter()
            .any(|piece| !self.valid_moves(piece).is_empty())
    }

    /// The game result, or `None` while the game is still on.
    ///
    /// A side with no pieces loses. Otherwise a side that cannot move loses to
    /// one that can, and when neither side can move the game is drawn.
    pub fn winner(&self) -> Option<Outcome> {
        if self.brown_left == 0 {
            return Some(Outcome::Win(Side::White));
        }
        if self.white_left == 0 {
            return Some(Outcome::Win(Side::Brown));
        }

        match (self.has_moves(Side::Brown), self.has_moves(Side::White)) {
            (true, true) => None,
            (true, false) => Some(Outcome::Win(Side::Brown)),
            (false, true) => Some(Outcome::Win(Side::White)),
            (false, false) => Some(Outcome::Draw),
        }
    }

    /// All valid destinations of `piece`, simple and capturing.
    ///
    /// Mandatory capture is left to the caller.
    pub fn valid_moves(&self, piece: &Piece) -> ValidMoves {
        let mut moves = ValidMoves::new();
        for dir in piece.directions() {
            self.traverse(piece, piece.square(), dir, Vec::new(), &mut moves);
        }
        moves
    }

    /// Walk one diagonal from `from`. `captured` is the chain so far.
    fn traverse(
        &self,
        piece: &Piece,
        from: Square,
        (dr, dc): (isize, isize),
        captured: Vec<Piece>,
        moves: &mut ValidMoves,
    ) {
        let Some(next) = step(from, dr, dc) else {
            return;
        };
        // the moving piece has left its square, so a loop may land back on it
        let occupant = |square: Square| self.cell(square).filter(|_| square != piece.square());

        match occupant(next) {
            None => {
                // simple moves never follow a jump
                if captured.is_empty() {
                    moves.record(next, captured);
                }
            }
            Some(other) if other.side() == piece.side() => {}
            Some(jumped) => {
                if captured.contains(&jumped) {
                    return;
                }
                let Some(landing) = step(next, dr, dc) else {
                    return;
                };
                if occupant(landing).is_some() {
                    return;
                }

                let mut chain = captured;
                chain.push(jumped);
                moves.record(landing, chain.clone());

                for dir in piece.directions() {
                    if dir == (-dr, -dc) {
                        continue;
                    }
                    self.traverse(piece, landing, dir, chain.clone(), moves);
                }
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            let line: Vec<String> = row
                .iter()
                .map(|cell| {
                    let ch = match cell {
                        None => EMPTY,
                        Some(p) => match (p.side(), p.is_king()) {
                            (Side::Brown, false) => BROWN_MAN,
                            (Side::Brown, true) => BROWN_KING,
                            (Side::White, false) => WHITE_MAN,
                            (Side::White, true) => WHITE_KING,
                        },
                    };
                    ch.to_string()
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse the text form written by `Display`: 8 lines of 8 squares, whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != ROWS {
            return Err(BoardError::Parse {
                message: format!("expected {ROWS} rows, got {}", rows.len()),
            });
        }

        let mut board = Board::empty();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != COLS {
                return Err(BoardError::Parse {
                    message: format!("row {row} has {} squares, expected {COLS}", cells.len()),
                });
            }
            for (col, &ch) in cells.iter().enumerate() {
                let (side, king) = match ch {
                    EMPTY => continue,
                    BROWN_MAN => (Side::Brown, false),
                    BROWN_KING => (Side::Brown, true),
                    WHITE_MAN => (Side::White, false),
                    WHITE_KING => (Side::White, true),
                    other => {
                        return Err(BoardError::Parse {
                            message: format!("unknown square '{other}' at ({row}, {col})"),
                        });
                    }
                };
                if !is_playable(row, col) {
                    return Err(BoardError::Parse {
                        message: format!("piece on light square ({row}, {col})"),
                    });
                }

                let mut piece = Piece::new(side, row, col);
                if king {
                    piece.make_king();
                    *board.kings_mut(side) += 1;
                }
                *board.count_mut(side) += 1;
                board.grid[row][col] = Some(piece);
            }
        }
        Ok(board)
    }
}
