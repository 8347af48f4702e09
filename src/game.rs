//! Headless game driver.
//!
//! Tracks whose turn it is and applies moves the way a player enters them:
//! select a piece, then select one of its destinations. A capture that can be
//! continued keeps the turn with the same piece until the chain is done.

use tracing::debug;

use crate::board::{Board, Outcome, ValidMoves};
use crate::error::{BoardError, BoardResult};
use crate::movegen::side_has_capture;
use crate::piece::{Piece, Side, Square};

/// What a call to [`Game::select`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// An own piece was selected; these are its legal destinations.
    Selected(Vec<Square>),
    /// The selected piece moved. `turn_over` is false while a capture chain continues.
    Moved { captured: usize, turn_over: bool },
    /// Nothing selectable there; the selection was cleared.
    Cleared,
}

pub struct Game {
    board: Board,
    turn: Side,
    selected: Option<Piece>,
    valid_moves: ValidMoves,
    /// Set while a capture chain is in progress: only this piece may move.
    chain: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game from the starting position. Brown moves first.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Side::Brown)
    }

    pub fn from_board(board: Board, turn: Side) -> Self {
        Self {
            board,
            turn,
            selected: None,
            valid_moves: ValidMoves::new(),
            chain: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn selected(&self) -> Option<Piece> {
        self.selected
    }

    /// Legal destinations of the selected piece.
    pub fn valid_moves(&self) -> &ValidMoves {
        &self.valid_moves
    }

    pub fn winner(&self) -> Option<Outcome> {
        self.board.winner()
    }

    /// Legal destinations for `piece`, honouring mandatory capture for its side.
    fn legal_moves(&self, piece: &Piece) -> ValidMoves {
        let moves = self.board.valid_moves(piece);
        if side_has_capture(&self.board, piece.side()) {
            moves.captures_only()
        } else {
            moves
        }
    }

    /// Handle a click on `(row, col)`.
    ///
    /// Moves the selected piece there if that is legal; otherwise selects the
    /// piece on that square if it belongs to the side to move.
    pub fn select(&mut self, row: usize, col: usize) -> BoardResult<Selection> {
        let target = self.board.get_piece(row, col)?;

        if let Some(piece) = self.selected {
            if let Some(captured) = self.valid_moves.get((row, col)).map(<[Piece]>::to_vec) {
                return self.move_selected(piece, (row, col), captured);
            }
            if self.chain {
                // the chain must be finished with the same piece
                return Ok(Selection::Selected(self.valid_moves.destinations()));
            }
        }

        match target {
            Some(piece) if piece.side() == self.turn => {
                self.valid_moves = self.legal_moves(&piece);
                self.selected = Some(piece);
                Ok(Selection::Selected(self.valid_moves.destinations()))
            }
            _ => {
                self.clear_selection();
                Ok(Selection::Cleared)
            }
        }
    }

    /// Move the piece on `from` to `to` in one call.
    ///
    /// Fails without touching the game when the move is not legal for the
    /// side to move. During a capture chain only the chaining piece may move.
    pub fn play(&mut self, from: Square, to: Square) -> BoardResult<Selection> {
        let illegal = BoardError::IllegalMove { from, to };
        let piece = self
            .board
            .get_piece(from.0, from.1)?
            .ok_or(BoardError::NoPiece {
                row: from.0,
                col: from.1,
            })?;
        if piece.side() != self.turn {
            return Err(illegal);
        }

        let moves = if self.chain {
            if self.selected != Some(piece) {
                return Err(illegal);
            }
            self.valid_moves.clone()
        } else {
            self.legal_moves(&piece)
        };
        let Some(captured) = moves.get(to).map(<[Piece]>::to_vec) else {
            return Err(illegal);
        };

        self.selected = Some(piece);
        self.valid_moves = moves;
        self.move_selected(piece, to, captured)
    }

    fn move_selected(
        &mut self,
        piece: Piece,
        dest: Square,
        captured: Vec<Piece>,
    ) -> BoardResult<Selection> {
        let moved = self.board.move_piece(&piece, dest.0, dest.1)?;
        self.board.remove(&captured);
        debug!(side = %self.turn, from = ?piece.square(), to = ?dest, captured = captured.len(), "move applied");

        if !captured.is_empty() {
            let more = self.board.valid_moves(&moved).captures_only();
            if !more.is_empty() {
                self.selected = Some(moved);
                self.valid_moves = more;
                self.chain = true;
                return Ok(Selection::Moved {
                    captured: captured.len(),
                    turn_over: false,
                });
            }
        }

        self.change_turn();
        Ok(Selection::Moved {
            captured: captured.len(),
            turn_over: true,
        })
    }

    /// Install a board chosen by the AI and pass the turn.
    pub fn apply_board(&mut self, board: Board) {
        self.board = board;
        self.change_turn();
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.valid_moves = ValidMoves::new();
        self.chain = false;
    }

    fn change_turn(&mut self) {
        self.clear_selection();
        self.turn = self.turn.opponent();
    }
}
