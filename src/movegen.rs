//! Move generation.
//!
//! Turns the per-piece valid moves of [`Board::valid_moves`] into the list of
//! boards a side can reach in one full turn. Every result is a fresh copy of
//! the input board with the move applied and any capture chain completed.
//!
//! Ordering is part of the contract: capturing boards are pushed to the front
//! as they are found (so they end up in reverse discovery order) and simple
//! boards are appended. When a side has any capture, simple boards are
//! dropped entirely.

use std::collections::VecDeque;

use crate::board::{Board, Move};
use crate::piece::{Piece, Side};

/// All boards reachable by `side` in one turn.
pub fn get_all_moves(board: &Board, side: Side) -> Vec<Board> {
    let mut captures = VecDeque::new();
    let mut simple = Vec::new();

    for piece in board.pieces(side) {
        for mv in board.valid_moves(&piece) {
            let mut next = board.clone();
            if !apply(&mut next, &piece, &mv) {
                continue;
            }
            if mv.is_capture() {
                captures.push_front(next);
            } else {
                simple.push(next);
            }
        }
    }

    if captures.is_empty() {
        simple
    } else {
        captures.into()
    }
}

/// Whether any piece of `side` can capture.
pub fn side_has_capture(board: &Board, side: Side) -> bool {
    board
        .pieces(side)
        .iter()
        .any(|piece| board.valid_moves(piece).has_captures())
}

/// Apply `mv` for `piece` on `board`, then finish the capture chain.
///
/// Returns `false` if the board rejected the move.
fn apply(board: &mut Board, piece: &Piece, mv: &Move) -> bool {
    let Ok(mut moved) = board.move_piece(piece, mv.dest.0, mv.dest.1) else {
        return false;
    };
    if !mv.is_capture() {
        return true;
    }
    board.remove(&mv.captured);

    // the same piece keeps jumping while it can
    while let Some(next) = board
        .valid_moves(&moved)
        .into_iter()
        .find(Move::is_capture)
    {
        match board.move_piece(&moved, next.dest.0, next.dest.1) {
            Ok(piece) => moved = piece,
            Err(_) => break,
        }
        board.remove(&next.captured);
    }
    true
}
