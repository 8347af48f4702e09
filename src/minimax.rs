//! Fixed-depth minimax search.
//!
//! White is the maximizing side and Brown the minimizing side. Moves are
//! sorted by static evaluation before they are searched (best first for the
//! side to act) and the first strict improvement wins, so the ordering also
//! decides ties. [`alphabeta`] searches the same ordered tree with pruning and
//! returns the same value and board as [`minimax`].

use std::cmp::Ordering;

use tracing::debug;

use crate::board::Board;
use crate::movegen::get_all_moves;
use crate::piece::Side;

/// Value of a search and the board that achieves it.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub value: f64,
    /// `None` when the side to act had no move.
    pub board: Option<Board>,
}

impl SearchResult {
    fn leaf(position: &Board) -> Self {
        Self {
            value: position.evaluate(),
            board: Some(position.clone()),
        }
    }
}

/// Side that acts at a node.
fn side_to_act(maximizing: bool) -> Side {
    if maximizing { Side::White } else { Side::Brown }
}

/// Generated moves, best-looking first for the side to act. Stable on ties.
pub fn ordered_moves(position: &Board, maximizing: bool) -> Vec<Board> {
    let mut moves = get_all_moves(position, side_to_act(maximizing));
    moves.sort_by(|a, b| {
        let ord = a.evaluate().total_cmp(&b.evaluate());
        if maximizing { ord.reverse() } else { ord }
    });
    moves
}

fn improves(value: f64, best: f64, maximizing: bool) -> bool {
    let ord = value.total_cmp(&best);
    if maximizing {
        ord == Ordering::Greater
    } else {
        ord == Ordering::Less
    }
}

fn worst_value(maximizing: bool) -> f64 {
    if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

/// Search `depth` plies from `position`.
///
/// Stops at `depth == 0` or once the board has a winner, returning the static
/// evaluation together with `position` itself.
pub fn minimax(position: &Board, depth: u32, maximizing: bool) -> SearchResult {
    let mut nodes = 0u64;
    let result = minimax_inner(position, depth, maximizing, &mut nodes);
    debug!(depth, maximizing, nodes, value = result.value, "minimax finished");
    result
}

fn minimax_inner(position: &Board, depth: u32, maximizing: bool, nodes: &mut u64) -> SearchResult {
    *nodes += 1;
    if depth == 0 || position.winner().is_some() {
        return SearchResult::leaf(position);
    }

    let mut best = SearchResult {
        value: worst_value(maximizing),
        board: None,
    };
    for next in ordered_moves(position, maximizing) {
        let value = minimax_inner(&next, depth - 1, !maximizing, nodes).value;
        if improves(value, best.value, maximizing) {
            best = SearchResult {
                value,
                board: Some(next),
            };
        }
    }
    best
}

/// Minimax with alpha-beta pruning over the same move ordering.
pub fn alphabeta(position: &Board, depth: u32, maximizing: bool) -> SearchResult {
    let mut nodes = 0u64;
    let result = alphabeta_inner(
        position,
        depth,
        f64::NEG_INFINITY,
        f64::INFINITY,
        maximizing,
        &mut nodes,
    );
    debug!(depth, maximizing, nodes, value = result.value, "alphabeta finished");
    result
}

fn alphabeta_inner(
    position: &Board,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
    nodes: &mut u64,
) -> SearchResult {
    *nodes += 1;
    if depth == 0 || position.winner().is_some() {
        return SearchResult::leaf(position);
    }

    let mut best = SearchResult {
        value: worst_value(maximizing),
        board: None,
    };
    for next in ordered_moves(position, maximizing) {
        let value = alphabeta_inner(&next, depth - 1, alpha, beta, !maximizing, nodes).value;
        if improves(value, best.value, maximizing) {
            best = SearchResult {
                value,
                board: Some(next),
            };
        }
        if maximizing {
            alpha = alpha.max(best.value);
        } else {
            beta = beta.min(best.value);
        }
        if alpha >= beta {
            break;
        }
    }
    best
}
