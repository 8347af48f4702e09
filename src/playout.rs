//! Monte Carlo playouts (random game simulation).
//!
//! A playout repeatedly applies a uniformly random move for one side until the
//! board has a winner, the side runs out of moves, or the ply cap is hit.

use crate::board::{Board, Outcome};
use crate::constants::MAX_PLAYOUT_PLIES;
use crate::movegen::get_all_moves;
use crate::piece::Side;

/// Play random moves for `side` starting from `board`.
///
/// Returns the decided outcome, or `None` if the playout stalled (no moves
/// left or the ply cap reached).
pub fn random_playout(board: &Board, side: Side, rng: &mut fastrand::Rng) -> Option<Outcome> {
    let mut current = board.clone();

    for _ in 0..MAX_PLAYOUT_PLIES {
        if let Some(outcome) = current.winner() {
            return Some(outcome);
        }
        let mut moves = get_all_moves(&current, side);
        if moves.is_empty() {
            return None;
        }
        let pick = rng.usize(..moves.len());
        current = moves.swap_remove(pick);
    }

    current.winner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playout_on_finished_board() {
        let board: Board = ". . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . . .
             . . . . . . w ."
            .parse()
            .unwrap();
        let mut rng = fastrand::Rng::with_seed(7);
        assert_eq!(
            random_playout(&board, Side::White, &mut rng),
            Some(Outcome::Win(Side::White))
        );
    }

    #[test]
    fn test_playout_is_reproducible_with_seed() {
        let board = Board::new();
        let a = random_playout(&board, Side::White, &mut fastrand::Rng::with_seed(42));
        let b = random_playout(&board, Side::White, &mut fastrand::Rng::with_seed(42));
        assert_eq!(a, b);
    }
}
