//! Integration tests for checkers-ai
//!
//! Boards are written in the same text form `Board` prints:
//! `b`/`B` brown man/king, `w`/`W` white man/king, `.` empty.

use checkers_ai::board::{Board, Outcome};
use checkers_ai::constants::PIECES_PER_SIDE;
use checkers_ai::error::BoardError;
use checkers_ai::game::{Game, Selection};
use checkers_ai::movegen::{get_all_moves, side_has_capture};
use checkers_ai::piece::Side;

// =============================================================================
// Helper functions
// =============================================================================

fn board(s: &str) -> Board {
    s.parse().expect("test board should parse")
}

/// Check that tracked counts agree with what is actually on the grid.
fn assert_counts_consistent(b: &Board) {
    for side in [Side::Brown, Side::White] {
        let pieces = b.pieces(side);
        assert_eq!(
            b.count(side) as usize,
            pieces.len(),
            "{side} count drifted from the grid:\n{b}"
        );
        assert_eq!(
            b.kings(side) as usize,
            pieces.iter().filter(|p| p.is_king()).count(),
            "{side} king count drifted from the grid:\n{b}"
        );
        assert!(b.count(side) <= PIECES_PER_SIDE);
    }
}

// =============================================================================
// Board model
// =============================================================================

#[test]
fn test_initial_position() {
    let b = Board::new();
    assert_counts_consistent(&b);
    for side in [Side::Brown, Side::White] {
        for piece in b.pieces(side) {
            assert_eq!((piece.row() + piece.col()) % 2, 1, "pieces sit on dark squares");
            assert!(!piece.is_king());
        }
    }
}

#[test]
fn test_out_of_range_access_is_an_error() {
    let b = Board::new();
    assert_eq!(b.get_piece(0, 9), Err(BoardError::OutOfBounds { row: 0, col: 9 }));
    assert_eq!(b.get_piece(100, 0), Err(BoardError::OutOfBounds { row: 100, col: 0 }));
}

#[test]
fn test_promotion_happens_once() {
    let mut b = board(
        ". . . . . . . .
         . . w . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . w . .
         . . . . . . . .",
    );
    b.play((6, 5), (7, 4)).unwrap();
    let king = b.get_piece(7, 4).unwrap().unwrap();
    assert!(king.is_king());
    assert_eq!(b.kings(Side::White), 1);
    assert_eq!(b.evaluate(), 2.5);

    // the king can leave the edge and come back without being promoted again
    b.play((7, 4), (6, 3)).unwrap();
    b.play((6, 3), (7, 2)).unwrap();
    assert_eq!(b.kings(Side::White), 1);
    assert_counts_consistent(&b);
}

#[test]
fn test_winner_once_a_side_is_wiped_out() {
    let mut b = board(
        ". . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . w . . . .
         . . b . . . . .
         . . . . . . . .
         . . . . . . . .",
    );
    assert_eq!(b.winner(), None);
    let captured = b.play((5, 2), (3, 4)).unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(b.count(Side::White), 0);
    assert_eq!(b.winner(), Some(Outcome::Win(Side::Brown)));
}

#[test]
fn test_draw_when_neither_side_can_move() {
    let b = board(
        ". b . b . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         w . w . . . . .",
    );
    assert_eq!(b.winner(), Some(Outcome::Draw));
}

// =============================================================================
// Move generation
// =============================================================================

#[test]
fn test_opening_has_seven_moves_per_side() {
    let b = Board::new();
    for side in [Side::Brown, Side::White] {
        let moves = get_all_moves(&b, side);
        assert_eq!(moves.len(), 7, "{side} should have 7 opening moves");
        for m in &moves {
            assert_eq!(m.count(Side::Brown), 12);
            assert_eq!(m.count(Side::White), 12);
        }
    }
}

#[test]
fn test_only_captures_when_a_capture_exists() {
    // brown (5, 2) can jump (4, 3); every other brown move is simple
    let b = board(
        ". . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . w . . . .
         b . b . . . b .
         . . . . . . . .
         . . . . . . . .",
    );
    assert!(side_has_capture(&b, Side::Brown));
    let moves = get_all_moves(&b, Side::Brown);
    assert!(!moves.is_empty());
    for m in &moves {
        assert!(
            m.count(Side::White) < b.count(Side::White),
            "simple move mixed into capture list:\n{m}"
        );
    }
}

#[test]
fn test_captures_come_first_in_reverse_discovery_order() {
    // two brown men can each take a different white man
    let b = board(
        ". . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . w . . . w . .
         . . b . . . b .
         . . . . . . . .
         . . . . . . . .",
    );
    let moves = get_all_moves(&b, Side::Brown);
    assert_eq!(moves.len(), 2);
    // (5, 6) is scanned after (5, 2), so its capture is at the front
    assert!(moves[0].get_piece(3, 4).unwrap().is_some());
    assert!(moves[1].get_piece(3, 0).unwrap().is_some());
}

#[test]
fn test_king_captures_backwards_in_a_chain() {
    // down over (3, 4), then back up over (3, 6)
    let b = board(
        ". . . . . . . .
         . . . . . . . .
         . . . W . . . .
         . . . . b . b .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .",
    );
    let moves = get_all_moves(&b, Side::White);
    assert!(!moves.is_empty());
    for m in &moves {
        assert_eq!(m.count(Side::Brown), 0, "the king should take both men:\n{m}");
        assert_counts_consistent(m);
    }
}

#[test]
fn test_counts_never_inflate_in_random_games() {
    let mut rng = fastrand::Rng::with_seed(2024);
    for _ in 0..20 {
        let mut b = Board::new();
        let mut side = Side::Brown;
        let mut previous = (PIECES_PER_SIDE, PIECES_PER_SIDE);
        for _ in 0..120 {
            if b.winner().is_some() {
                break;
            }
            let mut moves = get_all_moves(&b, side);
            if moves.is_empty() {
                break;
            }
            b = moves.swap_remove(rng.usize(..moves.len()));
            assert_counts_consistent(&b);

            let now = (b.count(Side::Brown), b.count(Side::White));
            assert!(now.0 <= previous.0 && now.1 <= previous.1, "piece counts grew");
            assert!(
                (PIECES_PER_SIDE - now.0) + (PIECES_PER_SIDE - now.1)
                    >= (PIECES_PER_SIDE - previous.0) + (PIECES_PER_SIDE - previous.1)
            );
            previous = now;
            side = side.opponent();
        }
    }
}

// =============================================================================
// Game driver
// =============================================================================

#[test]
fn test_opening_move_end_to_end() {
    for (col, dest_col) in [(0, 1), (2, 1), (2, 3), (4, 5), (6, 7)] {
        let mut game = Game::new();
        assert_eq!(game.turn(), Side::Brown);

        let selected = game.select(5, col).unwrap();
        assert!(matches!(selected, Selection::Selected(ref d) if d.contains(&(4, dest_col))));
        let moved = game.select(4, dest_col).unwrap();
        assert_eq!(
            moved,
            Selection::Moved {
                captured: 0,
                turn_over: true
            }
        );

        let b = game.board();
        assert_eq!(b.count(Side::Brown), 12);
        assert_eq!(b.count(Side::White), 12);
        assert_eq!(b.get_piece(5, col).unwrap(), None);
        let piece = b.get_piece(4, dest_col).unwrap().expect("piece moved");
        assert_eq!(piece.square(), (4, dest_col));
        assert_eq!(piece.side(), Side::Brown);
        assert_eq!(game.turn(), Side::White);
    }
}

#[test]
fn test_illegal_destination_is_rejected() {
    let mut b = Board::new();
    let before = b.clone();
    assert_eq!(
        b.play((5, 0), (4, 0)),
        Err(BoardError::IllegalMove {
            from: (5, 0),
            to: (4, 0)
        })
    );
    assert_eq!(b, before, "a rejected move must not touch the board");
}
