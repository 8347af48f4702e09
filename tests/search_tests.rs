//! Search behaviour tests: minimax determinism and MCTS move quality.

use checkers_ai::ai::{AiConfig, Algorithm, choose_move};
use checkers_ai::board::Board;
use checkers_ai::mcts::{SearchTree, tree_search};
use checkers_ai::minimax::{alphabeta, minimax};
use checkers_ai::movegen::{get_all_moves, side_has_capture};
use checkers_ai::piece::Side;

fn board(s: &str) -> Board {
    s.parse().expect("test board should parse")
}

/// White is far ahead: two kings and two men against two brown men.
fn white_ahead() -> Board {
    board(
        ". . . . . . . .
         . . w . w . . .
         . . . . . . . .
         . . W . . . . .
         . . . . . b . .
         . . . . . . . .
         . . . b . W . .
         . . . . . . . .",
    )
}

// =============================================================================
// Minimax
// =============================================================================

#[test]
fn test_minimax_is_deterministic() {
    let b = Board::new();
    let first = minimax(&b, 3, true);
    for _ in 0..3 {
        assert_eq!(minimax(&b, 3, true), first);
    }
    let brown = minimax(&b, 3, false);
    assert_eq!(minimax(&b, 3, false), brown);
}

#[test]
fn test_minimax_finds_the_winning_capture() {
    // white to move; jumping the last brown man ends the game
    let b = board(
        ". . . . . . . .
         . . . . . . . .
         . . . w . . . .
         . . . . b . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . w . . . . .",
    );
    let result = minimax(&b, 3, true);
    let chosen = result.board.expect("white has moves");
    assert_eq!(chosen.count(Side::Brown), 0);
    assert_eq!(result.value, 2.0);
}

#[test]
fn test_alphabeta_agrees_at_default_depth() {
    let b = white_ahead();
    assert_eq!(alphabeta(&b, 4, true), minimax(&b, 4, true));
    assert_eq!(alphabeta(&b, 4, false), minimax(&b, 4, false));
}

#[test]
fn test_minimax_result_is_reachable() {
    let b = Board::new();
    let chosen = minimax(&b, 4, true).board.expect("opening has moves");
    assert!(get_all_moves(&b, Side::White).contains(&chosen));
}

// =============================================================================
// MCTS
// =============================================================================

#[test]
fn test_mcts_does_not_hang_its_man() {
    // (5, 2) -> (6, 1) walks into a jump from (7, 0) and leaves white stuck;
    // (5, 2) -> (6, 3) is covered because the landing square (5, 4) is taken
    let b = board(
        ". . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . . . . . . .
         . . w . b . . .
         . . . . . . . .
         b . b . . . . .",
    );
    let candidates = get_all_moves(&b, Side::White);
    assert!(
        candidates.iter().any(|m| side_has_capture(m, Side::Brown)),
        "position needs a move that hangs a piece"
    );
    assert!(candidates.iter().any(|m| !side_has_capture(m, Side::Brown)));

    let trials = 10;
    let mut failures = 0;
    for seed in 0..trials {
        let mut rng = fastrand::Rng::with_seed(seed);
        let chosen = tree_search(&b, Side::White, 500, &mut rng).expect("white has moves");
        if side_has_capture(&chosen, Side::Brown) {
            failures += 1;
        }
    }
    assert!(
        failures * 10 <= trials,
        "MCTS hung a piece in {failures} of {trials} trials"
    );
}

#[test]
fn test_mcts_is_reproducible_with_seed() {
    let b = Board::new();
    let a = tree_search(&b, Side::White, 100, &mut fastrand::Rng::with_seed(77));
    let c = tree_search(&b, Side::White, 100, &mut fastrand::Rng::with_seed(77));
    assert_eq!(a, c);
}

#[test]
fn test_mcts_tree_statistics() {
    let b = Board::new();
    let mut tree = SearchTree::new(&b, Side::White);
    tree.run(200, &mut fastrand::Rng::with_seed(3));

    let root = tree.root();
    assert_eq!(root.parent, None);
    assert_eq!(root.children.len(), 7);
    let child_visits: u32 = root.children.iter().map(|&c| tree.node(c).visits).sum();
    assert_eq!(child_visits, root.visits, "every visit passes through one root child");
    assert!(root.visits <= 200);
}

#[test]
fn test_ai_config_threads_algorithm_choice() {
    let b = white_ahead();
    for algorithm in [Algorithm::Minimax, Algorithm::Mcts] {
        let config = AiConfig {
            algorithm,
            depth: 3,
            simulations: 100,
            seed: Some(12),
        };
        let mut rng = config.rng();
        let chosen = choose_move(&b, Side::White, &config, &mut rng).expect("white has moves");
        assert!(get_all_moves(&b, Side::White).contains(&chosen));
    }
}
