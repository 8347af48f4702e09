//! Monte Carlo Tree Search (MCTS).
//!
//! Each iteration runs the four classic phases:
//! - Selection: descend through fully expanded nodes by `value / (visits + ε)`
//! - Expansion: add one child for the first candidate board not yet in the tree
//! - Simulation: random playout from the new child
//! - Backpropagation: update visits and value from the child up to the root
//!
//! Candidate moves are always generated for the searching side, and results
//! are scored from that side's point of view.
//!
//! Nodes live in a flat arena owned by [`SearchTree`]; parents and children are
//! indices into it, so the whole tree is released at once when the search ends.

use tracing::{debug, trace};

use crate::board::{Board, Outcome};
use crate::constants::SELECTION_EPSILON;
use crate::movegen::get_all_moves;
use crate::piece::Side;
use crate::playout::random_playout;

/// Arena index of the root node.
const ROOT: usize = 0;

/// A node in the MCTS search tree.
pub struct TreeNode {
    /// The board at this node
    pub board: Board,
    /// Parent index (`None` for the root)
    pub parent: Option<usize>,
    /// Child indices in expansion order
    pub children: Vec<usize>,
    /// Number of visits
    pub visits: u32,
    /// Sum of playout rewards (+1 win, -1 loss, 0 otherwise)
    pub value: f64,
    /// Distinct boards reachable from `board`, computed on first use
    candidates: Option<Vec<Board>>,
}

impl TreeNode {
    fn new(board: Board, parent: Option<usize>) -> Self {
        Self {
            board,
            parent,
            children: Vec::new(),
            visits: 0,
            value: 0.0,
            candidates: None,
        }
    }

    /// Average reward, with unvisited nodes scoring 0.
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.value / (self.visits as f64 + SELECTION_EPSILON)
    }
}

/// Candidate boards for `side`, with duplicates removed.
fn distinct_moves(board: &Board, side: Side) -> Vec<Board> {
    let mut unique: Vec<Board> = Vec::new();
    for next in get_all_moves(board, side) {
        if !unique.contains(&next) {
            unique.push(next);
        }
    }
    unique
}

/// A search tree for one decision.
pub struct SearchTree {
    nodes: Vec<TreeNode>,
    side: Side,
}

impl SearchTree {
    /// Create a tree rooted at a copy of `board`, searching for `side`.
    pub fn new(board: &Board, side: Side) -> Self {
        Self {
            nodes: vec![TreeNode::new(board.clone(), None)],
            side,
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[ROOT]
    }

    pub fn node(&self, idx: usize) -> &TreeNode {
        &self.nodes[idx]
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Make sure the node's candidates are computed and return how many there are.
    fn ensure_candidates(&mut self, idx: usize) -> usize {
        let side = self.side;
        let node = &mut self.nodes[idx];
        node.candidates
            .get_or_insert_with(|| distinct_moves(&node.board, side))
            .len()
    }

    fn is_fully_expanded(&mut self, idx: usize) -> bool {
        let candidates = self.ensure_candidates(idx);
        self.nodes[idx].children.len() == candidates
    }

    /// Child with the highest ratio; the first one wins ties.
    pub fn best_child(&self, idx: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &child in &self.nodes[idx].children {
            let ratio = self.nodes[child].ratio();
            match best {
                Some((_, top)) if ratio <= top => {}
                _ => best = Some((child, ratio)),
            }
        }
        best.map(|(child, _)| child)
    }

    /// Descend from the root while nodes are fully expanded.
    fn select(&mut self) -> usize {
        let mut node = ROOT;
        while self.is_fully_expanded(node) {
            match self.best_child(node) {
                Some(child) => node = child,
                None => break,
            }
        }
        node
    }

    /// Add a child for the first candidate not already in the tree.
    fn expand(&mut self, idx: usize) -> Option<usize> {
        self.ensure_candidates(idx);
        let node = &self.nodes[idx];
        let fresh = node
            .candidates
            .iter()
            .flatten()
            .find(|candidate| {
                !node
                    .children
                    .iter()
                    .any(|&child| self.nodes[child].board == **candidate)
            })?
            .clone();

        let child = self.nodes.len();
        self.nodes.push(TreeNode::new(fresh, Some(idx)));
        self.nodes[idx].children.push(child);
        Some(child)
    }

    fn reward(&self, outcome: Option<Outcome>) -> f64 {
        match outcome {
            Some(Outcome::Win(side)) if side == self.side => 1.0,
            Some(Outcome::Win(_)) => -1.0,
            Some(Outcome::Draw) | None => 0.0,
        }
    }

    /// Walk from `idx` up to the root, recording one visit and the reward.
    fn backpropagate(&mut self, idx: usize, outcome: Option<Outcome>) {
        let reward = self.reward(outcome);
        let mut current = Some(idx);
        while let Some(i) = current {
            let node = &mut self.nodes[i];
            node.visits += 1;
            node.value += reward;
            current = node.parent;
        }
    }

    /// Run `iterations` rounds of selection, expansion, simulation and backpropagation.
    pub fn run(&mut self, iterations: usize, rng: &mut fastrand::Rng) {
        let mut skipped = 0usize;
        for i in 0..iterations {
            let leaf = self.select();
            let Some(child) = self.expand(leaf) else {
                skipped += 1;
                trace!(iteration = i, leaf, "nothing left to expand");
                continue;
            };

            let outcome = random_playout(&self.nodes[child].board, self.side, rng);
            trace!(iteration = i, child, ?outcome, "playout finished");
            self.backpropagate(child, outcome);
        }
        debug!(
            side = %self.side,
            iterations,
            skipped,
            nodes = self.nodes.len(),
            root_visits = self.root().visits,
            "mcts search finished"
        );
    }

    /// Board of the root's best child, or `None` if the root has no children.
    pub fn best_board(&self) -> Option<Board> {
        self.best_child(ROOT).map(|child| self.nodes[child].board.clone())
    }

    /// Log statistics for the root's children.
    pub fn dump_children(&self) {
        for &child in &self.root().children {
            let node = &self.nodes[child];
            debug!(
                child,
                visits = node.visits,
                value = node.value,
                ratio = node.ratio(),
                eval = node.board.evaluate(),
                "root child"
            );
        }
    }
}

/// Run MCTS from `board` for `side` and return the chosen next board.
///
/// Returns `None` when `side` has no legal move.
pub fn tree_search(
    board: &Board,
    side: Side,
    iterations: usize,
    rng: &mut fastrand::Rng,
) -> Option<Board> {
    let mut tree = SearchTree::new(board, side);
    tree.run(iterations, rng);
    tree.dump_children();
    tree.best_board()
}
