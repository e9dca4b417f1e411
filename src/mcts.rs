//! Monte Carlo Tree Search with plain UCB1 selection.
//!
//! The search tree lives in an arena owned by [`MctsEngine`]. Each node keeps
//! one child slot per board cell, indexed by the move that leads to the
//! child, so a node's children never need to be searched by value.
//!
//! One search cycle is:
//! - expand the cursor with a child for every vacant cell that lacks one
//! - select the cursor's child with the highest UCB1 score
//! - play a random game from there, growing the tree along the way
//! - backpropagate the outcome over every node on the recorded path
//!
//! The cursor tracks the real game: it advances on our own moves and on the
//! opponent's replies, so statistics gathered below it are reused.

use fastrand::Rng;
use tracing::{debug, trace};

use crate::board::{Board, GameStatus};
use crate::constants::UCB_EXPLORATION;
use crate::error::GameError;
use crate::playout::rollout;
use crate::rules::Rules;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A decision point in the search tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Cell played to reach this node (`None` for the root)
    pub mv: Option<usize>,
    /// Rollouts that passed through this node
    pub visits: u32,
    /// Rollouts through this node that ended in a win for the engine
    pub wins: u32,
    /// One slot per cell, filled lazily
    children: Vec<Option<NodeId>>,
}

impl TreeNode {
    fn new(mv: Option<usize>, width: usize) -> Self {
        Self {
            mv,
            visits: 0,
            wins: 0,
            children: vec![None; width],
        }
    }

    #[inline]
    pub fn children(&self) -> &[Option<NodeId>] {
        &self.children
    }

    #[inline]
    pub fn child(&self, cell: usize) -> Option<NodeId> {
        self.children.get(cell).copied().flatten()
    }

    /// Observed win rate, 0.0 for an unvisited node.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.visits > 0 {
            self.wins as f64 / self.visits as f64
        } else {
            0.0
        }
    }

    /// UCB1 score against the engine-wide playout counter.
    #[inline]
    pub fn score(&self, total_playouts: u32) -> f64 {
        ucb1(self.wins, self.visits, total_playouts)
    }
}

/// UCB1: `wins/visits + sqrt(2 ln(total/visits))`, or exactly 0 when
/// `visits == 0`.
///
/// `total_playouts` must be at least `visits` for the logarithm to be
/// non-negative; the engine guarantees this since every rollout bumps the
/// global counter once and each node at most once.
pub fn ucb1(wins: u32, visits: u32, total_playouts: u32) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    let v = visits as f64;
    wins as f64 / v + (UCB_EXPLORATION * (total_playouts as f64 / v).ln()).sqrt()
}

/// Arena-backed search tree. Node 0 is the root; every other node is
/// referenced from exactly one parent slot.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<TreeNode>,
    width: usize,
}

impl SearchTree {
    /// Create a tree holding only a root, for boards of `width` cells.
    pub fn new(width: usize) -> Self {
        Self {
            nodes: vec![TreeNode::new(None, width)],
            width,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.index()]
    }

    /// Number of allocated nodes, including ones no longer reachable from
    /// the cursor.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the root is allocated at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return the child of `parent` for `cell`, allocating a fresh one with
    /// zero statistics if the slot is empty.
    pub fn child_or_insert(&mut self, parent: NodeId, cell: usize) -> NodeId {
        if let Some(child) = self.get(parent).child(cell) {
            return child;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TreeNode::new(Some(cell), self.width));
        self.get_mut(parent).children[cell] = Some(id);
        id
    }

    /// Give `node` a child for every vacant cell of `board` that lacks one.
    ///
    /// Existing children are left untouched, so repeated calls on the same
    /// board are no-ops. Returns the number of children created.
    pub fn expand(&mut self, node: NodeId, board: &Board) -> usize {
        let missing: Vec<usize> = board
            .vacant()
            .filter(|&cell| self.get(node).child(cell).is_none())
            .collect();
        for &cell in &missing {
            self.child_or_insert(node, cell);
        }
        missing.len()
    }

    /// The child of `node` with the highest UCB1 score, with its cell.
    ///
    /// Empty slots are skipped. A later child must score strictly higher to
    /// replace an earlier one, so ties go to the lowest cell index.
    pub fn best_child(&self, node: NodeId, total_playouts: u32) -> Option<(usize, NodeId)> {
        let mut best: Option<(usize, NodeId, f64)> = None;
        for (cell, slot) in self.get(node).children.iter().enumerate() {
            let Some(id) = *slot else { continue };
            let score = self.get(id).score(total_playouts);
            match best {
                Some((_, _, top)) if score <= top => {}
                _ => best = Some((cell, id, score)),
            }
        }
        best.map(|(cell, id, _)| (cell, id))
    }

    /// Record one rollout outcome on every node of `path`.
    pub fn backpropagate(&mut self, path: &[NodeId], status: GameStatus) {
        let won = status == GameStatus::Win;
        for &id in path.iter().rev() {
            let node = self.get_mut(id);
            node.visits += 1;
            if won {
                node.wins += 1;
            }
        }
    }
}

/// Snapshot of the engine for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub cursor_visits: u32,
    pub cursor_wins: u32,
    pub total_playouts: u32,
}

/// Search tree plus the cursor that follows the real game.
#[derive(Debug)]
pub struct MctsEngine {
    tree: SearchTree,
    cursor: NodeId,
    total_playouts: u32,
}

impl MctsEngine {
    /// Engine for boards of `width` cells, cursor at the root.
    pub fn new(width: usize) -> Self {
        let tree = SearchTree::new(width);
        let cursor = tree.root();
        Self {
            tree,
            cursor,
            total_playouts: 0,
        }
    }

    #[inline]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    #[inline]
    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    #[inline]
    pub fn cursor_node(&self) -> &TreeNode {
        self.tree.get(self.cursor)
    }

    #[inline]
    pub fn total_playouts(&self) -> u32 {
        self.total_playouts
    }

    /// Run one expansion/selection/playout/backpropagation cycle from the
    /// cursor. `board` is the live board, which must match the cursor.
    ///
    /// Returns the path that received the outcome, selected child first.
    pub fn search(
        &mut self,
        board: &Board,
        rules: &Rules,
        rng: &mut Rng,
    ) -> Result<Vec<NodeId>, GameError> {
        self.tree.expand(self.cursor, board);

        let (cell, selected) = self
            .tree
            .best_child(self.cursor, self.total_playouts)
            .ok_or(GameError::NoVacantCell)?;
        self.total_playouts += 1;

        let outcome = rollout(&mut self.tree, selected, cell, board, rules, rng)?;
        self.tree.backpropagate(&outcome.path, outcome.status);

        trace!(
            first = cell,
            depth = outcome.path.len(),
            status = ?outcome.status,
            playouts = self.total_playouts,
            "rollout"
        );

        Ok(outcome.path)
    }

    /// The cursor's best child by UCB1 score, as a cell index.
    pub fn best_move(&self) -> Option<usize> {
        self.tree
            .best_child(self.cursor, self.total_playouts)
            .map(|(cell, _)| cell)
    }

    /// Move the cursor to the child for `cell`, creating it if the tree has
    /// never seen that move from here.
    pub fn advance(&mut self, cell: usize) -> Result<NodeId, GameError> {
        if cell >= self.tree.width {
            return Err(GameError::OutOfRange {
                cell,
                len: self.tree.width,
            });
        }
        self.cursor = self.tree.child_or_insert(self.cursor, cell);
        Ok(self.cursor)
    }

    pub fn stats(&self) -> TreeStats {
        let cursor = self.cursor_node();
        TreeStats {
            total_nodes: self.tree.len(),
            cursor_visits: cursor.visits,
            cursor_wins: cursor.wins,
            total_playouts: self.total_playouts,
        }
    }

    /// Log the cursor's children and their statistics.
    pub fn dump_children(&self) {
        for (cell, slot) in self.cursor_node().children.iter().enumerate() {
            if let Some(id) = slot {
                let child = self.tree.get(*id);
                debug!(
                    cell,
                    visits = child.visits,
                    wins = child.wins,
                    score = child.score(self.total_playouts),
                    "child"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_ucb1_zero_visits_is_zero() {
        assert_eq!(ucb1(0, 0, 0), 0.0);
        assert_eq!(ucb1(0, 0, 1000), 0.0);
    }

    #[test]
    fn test_ucb1_formula() {
        let expected = 3.0 / 4.0 + (2.0 * (100.0f64 / 4.0).ln()).sqrt();
        assert!((ucb1(3, 4, 100) - expected).abs() < 1e-12);
        // Exploration vanishes when every playout went through the node
        assert!((ucb1(2, 4, 4) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ucb1_monotonic() {
        assert!(ucb1(3, 10, 50) > ucb1(2, 10, 50));
        assert!(ucb1(3, 10, 51) > ucb1(3, 10, 50));
    }

    #[test]
    fn test_child_or_insert_reuses_slot() {
        let mut tree = SearchTree::new(9);
        let a = tree.child_or_insert(tree.root(), 4);
        let b = tree.child_or_insert(tree.root(), 4);
        assert_eq!(a, b);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(a).mv, Some(4));
        assert_eq!(tree.get(tree.root()).child(4), Some(a));
    }

    #[test]
    fn test_expand_only_vacant_cells() {
        let mut board = Board::new(3);
        board.place(0, Cell::Mine).unwrap();
        board.place(8, Cell::Opponent).unwrap();

        let mut tree = SearchTree::new(9);
        assert_eq!(tree.expand(tree.root(), &board), 7);
        let root = tree.get(tree.root());
        assert!(root.child(0).is_none());
        assert!(root.child(8).is_none());
        assert!((1..8).all(|c| root.child(c).is_some()));
    }

    #[test]
    fn test_expand_is_idempotent() {
        let board = Board::new(3);
        let mut tree = SearchTree::new(9);
        tree.expand(tree.root(), &board);
        let child = tree.get(tree.root()).child(2).unwrap();
        tree.get_mut(child).visits = 5;
        tree.get_mut(child).wins = 3;

        let before: Vec<_> = tree.get(tree.root()).children().to_vec();
        assert_eq!(tree.expand(tree.root(), &board), 0);
        assert_eq!(tree.get(tree.root()).children(), &before[..]);
        assert_eq!(tree.get(child).visits, 5);
        assert_eq!(tree.get(child).wins, 3);
    }

    #[test]
    fn test_best_child_tie_goes_to_lowest_cell() {
        let mut tree = SearchTree::new(9);
        tree.child_or_insert(tree.root(), 7);
        tree.child_or_insert(tree.root(), 3);
        let (cell, _) = tree.best_child(tree.root(), 0).unwrap();
        assert_eq!(cell, 3);
    }

    #[test]
    fn test_best_child_prefers_higher_score() {
        let mut tree = SearchTree::new(9);
        let low = tree.child_or_insert(tree.root(), 0);
        let high = tree.child_or_insert(tree.root(), 5);
        tree.get_mut(low).visits = 4;
        tree.get_mut(low).wins = 0;
        tree.get_mut(high).visits = 4;
        tree.get_mut(high).wins = 4;
        assert_eq!(tree.best_child(tree.root(), 8), Some((5, high)));
    }

    #[test]
    fn test_best_child_none_without_children() {
        let tree = SearchTree::new(9);
        assert_eq!(tree.best_child(tree.root(), 0), None);
    }

    #[test]
    fn test_backpropagate_touches_each_node_once() {
        let mut tree = SearchTree::new(9);
        let a = tree.child_or_insert(tree.root(), 0);
        let b = tree.child_or_insert(a, 1);
        tree.backpropagate(&[a, b], GameStatus::Win);
        tree.backpropagate(&[a, b], GameStatus::Draw);
        assert_eq!((tree.get(a).visits, tree.get(a).wins), (2, 1));
        assert_eq!((tree.get(b).visits, tree.get(b).wins), (2, 1));
        assert_eq!(tree.get(tree.root()).visits, 0);
    }

    #[test]
    fn test_search_counts_one_playout_per_cycle() {
        let rules = Rules::new(3).unwrap();
        let board = rules.empty_board();
        let mut engine = MctsEngine::new(9);
        let mut rng = Rng::with_seed(7);

        for _ in 0..25 {
            let path = engine.search(&board, &rules, &mut rng).unwrap();
            assert!(!path.is_empty());
        }
        assert_eq!(engine.total_playouts(), 25);

        let root = engine.cursor_node();
        let sum: u32 = root
            .children()
            .iter()
            .flatten()
            .map(|&id| engine.tree().get(id).visits)
            .sum();
        assert_eq!(sum, 25);
        assert_eq!(root.visits, 0);
    }

    #[test]
    fn test_advance_creates_missing_child() {
        let mut engine = MctsEngine::new(9);
        let id = engine.advance(6).unwrap();
        assert_eq!(engine.cursor(), id);
        assert_eq!(engine.cursor_node().mv, Some(6));
        assert_eq!(engine.cursor_node().visits, 0);
        assert_eq!(engine.cursor_node().wins, 0);
        assert_eq!(
            engine.advance(9),
            Err(GameError::OutOfRange { cell: 9, len: 9 })
        );
    }

    #[test]
    fn test_stats_snapshot() {
        let rules = Rules::new(3).unwrap();
        let board = rules.empty_board();
        let mut engine = MctsEngine::new(9);
        let mut rng = Rng::with_seed(1);
        engine.search(&board, &rules, &mut rng).unwrap();

        let stats = engine.stats();
        assert_eq!(stats.total_playouts, 1);
        assert_eq!(stats.cursor_visits, 0);
        assert!(stats.total_nodes >= 10);
    }
}
