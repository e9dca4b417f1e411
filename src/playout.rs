//! Monte Carlo playouts (random game simulation).
//!
//! A playout starts from a scratch copy of the live board with the selected
//! move already applied, then alternates uniformly random moves until the
//! game ends. Each ply also descends the search tree, creating nodes as
//! needed, so the rollout leaves a fresh random tail behind it.

use fastrand::Rng;

use crate::board::{Board, Cell, GameStatus};
use crate::error::GameError;
use crate::mcts::{NodeId, SearchTree};
use crate::rules::Rules;

/// Path and terminal outcome of a single rollout.
#[derive(Debug, Clone)]
pub struct Rollout {
    /// Nodes visited, starting with the selected child
    pub path: Vec<NodeId>,
    /// Outcome from the engine's perspective
    pub status: GameStatus,
}

/// Pick a vacant cell uniformly at random.
pub fn choose_random_move(board: &Board, rng: &mut Rng) -> Option<usize> {
    let candidates: Vec<usize> = board.vacant().collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.usize(..candidates.len())])
}

/// Play a random game from `board` after the engine plays `first_move`.
///
/// `start` is the tree node for `first_move`. Turns alternate starting with
/// the opponent, since the engine has just moved.
pub fn rollout(
    tree: &mut SearchTree,
    start: NodeId,
    first_move: usize,
    board: &Board,
    rules: &Rules,
    rng: &mut Rng,
) -> Result<Rollout, GameError> {
    let mut scratch = board.clone();
    scratch.place(first_move, Cell::Mine)?;

    let mut path = vec![start];
    let mut trace = start;
    let mut turn = Cell::Mine;

    loop {
        let status = rules.judge(&scratch);
        if status.is_terminal() {
            return Ok(Rollout { path, status });
        }

        turn = turn.flipped();
        let mv = choose_random_move(&scratch, rng).ok_or(GameError::NoVacantCell)?;
        scratch.place(mv, turn)?;

        trace = tree.child_or_insert(trace, mv);
        path.push(trace);
    }
}
