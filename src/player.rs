//! Players sharing the `play`/`update` contract.
//!
//! Every player keeps a private board from its own perspective: its moves
//! are `Mine`, the opponent's are `Opponent`. The match driver only talks to
//! players through [`Player`].

use clap::ValueEnum;
use fastrand::Rng;
use tracing::debug;

use crate::agent::MctsPlayer;
use crate::board::{Board, Cell, GameStatus};
use crate::config::MctsConfig;
use crate::error::GameError;
use crate::playout::choose_random_move;
use crate::rules::Rules;

pub trait Player {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    /// Choose a vacant cell, mark it `Mine`, and return it.
    fn play(&mut self, rng: &mut Rng) -> Result<usize, GameError>;

    /// Record the opponent's move and judge the board from our side.
    fn update(&mut self, cell: usize) -> Result<GameStatus, GameError>;

    /// This player's view of the board.
    fn board(&self) -> &Board;
}

/// The player variants selectable from the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Uniformly random moves
    Random,
    /// Greedy rule-based heuristic
    Perfect,
    /// Monte Carlo Tree Search
    Mcts,
}

/// Build a fresh player of the given kind.
pub fn build_player<'a>(
    kind: PlayerKind,
    rules: &'a Rules,
    config: &MctsConfig,
) -> Box<dyn Player + 'a> {
    match kind {
        PlayerKind::Random => Box::new(RandomPlayer::new(rules)),
        PlayerKind::Perfect => Box::new(PerfectPlayer::new(rules)),
        PlayerKind::Mcts => Box::new(MctsPlayer::new(rules, config.clone())),
    }
}

/// Record an opponent move on `board` and judge the result.
pub(crate) fn record_opponent(
    rules: &Rules,
    board: &mut Board,
    cell: usize,
) -> Result<GameStatus, GameError> {
    board.place(cell, Cell::Opponent)?;
    Ok(rules.judge(board))
}

pub struct RandomPlayer<'a> {
    rules: &'a Rules,
    board: Board,
}

impl<'a> RandomPlayer<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self {
            rules,
            board: rules.empty_board(),
        }
    }
}

impl Player for RandomPlayer<'_> {
    fn name(&self) -> &'static str {
        "random"
    }

    fn play(&mut self, rng: &mut Rng) -> Result<usize, GameError> {
        let cell = choose_random_move(&self.board, rng).ok_or(GameError::NoVacantCell)?;
        self.board.place(cell, Cell::Mine)?;
        Ok(cell)
    }

    fn update(&mut self, cell: usize) -> Result<GameStatus, GameError> {
        record_opponent(self.rules, &mut self.board, cell)
    }

    fn board(&self) -> &Board {
        &self.board
    }
}

/// Greedy rule-based player.
///
/// Takes the center, then finishes its own line, then blocks the
/// opponent's, then extends its strongest open line, and otherwise plays at
/// random.
pub struct PerfectPlayer<'a> {
    rules: &'a Rules,
    board: Board,
}

impl<'a> PerfectPlayer<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self {
            rules,
            board: rules.empty_board(),
        }
    }

    fn choose(&self) -> Option<usize> {
        if let Some(center) = self.board.center().filter(|&c| self.board.is_vacant(c)) {
            return Some(center);
        }

        let need = self.rules.size() - 1;
        let mine = self.rules.line_counts(&self.board, Cell::Mine);
        let opp = self.rules.line_counts(&self.board, Cell::Opponent);
        let lines = self.rules.alignments();

        let open_line = |i: usize, own: &[usize], other: &[usize]| {
            (own[i] == need && other[i] == 0)
                .then(|| first_vacant(&self.board, &lines[i]))
                .flatten()
        };

        // Finish a line of ours
        if let Some(cell) = (0..lines.len()).find_map(|i| open_line(i, &mine, &opp)) {
            return Some(cell);
        }
        // Block a line of theirs
        if let Some(cell) = (0..lines.len()).find_map(|i| open_line(i, &opp, &mine)) {
            return Some(cell);
        }

        // Extend the untouched line where we already have the most marks,
        // earliest line on ties
        let mut best: Option<(usize, usize)> = None;
        for (i, line) in lines.iter().enumerate() {
            if opp[i] > 0 {
                continue;
            }
            let Some(cell) = first_vacant(&self.board, line) else { continue };
            if best.is_none_or(|(count, _)| mine[i] > count) {
                best = Some((mine[i], cell));
            }
        }
        best.map(|(_, cell)| cell)
    }
}

fn first_vacant(board: &Board, line: &[usize]) -> Option<usize> {
    line.iter().copied().find(|&i| board.is_vacant(i))
}

impl Player for PerfectPlayer<'_> {
    fn name(&self) -> &'static str {
        "perfect"
    }

    fn play(&mut self, rng: &mut Rng) -> Result<usize, GameError> {
        let cell = match self.choose() {
            Some(cell) => cell,
            None => {
                debug!("no heuristic move, falling back to random");
                choose_random_move(&self.board, rng).ok_or(GameError::NoVacantCell)?
            }
        };
        self.board.place(cell, Cell::Mine)?;
        Ok(cell)
    }

    fn update(&mut self, cell: usize) -> Result<GameStatus, GameError> {
        record_opponent(self.rules, &mut self.board, cell)
    }

    fn board(&self) -> &Board {
        &self.board
    }
}
