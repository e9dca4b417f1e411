//! The MCTS player.
//!
//! Owns the search engine for its whole lifetime. Each decision runs the
//! configured number of search cycles from the cursor and then commits to
//! the cursor's best child by UCB1 score. Opponent replies move the cursor
//! too, so everything learned below the real game state carries over.

use fastrand::Rng;
use tracing::debug;

use crate::board::{Board, Cell, GameStatus};
use crate::config::MctsConfig;
use crate::error::GameError;
use crate::mcts::{MctsEngine, TreeStats};
use crate::player::{Player, record_opponent};
use crate::rules::Rules;

pub struct MctsPlayer<'a> {
    rules: &'a Rules,
    board: Board,
    engine: MctsEngine,
    config: MctsConfig,
}

impl<'a> MctsPlayer<'a> {
    pub fn new(rules: &'a Rules, config: MctsConfig) -> Self {
        let board = rules.empty_board();
        let engine = MctsEngine::new(board.len());
        Self {
            rules,
            board,
            engine,
            config,
        }
    }

    #[inline]
    pub fn engine(&self) -> &MctsEngine {
        &self.engine
    }

    pub fn stats(&self) -> TreeStats {
        self.engine.stats()
    }

    /// Center cell when the opening shortcut applies.
    fn opening_move(&self) -> Option<usize> {
        if !self.config.center_first {
            return None;
        }
        self.board.center().filter(|&c| self.board.is_vacant(c))
    }

    fn commit(&mut self, cell: usize) -> Result<usize, GameError> {
        self.board.place(cell, Cell::Mine)?;
        self.engine.advance(cell)?;
        debug!(cell, "mine move");
        Ok(cell)
    }
}

impl Player for MctsPlayer<'_> {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn play(&mut self, rng: &mut Rng) -> Result<usize, GameError> {
        if !self.board.has_vacant() {
            return Err(GameError::NoVacantCell);
        }

        if let Some(center) = self.opening_move() {
            return self.commit(center);
        }

        for _ in 0..self.config.rollouts_per_move {
            self.engine.search(&self.board, self.rules, rng)?;
        }
        self.engine.dump_children();

        let cell = self.engine.best_move().ok_or(GameError::NoVacantCell)?;
        self.commit(cell)
    }

    fn update(&mut self, cell: usize) -> Result<GameStatus, GameError> {
        let status = record_opponent(self.rules, &mut self.board, cell)?;
        self.engine.advance(cell)?;
        debug!(cell, "opp. move");
        Ok(status)
    }

    fn board(&self) -> &Board {
        &self.board
    }
}
