//! Winning alignments and the judge routine.
//!
//! The alignment table (N rows, N columns, two diagonals) is derived once
//! from the board size and only ever read afterwards. Players borrow a
//! single [`Rules`] value for the whole match.

use crate::board::{Board, Cell, GameStatus};
use crate::error::GameError;

#[derive(Clone, Debug)]
pub struct Rules {
    size: usize,
    alignments: Vec<Vec<usize>>,
}

impl Rules {
    /// Build the 2N+2 alignments for an NxN board.
    pub fn new(size: usize) -> Result<Self, GameError> {
        if size == 0 {
            return Err(GameError::InvalidSize(size));
        }

        let idx = |x: usize, y: usize| size * y + x;
        let mut alignments = Vec::with_capacity(2 * size + 2);

        // Rows, then columns
        for y in 0..size {
            alignments.push((0..size).map(|x| idx(x, y)).collect());
        }
        for x in 0..size {
            alignments.push((0..size).map(|y| idx(x, y)).collect());
        }

        // Main diagonal and anti-diagonal
        alignments.push((0..size).map(|i| idx(i, i)).collect());
        alignments.push((0..size).map(|i| idx(size - i - 1, i)).collect());

        Ok(Self { size, alignments })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// A fresh board matching these rules.
    pub fn empty_board(&self) -> Board {
        Board::new(self.size)
    }

    #[inline]
    pub fn alignments(&self) -> &[Vec<usize>] {
        &self.alignments
    }

    /// Classify `board` from its owner's perspective.
    ///
    /// Each alignment contributes +1 when wholly `Mine`, -1 when wholly
    /// `Opponent`, 0 otherwise. A positive sum is a win, a negative sum a
    /// loss; a zero sum on a full board is a draw.
    pub fn judge(&self, board: &Board) -> GameStatus {
        debug_assert_eq!(board.size(), self.size);

        let result: i32 = self
            .alignments
            .iter()
            .map(|line| line_owner(board, line))
            .sum();

        if result > 0 {
            GameStatus::Win
        } else if result < 0 {
            GameStatus::Lose
        } else if !board.has_vacant() {
            GameStatus::Draw
        } else {
            GameStatus::Continuing
        }
    }

    /// Count `state` marks in each alignment, in alignment order.
    pub fn line_counts(&self, board: &Board, state: Cell) -> Vec<usize> {
        self.alignments
            .iter()
            .map(|line| line.iter().filter(|&&i| board.get(i) == state).count())
            .collect()
    }
}

fn line_owner(board: &Board, line: &[usize]) -> i32 {
    if line.iter().all(|&i| board.get(i) == Cell::Mine) {
        1
    } else if line.iter().all(|&i| board.get(i) == Cell::Opponent) {
        -1
    } else {
        0
    }
}
