//! Square grid state seen from one player's side.
//!
//! A board is owned by exactly one player, so cells are recorded as
//! [`Cell::Mine`] or [`Cell::Opponent`] relative to that owner rather than
//! by absolute color.

use std::fmt;

use crate::constants::{GLYPH_MINE, GLYPH_OPPONENT, GLYPH_VACANT};
use crate::error::GameError;

/// State of a single cell from the board owner's perspective.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Mine,
    Opponent,
    Vacant,
}

impl Cell {
    /// The same mark seen from the other side of the table.
    #[inline]
    pub fn flipped(self) -> Cell {
        match self {
            Cell::Mine => Cell::Opponent,
            Cell::Opponent => Cell::Mine,
            Cell::Vacant => Cell::Vacant,
        }
    }
}

/// Outcome of judging a board, relative to its owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Continuing,
    Win,
    Lose,
    Draw,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Continuing
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `size`x`size` board.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Vacant; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (N²).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True while no mark has been placed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == Cell::Vacant)
    }

    /// Linear index of column `x`, row `y`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        self.size * y + x
    }

    #[inline]
    pub fn get(&self, cell: usize) -> Cell {
        self.cells[cell]
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn is_vacant(&self, cell: usize) -> bool {
        self.cells.get(cell) == Some(&Cell::Vacant)
    }

    /// Iterate over the indices of vacant cells in ascending order.
    pub fn vacant(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Vacant)
            .map(|(i, _)| i)
    }

    pub fn has_vacant(&self) -> bool {
        self.cells.contains(&Cell::Vacant)
    }

    /// Center cell, only defined for odd board sizes.
    pub fn center(&self) -> Option<usize> {
        (self.size % 2 == 1).then(|| self.index(self.size / 2, self.size / 2))
    }

    /// Mark a vacant cell. Fails if the cell is off the board or taken.
    pub fn place(&mut self, cell: usize, state: Cell) -> Result<(), GameError> {
        let len = self.len();
        match self.cells.get_mut(cell) {
            None => Err(GameError::OutOfRange { cell, len }),
            Some(slot) if *slot != Cell::Vacant => Err(GameError::Occupied(cell)),
            Some(slot) => {
                *slot = state;
                Ok(())
            }
        }
    }

    /// Count of `Mine` and `Opponent` marks.
    pub fn counts(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(m, o), c| match c {
            Cell::Mine => (m + 1, o),
            Cell::Opponent => (m, o + 1),
            Cell::Vacant => (m, o),
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = format!("+{}+", "-".repeat(self.size));
        writeln!(f, "{rule}")?;
        for y in 0..self.size {
            write!(f, "|")?;
            for x in 0..self.size {
                let ch = match self.get(self.index(x, y)) {
                    Cell::Mine => GLYPH_MINE,
                    Cell::Opponent => GLYPH_OPPONENT,
                    Cell::Vacant => GLYPH_VACANT,
                };
                write!(f, "{ch}")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_row_major() {
        let board = Board::new(3);
        assert_eq!(board.index(0, 0), 0);
        assert_eq!(board.index(2, 0), 2);
        assert_eq!(board.index(0, 1), 3);
        assert_eq!(board.index(2, 2), 8);
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_range() {
        let mut board = Board::new(3);
        assert!(board.place(4, Cell::Mine).is_ok());
        assert_eq!(board.place(4, Cell::Opponent), Err(GameError::Occupied(4)));
        assert_eq!(
            board.place(9, Cell::Mine),
            Err(GameError::OutOfRange { cell: 9, len: 9 })
        );
        assert_eq!(board.get(4), Cell::Mine);
    }

    #[test]
    fn test_vacant_and_counts() {
        let mut board = Board::new(2);
        board.place(0, Cell::Mine).unwrap();
        board.place(3, Cell::Opponent).unwrap();
        assert_eq!(board.vacant().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(board.counts(), (1, 1));
        assert!(board.has_vacant());
        assert!(!board.is_empty());
    }

    #[test]
    fn test_center_only_for_odd_sizes() {
        assert_eq!(Board::new(3).center(), Some(4));
        assert_eq!(Board::new(5).center(), Some(12));
        assert_eq!(Board::new(4).center(), None);
    }

    #[test]
    fn test_display_matches_dump_format() {
        let mut board = Board::new(3);
        board.place(0, Cell::Mine).unwrap();
        board.place(4, Cell::Opponent).unwrap();
        let expected = "+---+\n|o  |\n| x |\n|   |\n+---+\n";
        assert_eq!(board.to_string(), expected);
    }
}
