//! Error type for board and player operations.
//!
//! Every variant is a caller contract violation: the engine itself never
//! fails once its inputs are consistent with the live board.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell {0} is already occupied")]
    Occupied(usize),

    #[error("cell {cell} is outside a board of {len} cells")]
    OutOfRange { cell: usize, len: usize },

    #[error("invalid board size {0}")]
    InvalidSize(usize),

    #[error("no vacant cell left to play")]
    NoVacantCell,
}
