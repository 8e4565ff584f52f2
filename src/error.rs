use thiserror::Error;

use crate::board::Move;

/// Errors surfaced to callers of the engine and of the text front ends.
///
/// An empty move list is never an error: a side without moves passes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OthelloError {
    /// Target occupied, or the move captures nothing in every direction.
    #[error("illegal move: {mv}")]
    IllegalMove { mv: Move },

    #[error("coordinates out of bounds: row {row}, col {col}")]
    OutOfBounds { row: i32, col: i32 },

    #[error("malformed move input: {0:?}")]
    MalformedInput(String),

    #[error("cannot pass with {moves} legal move(s) available")]
    PassNotAllowed { moves: usize },

    #[error("invalid board diagram: {0}")]
    InvalidBoard(String),

    /// Heuristic scores could reach the terminal range.
    #[error("invalid evaluation weights: {0}")]
    InvalidWeights(String),
}
