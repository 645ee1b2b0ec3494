use thiserror::Error;

use super::{CellId, Coord};

/// A caller-supplied value was out of range. Raised before any state changes.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidArgument {
    #[error("board width must be at least 1")]
    Width,
    #[error("board height must be at least 1")]
    Height,
    #[error("cell size must be at least 1")]
    CellSize,
    #[error("sleep time must not be negative (got {0} ms)")]
    SleepTime(i64),
    #[error("density must lie within 0.0..=1.0 (got {0})")]
    Density(f64),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    #[error("no cell with id {0}")]
    UnknownCell(CellId),
    #[error("{0} is outside the board")]
    OutOfBounds(Coord),
    #[error("expected {expected} cells, got {actual}")]
    RecordCount { expected: usize, actual: usize },
    #[error("more than one cell at {0}")]
    DuplicateCoord(Coord),
    #[error("more than one cell with id {0}")]
    DuplicateId(CellId),
}
