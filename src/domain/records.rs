//! Named-field records exchanged with a next-generation or authoritative
//! service. Each one replaces a positional tuple so `id` and state can
//! never be swapped by accident.

use super::{Cell, CellId, Coord};

/// Identity and position of a cell as assigned by whoever built the board
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellRecord {
    pub id: CellId,
    pub x: u32,
    pub y: u32,
}

impl CellRecord {
    pub const fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

/// Full state of one cell, sent to a next-generation service
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellSnapshot {
    pub id: CellId,
    pub x: u32,
    pub y: u32,
    pub alive: bool,
}

impl CellSnapshot {
    pub const fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        Self {
            id: cell.id(),
            x: cell.x(),
            y: cell.y(),
            alive: cell.is_alive(),
        }
    }
}

/// Liveness a cell should take in the next generation
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellOutcome {
    pub id: CellId,
    pub alive: bool,
}

/// Acknowledgement of a single-cell mutation
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellUpdate {
    pub id: CellId,
    pub applied: bool,
}
