use std::fmt;
use uuid::Uuid;

/// Stable identity of a cell. Assigned once when a board is built and
/// never reused for another cell of the same board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct CellId(Uuid);

impl CellId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 0-based board coordinate
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Offsets of the eight Moore neighbours
    const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
        (-1, -1), (0, -1), (1, -1),
        (-1, 0),           (1, 0),
        (-1, 1),  (0, 1),  (1, 1),
    ];

    /// Apply a signed offset to one axis, `None` when it would underflow or overflow
    fn offset(position: u32, delta: i8) -> Option<u32> {
        if delta < 0 {
            position.checked_sub(u32::from(delta.unsigned_abs()))
        } else {
            position.checked_add(delta as u32)
        }
    }

    /// Neighbouring coordinates. The board does not wrap, so positions past
    /// the origin are skipped; positions past the far edge are left to the
    /// caller's bounds check.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        Self::NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            Some(Coord::new(Self::offset(self.x, dx)?, Self::offset(self.y, dy)?))
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Liveness of a single cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }

    /// Flip the state
    pub const fn toggle(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }
}

/// One grid position: identity and coordinates are fixed for the cell's
/// lifetime, only the state mutates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    id: CellId,
    coord: Coord,
    state: CellState,
}

impl Cell {
    pub(crate) const fn new(id: CellId, coord: Coord) -> Self {
        Self {
            id,
            coord,
            state: CellState::Dead,
        }
    }

    pub const fn id(&self) -> CellId {
        self.id
    }

    pub const fn coord(&self) -> Coord {
        self.coord
    }

    pub const fn x(&self) -> u32 {
        self.coord.x
    }

    pub const fn y(&self) -> u32 {
        self.coord.y
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub const fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_state() {
        assert_eq!(CellState::Alive.toggle(), CellState::Dead);
        assert_eq!(CellState::Dead.toggle(), CellState::Alive);
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(CellState::from(true), CellState::Alive);
        assert_eq!(CellState::from(false), CellState::Dead);
        assert!(!CellState::default().is_alive());
    }

    #[test]
    fn test_corner_has_three_neighbors() {
        let neighbors: Vec<_> = Coord::new(0, 0).neighbors().collect();
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.contains(&Coord::new(1, 0)));
        assert!(neighbors.contains(&Coord::new(0, 1)));
        assert!(neighbors.contains(&Coord::new(1, 1)));
    }

    #[test]
    fn test_interior_has_eight_neighbors() {
        let neighbors: Vec<_> = Coord::new(5, 5).neighbors().collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&Coord::new(5, 5)));
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(CellId::generate(), CellId::generate());
    }
}
