use super::{
    Cell, CellId, CellOutcome, CellRecord, CellSnapshot, CellState, Coord, GridError,
    InvalidArgument,
};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Board dimensions in cells
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BoardSize {
    pub width: u32,
    pub height: u32,
}

impl BoardSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells a board of this size holds
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    pub const fn contains(self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Both dimensions must be at least 1
    pub fn validate(self) -> Result<(), InvalidArgument> {
        if self.width == 0 {
            return Err(InvalidArgument::Width);
        }
        if self.height == 0 {
            return Err(InvalidArgument::Height);
        }
        Ok(())
    }

    /// Row-major slot of a coordinate
    const fn index_of(self, coord: Coord) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Cell size is presentation-only but still has to be positive
pub fn validate_cell_size(cell_size: u32) -> Result<(), InvalidArgument> {
    if cell_size == 0 {
        return Err(InvalidArgument::CellSize);
    }
    Ok(())
}

/// Grid owns every cell of one board.
///
/// Cells are stored row-major; lookups go through the id index or the
/// coordinate, never through the position in the sequence. The grid is
/// empty (0x0) until the first board is built.
#[derive(Debug)]
pub struct Grid {
    size: BoardSize,
    cell_size: u32,
    cells: Vec<Cell>,
    index: HashMap<CellId, usize>,
    /// Bumped on every structural rebuild
    epoch: u64,
    /// Bumped whenever the whole board is rewritten: rebuild, kill, randomize
    version: u64,
    /// Applied generations since the last build or kill
    generation: u64,
}

impl Grid {
    /// Create an empty grid with no board built yet
    pub fn new() -> Self {
        Self {
            size: BoardSize::new(0, 0),
            cell_size: 0,
            cells: Vec::new(),
            index: HashMap::new(),
            epoch: 0,
            version: 0,
            generation: 0,
        }
    }

    /// Create a grid with a freshly built board
    pub fn with_board(size: BoardSize, cell_size: u32) -> Result<Self, InvalidArgument> {
        let mut grid = Self::new();
        grid.create_board(size, cell_size)?;
        Ok(grid)
    }

    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.size.width, self.size.height)
    }

    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn is_built(&self) -> bool {
        !self.cells.is_empty()
    }

    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Changes whenever a board-wide write makes earlier snapshots obsolete
    pub const fn version(&self) -> u64 {
        self.version
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    fn validate(size: BoardSize, cell_size: u32) -> Result<(), InvalidArgument> {
        size.validate()?;
        validate_cell_size(cell_size)
    }

    /// Discard the current board and build `width * height` dead cells with
    /// fresh ids. On error the previous board is left as it was.
    pub fn create_board(&mut self, size: BoardSize, cell_size: u32) -> Result<(), InvalidArgument> {
        Self::validate(size, cell_size)?;

        let cells = (0..size.height)
            .flat_map(|y| (0..size.width).map(move |x| Coord::new(x, y)))
            .map(|coord| Cell::new(CellId::generate(), coord))
            .collect();

        self.install(size, cell_size, cells);
        Ok(())
    }

    /// Replace the board with cells whose ids were assigned elsewhere.
    ///
    /// The records must cover every coordinate exactly once, in any order;
    /// ids are adopted verbatim. Nothing changes unless all records check out.
    pub fn adopt_board(
        &mut self,
        size: BoardSize,
        cell_size: u32,
        records: &[CellRecord],
    ) -> Result<(), GridError> {
        Self::validate(size, cell_size)?;

        if records.len() != size.area() {
            return Err(GridError::RecordCount {
                expected: size.area(),
                actual: records.len(),
            });
        }

        let mut slots: Vec<Option<Cell>> = vec![None; size.area()];
        let mut seen = HashSet::with_capacity(records.len());

        for record in records {
            let coord = record.coord();
            if !size.contains(coord) {
                return Err(GridError::OutOfBounds(coord));
            }
            if !seen.insert(record.id) {
                return Err(GridError::DuplicateId(record.id));
            }
            let slot = &mut slots[size.index_of(coord)];
            if slot.is_some() {
                return Err(GridError::DuplicateCoord(coord));
            }
            *slot = Some(Cell::new(record.id, coord));
        }

        // Count matched and no slot was claimed twice, so every slot is filled.
        let cells = slots.into_iter().flatten().collect();
        self.install(size, cell_size, cells);
        Ok(())
    }

    fn install(&mut self, size: BoardSize, cell_size: u32, cells: Vec<Cell>) {
        self.index = cells
            .iter()
            .enumerate()
            .map(|(slot, cell)| (cell.id(), slot))
            .collect();
        self.cells = cells;
        self.size = size;
        self.cell_size = cell_size;
        self.epoch += 1;
        self.version += 1;
        self.generation = 0;
    }

    /// Set every cell dead, keeping ids and dimensions
    pub fn kill_all(&mut self) {
        self.cells
            .iter_mut()
            .for_each(|cell| cell.set_state(CellState::Dead));
        self.version += 1;
        self.generation = 0;
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.index.get(&id).map(|&slot| &self.cells[slot])
    }

    /// Get cell at position (with bounds checking)
    pub fn cell_at(&self, coord: Coord) -> Option<&Cell> {
        self.size
            .contains(coord)
            .then(|| &self.cells[self.size.index_of(coord)])
    }

    pub fn id_at(&self, coord: Coord) -> Option<CellId> {
        self.cell_at(coord).map(Cell::id)
    }

    fn cell_mut(&mut self, id: CellId) -> Result<&mut Cell, GridError> {
        let slot = *self.index.get(&id).ok_or(GridError::UnknownCell(id))?;
        Ok(&mut self.cells[slot])
    }

    /// Flip one cell, returning its new state
    pub fn toggle(&mut self, id: CellId) -> Result<CellState, GridError> {
        let cell = self.cell_mut(id)?;
        let state = cell.state().toggle();
        cell.set_state(state);
        Ok(state)
    }

    pub fn set_alive(&mut self, id: CellId, alive: bool) -> Result<(), GridError> {
        self.cell_mut(id)?.set_state(CellState::from(alive));
        Ok(())
    }

    /// All cells in creation order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn alive_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter(|cell| cell.is_alive())
    }

    pub fn dead_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter(|cell| !cell.is_alive())
    }

    pub fn alive_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.alive_cells().map(Cell::id)
    }

    pub fn dead_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.dead_cells().map(Cell::id)
    }

    pub fn alive_count(&self) -> usize {
        self.alive_cells().count()
    }

    /// Copy of every cell's state, in creation order
    pub fn snapshot(&self) -> Vec<CellSnapshot> {
        self.cells.iter().map(CellSnapshot::from).collect()
    }

    /// Merge a next-generation response by id.
    ///
    /// Cells the response does not mention keep their state. A response that
    /// names an unknown id is rejected as a whole before anything is written.
    /// Returns how many cells changed.
    pub fn apply_generation(&mut self, outcomes: &[CellOutcome]) -> Result<usize, GridError> {
        let updates = outcomes
            .iter()
            .map(|outcome| {
                self.index
                    .get(&outcome.id)
                    .map(|&slot| (slot, CellState::from(outcome.alive)))
                    .ok_or(GridError::UnknownCell(outcome.id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut changed = 0;
        for (slot, state) in updates {
            let cell = &mut self.cells[slot];
            if cell.state() != state {
                cell.set_state(state);
                changed += 1;
            }
        }

        self.generation += 1;
        Ok(changed)
    }

    /// Randomize every cell, each alive with probability `density`
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> Result<(), InvalidArgument> {
        if !(0.0..=1.0).contains(&density) {
            return Err(InvalidArgument::Density(density));
        }
        self.cells
            .iter_mut()
            .for_each(|cell| cell.set_state(CellState::from(rng.random_bool(density))));
        self.version += 1;
        self.generation = 0;
        Ok(())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn records_for(grid: &Grid) -> Vec<CellRecord> {
        grid.cells()
            .iter()
            .map(|cell| CellRecord { id: cell.id(), x: cell.x(), y: cell.y() })
            .collect()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert!(!grid.is_built());
        assert_eq!(grid.dimensions(), (0, 0));
        assert_eq!(grid.cells().len(), 0);
    }

    #[test]
    fn test_create_board_builds_every_cell_once() {
        for (width, height) in [(1, 1), (3, 3), (7, 2), (1, 40), (25, 25)] {
            let grid = Grid::with_board(BoardSize::new(width, height), 4).unwrap();
            let area = (width * height) as usize;

            assert_eq!(grid.cells().len(), area);

            let ids: HashSet<_> = grid.cells().iter().map(Cell::id).collect();
            let coords: HashSet<_> = grid.cells().iter().map(Cell::coord).collect();
            assert_eq!(ids.len(), area);
            assert_eq!(coords.len(), area);

            assert!(grid.cells().iter().all(|c| c.x() < width && c.y() < height));
            assert_eq!(grid.alive_count(), 0);
        }
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = Grid::with_board(BoardSize::new(3, 2), 1).unwrap();
        let coords: Vec<_> = grid.cells().iter().map(|c| (c.x(), c.y())).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_invalid_dimensions_leave_board_untouched() {
        let mut grid = Grid::with_board(BoardSize::new(4, 4), 10).unwrap();
        let first = grid.cells()[0].id();
        grid.set_alive(first, true).unwrap();
        let epoch = grid.epoch();

        assert_eq!(grid.create_board(BoardSize::new(0, 4), 10), Err(InvalidArgument::Width));
        assert_eq!(grid.create_board(BoardSize::new(4, 0), 10), Err(InvalidArgument::Height));
        assert_eq!(grid.create_board(BoardSize::new(4, 4), 0), Err(InvalidArgument::CellSize));

        assert_eq!(grid.epoch(), epoch);
        assert_eq!(grid.dimensions(), (4, 4));
        assert_eq!(grid.cell_size(), 10);
        assert_eq!(grid.cells()[0].id(), first);
        assert!(grid.cells()[0].is_alive());
    }

    #[test]
    fn test_rebuild_discards_old_ids() {
        let mut grid = Grid::with_board(BoardSize::new(2, 2), 1).unwrap();
        let old: HashSet<_> = grid.cells().iter().map(Cell::id).collect();
        let epoch = grid.epoch();

        grid.create_board(BoardSize::new(3, 1), 1).unwrap();

        assert_eq!(grid.epoch(), epoch + 1);
        assert!(grid.cells().iter().all(|c| !old.contains(&c.id())));
        assert!(old.iter().all(|id| grid.cell(*id).is_none()));
    }

    #[test]
    fn test_kill_all_is_idempotent() {
        let mut grid = Grid::with_board(BoardSize::new(5, 5), 1).unwrap();
        let ids: Vec<_> = grid.cells().iter().map(Cell::id).collect();
        for id in ids.iter().step_by(2) {
            grid.set_alive(*id, true).unwrap();
        }
        let (epoch, version) = (grid.epoch(), grid.version());

        grid.kill_all();
        assert_eq!(grid.alive_count(), 0);

        grid.kill_all();
        assert_eq!(grid.alive_count(), 0);
        assert_eq!(grid.epoch(), epoch);
        assert_eq!(grid.version(), version + 2);
        assert_eq!(grid.cells().iter().map(Cell::id).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn test_toggle_and_set_alive() {
        let mut grid = Grid::with_board(BoardSize::new(2, 2), 1).unwrap();
        let id = grid.id_at(Coord::new(1, 1)).unwrap();

        assert_eq!(grid.toggle(id), Ok(CellState::Alive));
        assert!(grid.cell(id).unwrap().is_alive());
        assert_eq!(grid.toggle(id), Ok(CellState::Dead));

        grid.set_alive(id, true).unwrap();
        grid.set_alive(id, true).unwrap();
        assert!(grid.cell_at(Coord::new(1, 1)).unwrap().is_alive());

        let stranger = CellId::generate();
        assert_eq!(grid.toggle(stranger), Err(GridError::UnknownCell(stranger)));
    }

    #[test]
    fn test_queries_preserve_order() {
        let mut grid = Grid::with_board(BoardSize::new(4, 1), 1).unwrap();
        let ids: Vec<_> = grid.cells().iter().map(Cell::id).collect();
        grid.set_alive(ids[3], true).unwrap();
        grid.set_alive(ids[1], true).unwrap();

        assert_eq!(grid.alive_ids().collect::<Vec<_>>(), vec![ids[1], ids[3]]);
        assert_eq!(grid.dead_ids().collect::<Vec<_>>(), vec![ids[0], ids[2]]);
        assert_eq!(grid.alive_cells().count() + grid.dead_cells().count(), 4);
    }

    #[test]
    fn test_cell_at_out_of_bounds() {
        let grid = Grid::with_board(BoardSize::new(2, 3), 1).unwrap();
        assert!(grid.cell_at(Coord::new(2, 0)).is_none());
        assert!(grid.cell_at(Coord::new(0, 3)).is_none());
        assert!(grid.cell_at(Coord::new(1, 2)).is_some());
    }

    #[test]
    fn test_adopt_board_keeps_ids_and_sorts_slots() {
        let source = Grid::with_board(BoardSize::new(3, 2), 1).unwrap();
        let mut records = records_for(&source);
        records.reverse();

        let mut grid = Grid::new();
        grid.adopt_board(BoardSize::new(3, 2), 8, &records).unwrap();

        assert_eq!(grid.cell_size(), 8);
        for cell in source.cells() {
            assert_eq!(grid.id_at(cell.coord()), Some(cell.id()));
        }
        assert_eq!(grid.cells()[0].coord(), Coord::new(0, 0));
    }

    #[test]
    fn test_adopt_board_rejects_bad_records() {
        let size = BoardSize::new(2, 2);
        let source = Grid::with_board(size, 1).unwrap();
        let good = records_for(&source);

        let mut grid = Grid::with_board(BoardSize::new(1, 1), 1).unwrap();
        let before = grid.cells()[0].id();

        let short = &good[..3];
        assert_eq!(
            grid.adopt_board(size, 1, short),
            Err(GridError::RecordCount { expected: 4, actual: 3 })
        );

        let mut outside = good.clone();
        outside[2].x = 9;
        assert_eq!(grid.adopt_board(size, 1, &outside), Err(GridError::OutOfBounds(Coord::new(9, 1))));

        let mut same_id = good.clone();
        same_id[1].id = same_id[0].id;
        assert_eq!(grid.adopt_board(size, 1, &same_id), Err(GridError::DuplicateId(good[0].id)));

        let mut same_coord = good.clone();
        same_coord[1].x = 0;
        assert_eq!(grid.adopt_board(size, 1, &same_coord), Err(GridError::DuplicateCoord(Coord::new(0, 0))));

        assert_eq!(grid.dimensions(), (1, 1));
        assert_eq!(grid.cells()[0].id(), before);
    }

    #[test]
    fn test_apply_generation_merges_by_id() {
        let mut grid = Grid::with_board(BoardSize::new(3, 1), 1).unwrap();
        let ids: Vec<_> = grid.cells().iter().map(Cell::id).collect();
        grid.set_alive(ids[0], true).unwrap();
        grid.set_alive(ids[2], true).unwrap();

        let changed = grid
            .apply_generation(&[
                CellOutcome { id: ids[1], alive: true },
                CellOutcome { id: ids[0], alive: false },
            ])
            .unwrap();

        assert_eq!(changed, 2);
        assert_eq!(grid.generation(), 1);
        // Not mentioned, so unchanged
        assert!(grid.cell(ids[2]).unwrap().is_alive());
        assert!(grid.cell(ids[1]).unwrap().is_alive());
        assert!(!grid.cell(ids[0]).unwrap().is_alive());
    }

    #[test]
    fn test_apply_generation_with_unknown_id_changes_nothing() {
        let mut grid = Grid::with_board(BoardSize::new(2, 1), 1).unwrap();
        let ids: Vec<_> = grid.cells().iter().map(Cell::id).collect();
        let stranger = CellId::generate();

        let result = grid.apply_generation(&[
            CellOutcome { id: ids[0], alive: true },
            CellOutcome { id: stranger, alive: true },
        ]);

        assert_eq!(result, Err(GridError::UnknownCell(stranger)));
        assert_eq!(grid.alive_count(), 0);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn test_randomize_density_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::with_board(BoardSize::new(10, 10), 1).unwrap();

        let version = grid.version();
        grid.randomize(&mut rng, 1.0).unwrap();
        assert_eq!(grid.alive_count(), 100);
        assert_eq!(grid.version(), version + 1);

        grid.randomize(&mut rng, 0.0).unwrap();
        assert_eq!(grid.alive_count(), 0);

        let version = grid.version();
        assert_eq!(grid.randomize(&mut rng, 1.5), Err(InvalidArgument::Density(1.5)));
        assert_eq!(grid.version(), version);
    }

    #[test]
    fn test_single_cell_edits_keep_version() {
        let mut grid = Grid::with_board(BoardSize::new(3, 3), 1).unwrap();
        let version = grid.version();
        let id = grid.id_at(Coord::new(1, 1)).unwrap();

        grid.set_alive(id, true).unwrap();
        grid.toggle(id).unwrap();
        grid.apply_generation(&[CellOutcome { id, alive: true }]).unwrap();
        assert_eq!(grid.version(), version);

        grid.create_board(BoardSize::new(3, 3), 1).unwrap();
        assert_eq!(grid.version(), version + 1);
    }
}
