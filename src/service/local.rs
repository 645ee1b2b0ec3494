use super::{LifeService, ServiceError};
use crate::domain::{CellOutcome, CellSnapshot, CellState, Coord, Rule, default_rule};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Compute the next generation of a board snapshot.
///
/// Only live cells and their neighbours can change, so only those are
/// evaluated (in parallel). The board edges do not wrap. Outcomes come back
/// in snapshot order.
pub fn next_generation(rule: &dyn Rule, cells: &[CellSnapshot]) -> Vec<CellOutcome> {
    let by_coord: HashMap<Coord, &CellSnapshot> =
        cells.iter().map(|cell| (cell.coord(), cell)).collect();

    let relevant: HashSet<Coord> = cells
        .iter()
        .filter(|cell| cell.alive)
        .flat_map(|cell| std::iter::once(cell.coord()).chain(cell.coord().neighbors()))
        .filter(|coord| by_coord.contains_key(coord))
        .collect();

    cells
        .par_iter()
        .filter(|cell| relevant.contains(&cell.coord()))
        .map(|cell| {
            let neighbors = cell
                .coord()
                .neighbors()
                .filter_map(|coord| by_coord.get(&coord))
                .filter(|neighbor| neighbor.alive)
                .count() as u8;

            CellOutcome {
                id: cell.id,
                alive: rule.evolve(CellState::from(cell.alive), neighbors).is_alive(),
            }
        })
        .collect()
}

/// Stateless in-process next-generation service. The grid stays the owner
/// of ids and cell state.
pub struct LocalRules {
    rule: Box<dyn Rule>,
}

impl LocalRules {
    pub fn new(rule: Box<dyn Rule>) -> Self {
        Self { rule }
    }
}

impl Default for LocalRules {
    fn default() -> Self {
        Self::new(default_rule())
    }
}

impl LifeService for LocalRules {
    async fn compute_next_generation(
        &self,
        cells: &[CellSnapshot],
    ) -> Result<Vec<CellOutcome>, ServiceError> {
        Ok(next_generation(self.rule.as_ref(), cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardSize, ConwayRule, Grid, HighLifeRule};

    fn board(width: u32, height: u32, alive: &[(u32, u32)]) -> Grid {
        let mut grid = Grid::with_board(BoardSize::new(width, height), 1).unwrap();
        for &(x, y) in alive {
            let id = grid.id_at(Coord::new(x, y)).unwrap();
            grid.set_alive(id, true).unwrap();
        }
        grid
    }

    fn alive_after(grid: &Grid, outcomes: &[CellOutcome]) -> Vec<(u32, u32)> {
        let mut next = outcomes
            .iter()
            .filter(|o| o.alive)
            .map(|o| {
                let cell = grid.cell(o.id).unwrap();
                (cell.x(), cell.y())
            })
            .collect::<Vec<_>>();
        next.sort();
        next
    }

    #[test]
    fn test_lonely_cell_dies() {
        let grid = board(3, 3, &[(1, 1)]);
        let outcomes = next_generation(&ConwayRule, &grid.snapshot());

        let center = grid.id_at(Coord::new(1, 1)).unwrap();
        let verdict = outcomes.iter().find(|o| o.id == center).unwrap();
        assert!(!verdict.alive);
        assert!(outcomes.iter().all(|o| !o.alive));
    }

    #[test]
    fn test_blinker_oscillates() {
        let grid = board(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let outcomes = next_generation(&ConwayRule, &grid.snapshot());
        assert_eq!(alive_after(&grid, &outcomes), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_block_in_corner_is_stable() {
        let grid = board(4, 4, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let outcomes = next_generation(&ConwayRule, &grid.snapshot());
        assert_eq!(alive_after(&grid, &outcomes), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_edges_do_not_wrap() {
        // A blinker on the edge loses the half that would fall off the board
        let grid = board(3, 3, &[(0, 0), (1, 0), (2, 0)]);
        let outcomes = next_generation(&ConwayRule, &grid.snapshot());
        assert_eq!(alive_after(&grid, &outcomes), vec![(1, 0), (1, 1)]);
    }

    #[test]
    fn test_only_relevant_cells_are_reported() {
        let grid = board(10, 10, &[(0, 0)]);
        let outcomes = next_generation(&ConwayRule, &grid.snapshot());
        // The live cell plus its three neighbours
        assert_eq!(outcomes.len(), 4);

        let empty = board(10, 10, &[]);
        assert!(next_generation(&ConwayRule, &empty.snapshot()).is_empty());
    }

    #[test]
    fn test_outcomes_follow_snapshot_order() {
        let grid = board(6, 6, &[(2, 2), (3, 2), (2, 3)]);
        let snapshot = grid.snapshot();
        let outcomes = next_generation(&ConwayRule, &snapshot);

        let positions: Vec<usize> = outcomes
            .iter()
            .map(|o| snapshot.iter().position(|s| s.id == o.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_highlife_births_on_six() {
        let alive = [(0, 0), (1, 0), (2, 0), (0, 2), (1, 2), (2, 2)];
        let grid = board(3, 3, &alive);
        let center = grid.id_at(Coord::new(1, 1)).unwrap();

        let conway = next_generation(&ConwayRule, &grid.snapshot());
        let highlife = next_generation(&HighLifeRule, &grid.snapshot());

        assert!(!conway.iter().any(|o| o.id == center && o.alive));
        assert!(highlife.iter().any(|o| o.id == center && o.alive));
    }
}
