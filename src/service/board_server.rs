use super::{LifeService, ServiceError, next_generation};
use crate::domain::{
    BoardSize, CellId, CellOutcome, CellRecord, CellSnapshot, CellUpdate, Grid, Rule, default_rule,
};
use log::{debug, info};
use std::cell::RefCell;
use std::time::Instant;

/// In-process authoritative source: owns the canonical board, assigns the
/// ids and evolves its own copy on every generation request.
pub struct BoardServer {
    rule: Box<dyn Rule>,
    board: RefCell<Grid>,
}

impl BoardServer {
    pub fn new(rule: Box<dyn Rule>) -> Self {
        Self {
            rule,
            board: RefCell::new(Grid::new()),
        }
    }

    /// Generations applied since the board was last built or killed
    pub fn generation(&self) -> u64 {
        self.board.borrow().generation()
    }

    /// Read-only view of the canonical board
    pub fn with_board<T>(&self, read: impl FnOnce(&Grid) -> T) -> T {
        read(&self.board.borrow())
    }
}

impl Default for BoardServer {
    fn default() -> Self {
        Self::new(default_rule())
    }
}

impl LifeService for BoardServer {
    const AUTHORITATIVE: bool = true;

    async fn create_board(&self, size: BoardSize) -> Result<Vec<CellRecord>, ServiceError> {
        let start = Instant::now();
        let mut board = self.board.borrow_mut();

        // Cell size means nothing on this side of the boundary
        board
            .create_board(size, 1)
            .map_err(|err| ServiceError::Rejected(err.to_string()))?;

        info!("created {size} board in {:?}", start.elapsed());

        Ok(board
            .cells()
            .iter()
            .map(|cell| CellRecord { id: cell.id(), x: cell.x(), y: cell.y() })
            .collect())
    }

    async fn kill_board(&self) -> Result<(), ServiceError> {
        let start = Instant::now();
        self.board.borrow_mut().kill_all();
        info!("killed board in {:?}", start.elapsed());
        Ok(())
    }

    async fn update_cell_state(&self, id: CellId, alive: bool) -> Result<CellUpdate, ServiceError> {
        let applied = self.board.borrow_mut().set_alive(id, alive).is_ok();
        if !applied {
            debug!("update for unknown cell {id} refused");
        }
        Ok(CellUpdate { id, applied })
    }

    async fn compute_next_generation(
        &self,
        _cells: &[CellSnapshot],
    ) -> Result<Vec<CellOutcome>, ServiceError> {
        let start = Instant::now();
        let mut board = self.board.borrow_mut();

        let next = next_generation(self.rule.as_ref(), &board.snapshot());
        board
            .apply_generation(&next)
            .map_err(|err| ServiceError::Rejected(err.to_string()))?;

        debug!(
            "computed generation {} in {:?} for {} cells",
            board.generation(),
            start.elapsed(),
            next.len()
        );
        Ok(next)
    }
}
