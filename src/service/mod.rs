//! Boundary to the component that computes generations and, in the
//! service-backed setup, holds the canonical cell state.

mod board_server;
mod local;

pub use board_server::BoardServer;
pub use local::{LocalRules, next_generation};

use crate::domain::{BoardSize, CellId, CellOutcome, CellRecord, CellSnapshot, CellUpdate};
use std::time::Duration;
use thiserror::Error;

/// Any failure reported by, or about, a service call. Always recoverable:
/// the operation that hit it leaves the grid as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{operation} is not supported by this service")]
    Unsupported { operation: &'static str },
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Next-generation service, optionally also the authoritative owner of the
/// board.
///
/// Non-authoritative services only compute generations from the snapshot
/// they are handed; the grid assigns ids and applies edits itself.
/// Authoritative services assign ids, acknowledge every edit and evolve
/// their own copy of the board, so the grid only mirrors what they confirm.
///
/// Calls run on a single thread; implementations must not hold borrows of
/// their own state across an `.await`.
#[allow(async_fn_in_trait)]
pub trait LifeService {
    const AUTHORITATIVE: bool = false;

    /// Build a board and return every cell's id and position
    async fn create_board(&self, size: BoardSize) -> Result<Vec<CellRecord>, ServiceError> {
        let _ = size;
        Err(ServiceError::Unsupported { operation: "create_board" })
    }

    /// Set every cell dead
    async fn kill_board(&self) -> Result<(), ServiceError> {
        Err(ServiceError::Unsupported { operation: "kill_board" })
    }

    /// Set one cell's liveness. `applied` is false when the service refused
    async fn update_cell_state(&self, id: CellId, alive: bool) -> Result<CellUpdate, ServiceError> {
        let _ = (id, alive);
        Err(ServiceError::Unsupported { operation: "update_cell_state" })
    }

    /// Liveness for the next generation. Must cover every live cell; cells
    /// left out keep their state. Authoritative services may ignore `cells`.
    async fn compute_next_generation(
        &self,
        cells: &[CellSnapshot],
    ) -> Result<Vec<CellOutcome>, ServiceError>;
}
