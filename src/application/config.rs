use crate::domain::{BoardSize, InvalidArgument};
use crate::input::DrawMode;
use std::time::Duration;

pub const DEFAULT_BOARD: BoardSize = BoardSize::new(50, 50);
pub const DEFAULT_CELL_SIZE: u32 = 12;
pub const DEFAULT_SLEEP_TIME: Duration = Duration::from_millis(100);

/// Starting values for a simulation controller
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SimulationConfig {
    pub board: BoardSize,
    pub cell_size: u32,
    pub sleep_time: Duration,
    pub draw_mode: DrawMode,
    /// Upper bound for a single service call; `None` waits forever
    pub service_timeout: Option<Duration>,
}

impl SimulationConfig {
    pub fn with_board(mut self, board: BoardSize) -> Self {
        self.board = board;
        self
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Delay between automatic steps, in milliseconds
    pub fn with_sleep_time(mut self, millis: i64) -> Result<Self, InvalidArgument> {
        self.sleep_time = sleep_time_from_millis(millis)?;
        Ok(self)
    }

    pub fn with_draw_mode(mut self, draw_mode: DrawMode) -> Self {
        self.draw_mode = draw_mode;
        self
    }

    pub fn with_service_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.service_timeout = timeout;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            board: DEFAULT_BOARD,
            cell_size: DEFAULT_CELL_SIZE,
            sleep_time: DEFAULT_SLEEP_TIME,
            draw_mode: DrawMode::Alive,
            service_timeout: None,
        }
    }
}

/// Negative delays are rejected
pub fn sleep_time_from_millis(millis: i64) -> Result<Duration, InvalidArgument> {
    u64::try_from(millis)
        .map(Duration::from_millis)
        .map_err(|_| InvalidArgument::SleepTime(millis))
}
