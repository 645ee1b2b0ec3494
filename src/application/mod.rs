mod config;
mod controller;

pub use config::{
    DEFAULT_BOARD, DEFAULT_CELL_SIZE, DEFAULT_SLEEP_TIME, SimulationConfig, sleep_time_from_millis,
};
pub use controller::{SimulationController, SimulationError, StepOutcome};
