// Domain layer - cells, the grid and transition rules
pub mod domain;

// Service boundary - next-generation computation and the authoritative board
pub mod service;

// Application layer - configuration and the simulation controller
pub mod application;

// Infrastructure layer - UI, rendering, input
pub mod input;
pub mod rendering;
pub mod ui;

// Re-exports for convenience
pub use application::{SimulationConfig, SimulationController, SimulationError, StepOutcome};
pub use domain::{BoardSize, CellId, CellState, Coord, Grid};
pub use input::{DrawMode, PaintGesture, PointerEvent};
pub use service::{BoardServer, LifeService, LocalRules, ServiceError};
