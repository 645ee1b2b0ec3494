use super::config::{SimulationConfig, sleep_time_from_millis};
use crate::domain::{
    BoardSize, CellState, Coord, Grid, GridError, InvalidArgument, validate_cell_size,
};
use crate::input::{DrawMode, GesturePhase, PaintGesture, PointerEvent, Stroke};
use crate::service::{LifeService, ServiceError};
use log::{debug, info, warn};
use rand::Rng;
use std::cell::{Cell, Ref, RefCell};
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("service failure: {0}")]
    Service(#[from] ServiceError),
}

/// Result of a successful `step`
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// The response was merged into the grid
    Applied { generation: u64, changed: usize },
    /// The board was rebuilt, cleared or randomized while the response was
    /// pending; nothing applied
    Discarded,
}

/// SimulationController owns the board and the interaction state and drives
/// generations through a `LifeService`.
///
/// Everything runs on one thread. Methods take `&self` so a running loop
/// and user input can interleave at the two suspension points (a pending
/// service call and the inter-step delay); no `RefCell` borrow is held
/// across either.
pub struct SimulationController<S> {
    service: S,
    grid: RefCell<Grid>,
    gesture: Cell<PaintGesture>,
    draw_mode: Cell<DrawMode>,
    running: Cell<bool>,
    /// Identifies the newest `run` loop; older loops exit when it changes
    run_token: Cell<u64>,
    sleep_time: Cell<Duration>,
    service_timeout: Option<Duration>,
}

impl<S: LifeService> SimulationController<S> {
    /// Create a controller with no board built yet
    pub fn new(service: S, config: &SimulationConfig) -> Self {
        Self {
            service,
            grid: RefCell::new(Grid::new()),
            gesture: Cell::new(PaintGesture::new()),
            draw_mode: Cell::new(config.draw_mode),
            running: Cell::new(false),
            run_token: Cell::new(0),
            sleep_time: Cell::new(config.sleep_time),
            service_timeout: config.service_timeout,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Read access to the board. Drop the guard before awaiting anything
    /// on this controller.
    pub fn grid(&self) -> Ref<'_, Grid> {
        self.grid.borrow()
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode.get()
    }

    pub fn set_draw_mode(&self, mode: DrawMode) {
        self.draw_mode.set(mode);
    }

    pub fn toggle_draw_mode(&self) -> DrawMode {
        let mode = self.draw_mode.get().toggled();
        self.draw_mode.set(mode);
        mode
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.get().phase()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn sleep_time(&self) -> Duration {
        self.sleep_time.get()
    }

    /// Change the delay between automatic steps. Takes effect at the next
    /// delay; a negative value is rejected and the old one kept.
    pub fn set_sleep_time(&self, millis: i64) -> Result<(), InvalidArgument> {
        self.sleep_time.set(sleep_time_from_millis(millis)?);
        Ok(())
    }

    /// Await a service call, bounded by the configured timeout
    async fn call<T>(
        &self,
        request: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ServiceError> {
        match self.service_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| ServiceError::Timeout(limit))?,
            None => request.await,
        }
    }

    /// Replace the board with a fresh one of `size`, all cells dead.
    ///
    /// With an authoritative service the ids come from the service and are
    /// adopted as they are. Arguments are checked before anything is sent.
    pub async fn create_board(&self, size: BoardSize, cell_size: u32) -> Result<(), SimulationError> {
        size.validate()?;
        validate_cell_size(cell_size)?;
        let start = Instant::now();

        if S::AUTHORITATIVE {
            let records = self
                .call(self.service.create_board(size))
                .await
                .inspect_err(|err| warn!("create_board failed, board left as is: {err}"))?;

            self.grid
                .borrow_mut()
                .adopt_board(size, cell_size, &records)
                .map_err(|err| {
                    warn!("service returned an unusable board: {err}");
                    ServiceError::Malformed(err.to_string())
                })?;
        } else {
            self.grid.borrow_mut().create_board(size, cell_size)?;
        }

        let mut gesture = self.gesture.get();
        gesture.reset();
        self.gesture.set(gesture);
        info!("built {size} board in {:?}", start.elapsed());
        Ok(())
    }

    /// Set every cell dead. An authoritative service has to acknowledge
    /// first; on failure the local board is left untouched.
    pub async fn kill_board(&self) -> Result<(), SimulationError> {
        let start = Instant::now();

        if S::AUTHORITATIVE {
            self.call(self.service.kill_board())
                .await
                .inspect_err(|err| warn!("kill_board failed, board left as is: {err}"))?;
        }

        self.grid.borrow_mut().kill_all();
        info!("killed board in {:?}", start.elapsed());
        Ok(())
    }

    /// Set one cell through the board's mutation entry point.
    ///
    /// Returns `false` when the change was not applied: the service refused
    /// it, or the board was rebuilt, cleared or randomized while the
    /// acknowledgement was pending.
    pub async fn paint(&self, coord: Coord, state: CellState) -> Result<bool, SimulationError> {
        let (id, version) = {
            let grid = self.grid.borrow();
            let id = grid.id_at(coord).ok_or(GridError::OutOfBounds(coord))?;
            (id, grid.version())
        };
        let alive = state.is_alive();

        if S::AUTHORITATIVE {
            let update = self
                .call(self.service.update_cell_state(id, alive))
                .await
                .inspect_err(|err| warn!("update of cell {coord} failed: {err}"))?;

            if !update.applied || update.id != id {
                warn!("update of cell {coord} was not acknowledged");
                return Ok(false);
            }
        }

        let mut grid = self.grid.borrow_mut();
        if grid.version() != version {
            debug!("board rewritten before the update of {coord} landed");
            return Ok(false);
        }
        grid.set_alive(id, alive)?;
        debug!("cell {coord} -> {state:?}");
        Ok(true)
    }

    /// Flip one cell
    pub async fn toggle(&self, coord: Coord) -> Result<CellState, SimulationError> {
        let next = self.state_at(coord)?.toggle();
        self.paint(coord, next).await?;
        Ok(next)
    }

    fn state_at(&self, coord: Coord) -> Result<CellState, GridError> {
        self.grid
            .borrow()
            .cell_at(coord)
            .map(|cell| cell.state())
            .ok_or(GridError::OutOfBounds(coord))
    }

    /// Feed a pointer event through the paint gesture. Returns the state the
    /// touched cell was asked to take, if the event painted anything.
    pub async fn pointer(&self, event: PointerEvent) -> Result<Option<CellState>, SimulationError> {
        let mut gesture = self.gesture.get();
        let stroke = gesture.handle(event);
        self.gesture.set(gesture);

        match stroke {
            Some(stroke) => self.apply_stroke(stroke).await.map(Some),
            None => Ok(None),
        }
    }

    async fn apply_stroke(&self, stroke: Stroke) -> Result<CellState, SimulationError> {
        let coord = stroke.coord();
        let current = self.state_at(coord)?;
        let next = stroke.resolve(self.draw_mode.get(), current);

        // A drag over a cell already in the mode's state has nothing to send
        if next != current {
            self.paint(coord, next).await?;
        }
        Ok(next)
    }

    /// Advance one generation.
    ///
    /// The response is merged by id only if no board-wide write (rebuild,
    /// kill, randomize) happened while it was pending. A failed or malformed
    /// response leaves the grid as it was before the step.
    ///
    /// Single-cell paints landing while the response is pending are not
    /// tracked: the response wins for every cell it names.
    pub async fn step(&self) -> Result<StepOutcome, SimulationError> {
        let (version, snapshot) = {
            let grid = self.grid.borrow();
            // An authoritative service evolves its own copy
            let snapshot = if S::AUTHORITATIVE { Vec::new() } else { grid.snapshot() };
            (grid.version(), snapshot)
        };

        let outcomes = self
            .call(self.service.compute_next_generation(&snapshot))
            .await
            .inspect_err(|err| warn!("step failed, grid left as is: {err}"))?;

        let mut grid = self.grid.borrow_mut();
        if grid.version() != version {
            warn!("discarding a generation computed before the board was rewritten");
            return Ok(StepOutcome::Discarded);
        }

        let changed = grid.apply_generation(&outcomes).map_err(|err| {
            warn!("step failed, grid left as is: {err}");
            ServiceError::Malformed(err.to_string())
        })?;

        let generation = grid.generation();
        debug!("generation {generation}: {changed} cells changed");
        Ok(StepOutcome::Applied { generation, changed })
    }

    /// Step continuously until `stop` is called.
    ///
    /// Each iteration awaits one step and then the current sleep time. The
    /// flag is checked before every step, so a `stop` that lands during a
    /// step or a delay prevents the next step, never the one in flight.
    /// Step failures are already reported by `step` and do not end the loop.
    /// Calling `run` again retires any older loop at its next check.
    pub async fn run(&self) {
        let token = self.run_token.get().wrapping_add(1);
        self.run_token.set(token);
        self.running.set(true);
        info!("simulation running, {:?} between steps", self.sleep_time.get());

        while self.running.get() && self.run_token.get() == token {
            // Already reported by step; the loop carries on
            if let Err(err) = self.step().await {
                debug!("run loop {token} absorbed a failed step: {err}");
            }
            tokio::time::sleep(self.sleep_time.get()).await;
        }

        debug!("run loop {token} finished");
    }

    /// Stop scheduling steps. Idempotent; an in-flight step and its delay
    /// still complete.
    pub fn stop(&self) {
        if self.running.replace(false) {
            info!("simulation stopped");
        }
    }

    /// Make each cell alive with probability `density`, through the same
    /// entry point as painting. Returns the number of live cells afterwards.
    ///
    /// With an authoritative service every cell is sent separately; if one
    /// update fails the cells already acknowledged keep their new state.
    pub async fn randomize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        density: f64,
    ) -> Result<usize, SimulationError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(InvalidArgument::Density(density).into());
        }

        if !S::AUTHORITATIVE {
            let mut grid = self.grid.borrow_mut();
            grid.randomize(rng, density)?;
            return Ok(grid.alive_count());
        }

        let coords: Vec<Coord> = self.grid.borrow().cells().iter().map(|cell| cell.coord()).collect();
        for coord in coords {
            let state = CellState::from(rng.random_bool(density));
            self.paint(coord, state).await?;
        }
        Ok(self.grid.borrow().alive_count())
    }
}
