use clap::{Parser, ValueEnum};
use life_board::{
    BoardServer, BoardSize, DrawMode, LifeService, LocalRules, SimulationConfig, SimulationController,
    SimulationError,
    application::{DEFAULT_BOARD, DEFAULT_CELL_SIZE, DEFAULT_SLEEP_TIME},
    domain::{rule_by_name, validate_cell_size},
    input::{self, Command, PointerTracker},
    rendering::{self, PanelInfo},
    ui::{self, BOARD_MARGIN, Dropdown, GRID_SIZES},
};
use log::{error, info, warn};
use macroquad::prelude::*;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

/// Sleep time change per Up/Down press
const SLEEP_STEP_MS: i64 = 25;
/// Live share used by the Random button
const RANDOM_DENSITY: f64 = 0.3;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RuleArg {
    Conway,
    Highlife,
}

impl RuleArg {
    fn name(self) -> &'static str {
        match self {
            RuleArg::Conway => "conway",
            RuleArg::Highlife => "highlife",
        }
    }
}

/// Interactive Game of Life board
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_BOARD.width)]
    width: u32,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_BOARD.height)]
    height: u32,

    /// Largest on-screen cell size in pixels
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    cell_size: u32,

    /// Delay between automatic steps
    #[arg(long, default_value_t = DEFAULT_SLEEP_TIME.as_millis() as i64, allow_negative_numbers = true)]
    sleep_ms: i64,

    #[arg(long, value_enum, default_value_t = RuleArg::Conway)]
    rule: RuleArg,

    /// Start in erase mode: presses and drags paint dead cells
    #[arg(long)]
    erase: bool,

    /// Keep the canonical board in a separate board server
    #[arg(long)]
    authoritative: bool,

    /// Give up on a service call after this long
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl Args {
    fn config(&self) -> Result<SimulationConfig, SimulationError> {
        let board = BoardSize::new(self.width, self.height);
        board.validate()?;
        validate_cell_size(self.cell_size)?;

        let draw_mode = if self.erase { DrawMode::Dead } else { DrawMode::Alive };
        Ok(SimulationConfig::default()
            .with_board(board)
            .with_draw_mode(draw_mode)
            .with_cell_size(self.cell_size)
            .with_sleep_time(self.sleep_ms)?
            .with_service_timeout(self.timeout_ms.map(Duration::from_millis)))
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Game of Life".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match args.config() {
        Ok(config) => config,
        Err(err) => {
            error!("invalid arguments: {err}");
            return;
        }
    };
    let Some(rule) = rule_by_name(args.rule.name()) else {
        error!("unknown rule {}", args.rule.name());
        return;
    };
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("failed to start the async runtime: {err}");
            return;
        }
    };

    info!(
        "starting with a {} board, rule {}, {} service",
        config.board,
        rule.name(),
        if args.authoritative { "authoritative" } else { "local" }
    );

    let summary = rule.description();
    if args.authoritative {
        run_app(BoardServer::new(rule), &config, runtime, summary).await;
    } else {
        run_app(LocalRules::new(rule), &config, runtime, summary).await;
    }
}

/// Owns the runtime and the controller for the lifetime of the window
struct App<S> {
    controller: Rc<SimulationController<S>>,
    runtime: Runtime,
    local: LocalSet,
    preferred_cell_size: u32,
    rule: &'static str,
    status: Option<String>,
}

impl<S: LifeService + 'static> App<S> {
    /// Drive a controller future to completion, letting the run loop make
    /// progress while it waits
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.local.block_on(&self.runtime, future)
    }

    /// Give spawned work one turn without blocking the frame
    fn pump(&self) {
        self.block_on(tokio::task::yield_now());
    }

    fn report<T>(&mut self, result: Result<T, SimulationError>) {
        match result {
            Ok(_) => self.status = None,
            Err(err) => {
                warn!("{err}");
                self.status = Some(err.to_string());
            }
        }
    }

    fn build_board(&mut self, size: BoardSize) {
        let area = (ui::board_area_width(), ui::board_area_height());
        let cell_size = ui::fitting_cell_size(size, self.preferred_cell_size, area);
        let result = self.block_on(self.controller.create_board(size, cell_size));
        self.report(result);
    }

    fn start(&self) {
        let controller = Rc::clone(&self.controller);
        self.local.spawn_local(async move { controller.run().await });
    }

    fn apply(&mut self, command: Command) {
        let controller = Rc::clone(&self.controller);
        match command {
            Command::PlayPause if controller.is_running() => controller.stop(),
            Command::PlayPause => self.start(),
            Command::Step => {
                let result = self.block_on(controller.step());
                self.report(result);
            }
            Command::Clear => {
                let result = self.block_on(controller.kill_board());
                self.report(result);
            }
            Command::Randomize => {
                let result = self.block_on(controller.randomize(&mut ::rand::rng(), RANDOM_DENSITY));
                self.report(result);
            }
            Command::ToggleDrawMode => {
                controller.toggle_draw_mode();
            }
            Command::Faster | Command::Slower => {
                let delta = if command == Command::Faster { -SLEEP_STEP_MS } else { SLEEP_STEP_MS };
                let current = i64::try_from(controller.sleep_time().as_millis()).unwrap_or(i64::MAX);
                let result = controller.set_sleep_time(current.saturating_add(delta).max(0));
                self.report(result.map_err(SimulationError::from));
            }
        }
    }
}

async fn run_app<S: LifeService + 'static>(
    service: S,
    config: &SimulationConfig,
    runtime: Runtime,
    rule: &'static str,
) {
    let mut app = App {
        controller: Rc::new(SimulationController::new(service, config)),
        runtime,
        local: LocalSet::new(),
        preferred_cell_size: config.cell_size,
        rule,
        status: None,
    };
    app.build_board(config.board);

    let mut tracker = PointerTracker::new();
    let items = GRID_SIZES.iter().map(|(_, name)| name.to_string()).collect();
    let mut size_dropdown = Dropdown::new(ui::panel_x(), 40.0, ui::PANEL_WIDTH - 10.0, "Board size", items);
    if let Some(index) = ui::grid_size_index(config.board) {
        size_dropdown.set_selected(index);
    }

    loop {
        let mouse_pos = mouse_position();
        size_dropdown.set_position(ui::panel_x(), 40.0);
        // An open list covers the buttons; its clicks must not reach them
        let list_was_open = size_dropdown.is_open();

        if size_dropdown.update(mouse_pos) {
            if let Some(&(size, _)) = GRID_SIZES.get(size_dropdown.selected()) {
                app.build_board(size);
            }
        }

        let mut buttons = ui::create_buttons();
        for button in &mut buttons {
            match button.command() {
                Command::PlayPause if app.controller.is_running() => button.set_label("Pause"),
                Command::ToggleDrawMode => button.set_label(app.controller.draw_mode().name()),
                _ => {}
            }
        }

        let mut commands = if list_was_open {
            Vec::new()
        } else {
            input::button_commands(&buttons, mouse_pos)
        };
        commands.extend(input::keyboard_commands());
        for command in commands {
            app.apply(command);
        }

        let origin = (BOARD_MARGIN, BOARD_MARGIN);
        if !size_dropdown.is_open() {
            let (cell_size, size) = {
                let grid = app.controller.grid();
                (grid.cell_size(), grid.size())
            };
            for event in tracker.translate(input::sample_pointer(origin, cell_size, size)) {
                let result = app.block_on(app.controller.pointer(event));
                app.report(result);
            }
        }

        app.pump();

        clear_background(BLACK);
        {
            let grid = app.controller.grid();
            rendering::draw_board(&grid, origin);
            let info = PanelInfo {
                grid: &grid,
                running: app.controller.is_running(),
                sleep_time: app.controller.sleep_time(),
                draw_mode: app.controller.draw_mode(),
                rule: app.rule,
                status: app.status.as_deref(),
            };
            rendering::draw_controls(&info, &buttons, &size_dropdown, mouse_pos);
        }

        next_frame().await;
    }
}
