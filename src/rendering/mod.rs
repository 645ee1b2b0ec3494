use crate::domain::Grid;
use crate::input::{Command, DrawMode};
use crate::ui::{Button, Dropdown, PANEL_WIDTH, board_area_height, board_area_width, panel_x};
use macroquad::prelude::*;
use std::time::Duration;

const ALIVE: Color = Color::new(0.0, 1.0, 0.59, 1.0);
const DEAD: Color = Color::new(0.06, 0.06, 0.06, 1.0);
const GRID_LINE: Color = Color::new(0.16, 0.16, 0.16, 1.0);
const MUTED: Color = Color::new(0.6, 0.6, 0.6, 1.0);

/// What the panel shows besides its widgets
pub struct PanelInfo<'a> {
    pub grid: &'a Grid,
    pub running: bool,
    pub sleep_time: Duration,
    pub draw_mode: DrawMode,
    /// Birth/survival summary of the active rule
    pub rule: &'a str,
    /// Last failure reported to the user, if any
    pub status: Option<&'a str>,
}

/// Draw every cell of the board with its top-left corner at `origin`
pub fn draw_board(grid: &Grid, origin: (f32, f32)) {
    let size = grid.cell_size() as f32;
    let lines = size >= 4.0;
    let (max_x, max_y) = (board_area_width(), board_area_height());

    for cell in grid.cells() {
        let x = origin.0 + cell.x() as f32 * size;
        let y = origin.1 + cell.y() as f32 * size;
        if x > max_x || y > max_y {
            continue;
        }

        let fill = if cell.is_alive() { ALIVE } else { DEAD };
        draw_rectangle(x, y, size, size, fill);
        if lines {
            draw_rectangle_lines(x, y, size, size, 1.0, GRID_LINE);
        }
    }
}

fn draw_panel_background() {
    draw_rectangle(panel_x(), 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(30, 30, 30, 255));
}

/// Draw the control panel: buttons, board info and the size dropdown
pub fn draw_controls(info: &PanelInfo<'_>, buttons: &[Button], dropdown: &Dropdown, mouse_pos: (f32, f32)) {
    draw_panel_background();

    for button in buttons {
        let active = match button.command() {
            Command::PlayPause => info.running,
            Command::ToggleDrawMode => info.draw_mode == DrawMode::Dead,
            _ => false,
        };
        button.draw(mouse_pos, active);
    }

    let px = panel_x();
    let (width, height) = info.grid.dimensions();
    let (status, status_color) = if info.running {
        ("Running", GREEN)
    } else {
        ("Paused", ORANGE)
    };

    let labels = [
        (format!("Board: {width}x{height}"), 330.0, 14.0, MUTED),
        (format!("Rule: {}", info.rule), 348.0, 14.0, MUTED),
        (format!("Alive: {}", info.grid.alive_count()), 366.0, 14.0, MUTED),
        ("Generation:".to_owned(), 400.0, 16.0, WHITE),
        (info.grid.generation().to_string(), 420.0, 20.0, ALIVE),
        ("Status:".to_owned(), 450.0, 16.0, WHITE),
        (status.to_owned(), 470.0, 16.0, status_color),
        (format!("Step every {} ms", info.sleep_time.as_millis()), 500.0, 14.0, MUTED),
        (format!("Mode: {}", info.draw_mode.name()), 518.0, 14.0, MUTED),
    ];
    for (text, y, size, color) in &labels {
        draw_text(text, px, *y, *size, *color);
    }

    let help = ["LMB: paint", "Space: play", "S: step  C: clear", "R: random  E: mode", "Up/Down: speed"];
    for (row, line) in help.iter().enumerate() {
        draw_text(line, px, 550.0 + row as f32 * 14.0, 12.0, GRAY);
    }

    if let Some(message) = info.status {
        draw_text(message, px, 630.0, 12.0, RED);
    }

    // Last so an open list covers everything else
    dropdown.draw(mouse_pos);
}
