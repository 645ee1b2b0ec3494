mod button;
mod dropdown;

pub use button::Button;
pub use dropdown::Dropdown;

use crate::domain::BoardSize;
use crate::input::Command;
use macroquad::prelude::{Rect, screen_height, screen_width};

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 36.0;
/// Gap between the window edge and the board
pub const BOARD_MARGIN: f32 = 10.0;

/// X position where the control panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Width available to the board
pub fn board_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

pub fn board_area_height() -> f32 {
    screen_height()
}

/// Board sizes offered in the panel
pub const GRID_SIZES: &[(BoardSize, &str)] = &[
    (BoardSize::new(20, 20), "20x20"),
    (BoardSize::new(50, 50), "50x50"),
    (BoardSize::new(80, 60), "80x60"),
    (BoardSize::new(100, 100), "100x100"),
    (BoardSize::new(150, 150), "150x150"),
];

/// Position of `size` in `GRID_SIZES`, if offered
pub fn grid_size_index(size: BoardSize) -> Option<usize> {
    GRID_SIZES.iter().position(|&(offered, _)| offered == size)
}

/// Cell size that fits `size` into the board area, never above `preferred`
pub fn fitting_cell_size(size: BoardSize, preferred: u32, area: (f32, f32)) -> u32 {
    let usable = (area.0 - 2.0 * BOARD_MARGIN, area.1 - 2.0 * BOARD_MARGIN);
    let fit_x = usable.0 / size.width.max(1) as f32;
    let fit_y = usable.1 / size.height.max(1) as f32;
    (fit_x.min(fit_y).floor() as u32).clamp(1, preferred.max(1))
}

/// Panel buttons in display order
pub fn create_buttons() -> Vec<Button> {
    let px = panel_x();
    let layout = [
        ("Play", Command::PlayPause),
        ("Step", Command::Step),
        ("Clear", Command::Clear),
        ("Random", Command::Randomize),
        ("Draw", Command::ToggleDrawMode),
    ];

    layout
        .into_iter()
        .enumerate()
        .map(|(row, (label, command))| {
            let y = 90.0 + row as f32 * (BUTTON_HEIGHT + 8.0);
            Button::new(Rect::new(px, y, PANEL_WIDTH - 10.0, BUTTON_HEIGHT), label, command)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_lookup() {
        assert_eq!(grid_size_index(BoardSize::new(50, 50)), Some(1));
        assert_eq!(grid_size_index(BoardSize::new(51, 50)), None);
    }

    #[test]
    fn test_fitting_cell_size() {
        // 500 usable pixels for 50 cells
        assert_eq!(fitting_cell_size(BoardSize::new(50, 50), 12, (520.0, 900.0)), 10);
        assert_eq!(fitting_cell_size(BoardSize::new(20, 20), 12, (520.0, 900.0)), 12);
        assert_eq!(fitting_cell_size(BoardSize::new(5000, 10), 12, (520.0, 900.0)), 1);
    }
}
