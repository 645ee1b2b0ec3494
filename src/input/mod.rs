mod gesture;

pub use gesture::{DrawMode, GesturePhase, PaintGesture, PointerEvent, Stroke};

use crate::domain::{BoardSize, Coord};
use crate::ui::Button;
use macroquad::prelude::*;

/// User intent from a key or a button, applied by the frame loop
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    PlayPause,
    Step,
    Clear,
    Randomize,
    ToggleDrawMode,
    Faster,
    Slower,
}

/// Mouse state for one frame, already mapped onto the board
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PointerSample {
    /// Cell under the pointer, `None` when off the board
    pub cell: Option<Coord>,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
}

/// Turns per-frame samples into the enter/over/leave events a paint
/// gesture expects. `Over` is only reported when the cell changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    inside: bool,
    last_cell: Option<Coord>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, sample: PointerSample) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        match (self.inside, sample.cell) {
            (false, Some(_)) => events.push(PointerEvent::Enter {
                primary_held: sample.down && !sample.pressed,
            }),
            (true, None) => events.push(PointerEvent::Leave),
            _ => {}
        }

        if let Some(cell) = sample.cell {
            if sample.pressed {
                events.push(PointerEvent::Press(cell));
            } else if self.last_cell != Some(cell) {
                events.push(PointerEvent::Over(cell));
            }
        }

        if sample.released {
            events.push(PointerEvent::Release);
        }

        self.inside = sample.cell.is_some();
        self.last_cell = sample.cell;
        events
    }
}

/// Cell under a screen position for a board drawn at `origin`
pub fn cell_under(
    position: (f32, f32),
    origin: (f32, f32),
    cell_size: u32,
    size: BoardSize,
    max_x: f32,
) -> Option<Coord> {
    let (x, y) = (position.0 - origin.0, position.1 - origin.1);
    if x < 0.0 || y < 0.0 || position.0 >= max_x || cell_size == 0 {
        return None;
    }

    let coord = Coord::new(
        (x / cell_size as f32) as u32,
        (y / cell_size as f32) as u32,
    );
    size.contains(coord).then_some(coord)
}

/// Sample the primary mouse button over the board
pub fn sample_pointer(origin: (f32, f32), cell_size: u32, size: BoardSize) -> PointerSample {
    PointerSample {
        cell: cell_under(
            mouse_position(),
            origin,
            cell_size,
            size,
            crate::ui::board_area_width(),
        ),
        pressed: is_mouse_button_pressed(MouseButton::Left),
        down: is_mouse_button_down(MouseButton::Left),
        released: is_mouse_button_released(MouseButton::Left),
    }
}

/// Commands from the keyboard this frame
pub fn keyboard_commands() -> Vec<Command> {
    const KEYS: [(KeyCode, Command); 7] = [
        (KeyCode::Space, Command::PlayPause),
        (KeyCode::S, Command::Step),
        (KeyCode::C, Command::Clear),
        (KeyCode::R, Command::Randomize),
        (KeyCode::E, Command::ToggleDrawMode),
        (KeyCode::Up, Command::Faster),
        (KeyCode::Down, Command::Slower),
    ];

    KEYS.iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|&(_, command)| command)
        .collect()
}

/// Commands from buttons clicked this frame
pub fn button_commands(buttons: &[Button], mouse_pos: (f32, f32)) -> Vec<Command> {
    buttons
        .iter()
        .filter(|button| button.is_clicked(mouse_pos))
        .map(Button::command)
        .collect()
}
