use crate::input::Command;
use macroquad::prelude::*;

const IDLE: Color = Color::new(0.27, 0.51, 0.71, 1.0);
const HOVER: Color = Color::new(0.39, 0.58, 0.93, 1.0);
const ACTIVE: Color = Color::new(0.18, 0.55, 0.34, 1.0);

/// Panel button bound to one command
#[derive(Clone, Debug)]
pub struct Button {
    rect: Rect,
    label: String,
    command: Command,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>, command: Command) -> Self {
        Self {
            rect,
            label: label.into(),
            command,
        }
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn contains(&self, mouse_pos: (f32, f32)) -> bool {
        self.rect.contains(vec2(mouse_pos.0, mouse_pos.1))
    }

    /// `active` highlights toggles that are currently on
    pub fn draw(&self, mouse_pos: (f32, f32), active: bool) {
        let fill = match (self.contains(mouse_pos), active) {
            (true, _) => HOVER,
            (false, true) => ACTIVE,
            (false, false) => IDLE,
        };
        let Rect { x, y, w, h } = self.rect;

        draw_rectangle(x, y, w, h, fill);
        draw_rectangle_lines(x, y, w, h, 2.0, WHITE);

        let text = measure_text(&self.label, None, 20, 1.0);
        draw_text(&self.label, x + (w - text.width) / 2.0, y + (h + text.height) / 2.0, 20.0, WHITE);
    }

    pub fn is_clicked(&self, mouse_pos: (f32, f32)) -> bool {
        self.contains(mouse_pos) && is_mouse_button_pressed(MouseButton::Left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_covers_the_button_rect() {
        let button = Button::new(Rect::new(10.0, 20.0, 100.0, 40.0), "Step", Command::Step);
        assert!(button.contains((10.0, 20.0)));
        assert!(button.contains((60.0, 40.0)));
        assert!(!button.contains((9.0, 40.0)));
        assert!(!button.contains((60.0, 61.0)));
        assert_eq!(button.command(), Command::Step);
    }
}
