use macroquad::prelude::*;

const ROW_HEIGHT: f32 = 30.0;
const FONT_SIZE: f32 = 16.0;

/// Single-choice selector that opens a list below itself
#[derive(Clone, Debug)]
pub struct Dropdown {
    x: f32,
    y: f32,
    width: f32,
    label: String,
    items: Vec<String>,
    selected: usize,
    open: bool,
}

impl Dropdown {
    pub fn new(x: f32, y: f32, width: f32, label: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            x,
            y,
            width,
            label: label.into(),
            items,
            selected: 0,
            open: false,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Out-of-range indices are ignored
    pub fn set_selected(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    fn header(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, ROW_HEIGHT)
    }

    fn row(&self, index: usize) -> Rect {
        Rect::new(self.x, self.y + ROW_HEIGHT * (index as f32 + 1.0), self.width, ROW_HEIGHT)
    }

    /// Index of the open list row under `mouse_pos`
    fn item_at(&self, mouse_pos: (f32, f32)) -> Option<usize> {
        let point = vec2(mouse_pos.0, mouse_pos.1);
        (0..self.items.len()).find(|&index| self.row(index).contains(point))
    }

    /// Feed a left click. Returns true when the selection changed.
    pub fn click(&mut self, mouse_pos: (f32, f32)) -> bool {
        if self.header().contains(vec2(mouse_pos.0, mouse_pos.1)) {
            self.open = !self.open;
            return false;
        }
        if !self.open {
            return false;
        }

        self.open = false;
        match self.item_at(mouse_pos) {
            Some(index) if index != self.selected => {
                self.selected = index;
                true
            }
            _ => false,
        }
    }

    /// Handle this frame's mouse input
    pub fn update(&mut self, mouse_pos: (f32, f32)) -> bool {
        is_mouse_button_pressed(MouseButton::Left) && self.click(mouse_pos)
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let point = vec2(mouse_pos.0, mouse_pos.1);
        let header = self.header();
        let fill = if header.contains(point) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };

        draw_text(&self.label, self.x, self.y - 5.0, 14.0, GRAY);
        draw_rectangle(header.x, header.y, header.w, header.h, fill);
        draw_rectangle_lines(header.x, header.y, header.w, header.h, 2.0, WHITE);
        if let Some(text) = self.items.get(self.selected) {
            draw_text(text, header.x + 5.0, header.y + 21.0, FONT_SIZE, WHITE);
        }
        draw_text("v", header.x + header.w - 16.0, header.y + 20.0, FONT_SIZE, WHITE);

        if !self.open {
            return;
        }

        for (index, item) in self.items.iter().enumerate() {
            let row = self.row(index);
            let fill = if row.contains(point) {
                Color::from_rgba(100, 149, 237, 255)
            } else if index == self.selected {
                Color::from_rgba(50, 100, 150, 255)
            } else {
                Color::from_rgba(45, 45, 45, 255)
            };
            draw_rectangle(row.x, row.y, row.w, row.h, fill);
            draw_rectangle_lines(row.x, row.y, row.w, row.h, 1.0, Color::from_rgba(80, 80, 80, 255));
            draw_text(item, row.x + 5.0, row.y + 21.0, FONT_SIZE, WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes() -> Dropdown {
        let items = ["20", "50", "100"].iter().map(|s| s.to_string()).collect();
        Dropdown::new(0.0, 100.0, 120.0, "Board", items)
    }

    #[test]
    fn test_header_click_toggles_open() {
        let mut dropdown = sizes();
        assert!(!dropdown.click((10.0, 110.0)));
        assert!(dropdown.is_open());
        assert!(!dropdown.click((10.0, 110.0)));
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_picking_a_row_changes_selection() {
        let mut dropdown = sizes();
        dropdown.click((10.0, 110.0));

        // Third row sits two rows below the first
        assert!(dropdown.click((10.0, 100.0 + ROW_HEIGHT * 3.0 + 5.0)));
        assert_eq!(dropdown.selected(), 2);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_rows_ignored_while_closed() {
        let mut dropdown = sizes();
        assert!(!dropdown.click((10.0, 100.0 + ROW_HEIGHT + 5.0)));
        assert_eq!(dropdown.selected(), 0);
    }

    #[test]
    fn test_click_outside_closes_without_change() {
        let mut dropdown = sizes();
        dropdown.click((10.0, 110.0));
        assert!(!dropdown.click((500.0, 500.0)));
        assert!(!dropdown.is_open());
        dropdown.set_selected(7);
        assert_eq!(dropdown.selected(), 0);
    }
}
