use crate::domain::{CellState, Coord};

/// What a paint gesture writes into the cells it touches
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DrawMode {
    #[default]
    Alive,
    Dead,
}

impl DrawMode {
    /// State a drag forces every cell into
    pub const fn target(self) -> CellState {
        match self {
            DrawMode::Alive => CellState::Alive,
            DrawMode::Dead => CellState::Dead,
        }
    }

    /// State the first cell of a gesture takes. A cell already in the
    /// target state is flipped instead, so the press always shows feedback.
    pub const fn press_result(self, current: CellState) -> CellState {
        let target = self.target();
        if current.is_alive() == target.is_alive() {
            current.toggle()
        } else {
            target
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            DrawMode::Alive => DrawMode::Dead,
            DrawMode::Dead => DrawMode::Alive,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            DrawMode::Alive => "Draw",
            DrawMode::Dead => "Erase",
        }
    }
}

/// Pointer activity over the board, already resolved to cell coordinates
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PointerEvent {
    /// Primary button went down over a cell
    Press(Coord),
    /// Pointer moved onto the board area
    Enter { primary_held: bool },
    /// Pointer moved onto a cell
    Over(Coord),
    /// Primary button came up
    Release,
    /// Pointer moved off the board area
    Leave,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Painting,
}

/// Cell mutation requested by a gesture
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stroke {
    /// First cell of a gesture: toggle-if-matching
    Press(Coord),
    /// Any later cell: force to the draw mode
    Drag(Coord),
}

impl Stroke {
    pub const fn coord(self) -> Coord {
        match self {
            Stroke::Press(coord) | Stroke::Drag(coord) => coord,
        }
    }

    /// Resulting state for a cell currently in `current`
    pub const fn resolve(self, mode: DrawMode, current: CellState) -> CellState {
        match self {
            Stroke::Press(_) => mode.press_result(current),
            Stroke::Drag(_) => mode.target(),
        }
    }
}

/// Free-hand paint state machine: Idle until the primary button goes down
/// over a cell (or the pointer enters with it held), Painting until release
/// or leaving the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PaintGesture {
    phase: GesturePhase,
}

impl PaintGesture {
    pub const fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
        }
    }

    pub const fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub const fn is_painting(&self) -> bool {
        matches!(self.phase, GesturePhase::Painting)
    }

    /// Feed one event, returning the stroke it produces, if any
    pub fn handle(&mut self, event: PointerEvent) -> Option<Stroke> {
        match event {
            PointerEvent::Press(coord) => {
                self.phase = GesturePhase::Painting;
                Some(Stroke::Press(coord))
            }
            PointerEvent::Enter { primary_held } => {
                if primary_held {
                    self.phase = GesturePhase::Painting;
                }
                None
            }
            PointerEvent::Over(coord) => self.is_painting().then_some(Stroke::Drag(coord)),
            PointerEvent::Release | PointerEvent::Leave => {
                self.phase = GesturePhase::Idle;
                None
            }
        }
    }

    /// Drop any gesture in progress
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Coord = Coord::new(0, 0);
    const B: Coord = Coord::new(1, 0);

    #[test]
    fn test_press_sets_when_state_differs() {
        assert_eq!(DrawMode::Alive.press_result(CellState::Dead), CellState::Alive);
        assert_eq!(DrawMode::Dead.press_result(CellState::Alive), CellState::Dead);
    }

    #[test]
    fn test_press_toggles_when_state_matches() {
        assert_eq!(DrawMode::Alive.press_result(CellState::Alive), CellState::Dead);
        assert_eq!(DrawMode::Dead.press_result(CellState::Dead), CellState::Alive);
    }

    #[test]
    fn test_drag_always_forces_mode() {
        for current in [CellState::Alive, CellState::Dead] {
            assert_eq!(Stroke::Drag(A).resolve(DrawMode::Alive, current), CellState::Alive);
            assert_eq!(Stroke::Drag(A).resolve(DrawMode::Dead, current), CellState::Dead);
        }
    }

    #[test]
    fn test_hover_while_idle_does_nothing() {
        let mut gesture = PaintGesture::new();
        assert_eq!(gesture.handle(PointerEvent::Over(A)), None);
        assert_eq!(gesture.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_press_then_drag_then_release() {
        let mut gesture = PaintGesture::new();

        assert_eq!(gesture.handle(PointerEvent::Press(A)), Some(Stroke::Press(A)));
        assert!(gesture.is_painting());
        assert_eq!(gesture.handle(PointerEvent::Over(B)), Some(Stroke::Drag(B)));
        assert_eq!(gesture.handle(PointerEvent::Over(A)), Some(Stroke::Drag(A)));

        assert_eq!(gesture.handle(PointerEvent::Release), None);
        assert_eq!(gesture.handle(PointerEvent::Over(B)), None);
    }

    #[test]
    fn test_enter_with_button_held_starts_painting() {
        let mut gesture = PaintGesture::new();

        assert_eq!(gesture.handle(PointerEvent::Enter { primary_held: false }), None);
        assert!(!gesture.is_painting());

        assert_eq!(gesture.handle(PointerEvent::Enter { primary_held: true }), None);
        assert!(gesture.is_painting());
        assert_eq!(gesture.handle(PointerEvent::Over(B)), Some(Stroke::Drag(B)));
    }

    #[test]
    fn test_leave_ends_painting() {
        let mut gesture = PaintGesture::new();
        gesture.handle(PointerEvent::Press(A));
        gesture.handle(PointerEvent::Leave);
        assert_eq!(gesture.phase(), GesturePhase::Idle);
        assert_eq!(gesture.handle(PointerEvent::Over(A)), None);
    }

    #[test]
    fn test_reset_ends_painting() {
        let mut gesture = PaintGesture::new();
        gesture.handle(PointerEvent::Enter { primary_held: true });
        gesture.reset();
        assert!(!gesture.is_painting());
        assert_eq!(gesture.handle(PointerEvent::Over(B)), None);
        assert_eq!(gesture.handle(PointerEvent::Press(B)), Some(Stroke::Press(B)));
    }
}
