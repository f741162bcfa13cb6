use super::{MouseButton, Point, Rect};

/// Press/release state machine for a single pointer button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureButton {
    pub down: bool,
    /// One-shot latch set on release, cleared on claim or at the next update.
    pub click: bool,
    pub start: Point,
    pub end: Point,
}

/// Turns raw button bitmasks into press, drag and click gestures.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    buttons: [GestureButton; 3],
    position: Point,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances every button with this frame's bitmask and pointer position.
    ///
    /// Click latches left over from the previous frame are dropped first, so an
    /// unclaimed click never survives into the next frame.
    pub fn update(&mut self, pressed: u8, position: Point) {
        self.position = position;

        for state in &mut self.buttons {
            state.click = false;
        }

        for button in MouseButton::ALL {
            let state = &mut self.buttons[button as usize];
            let is_set = pressed & button.bit() != 0;

            if !state.down && is_set {
                state.down = true;
                state.start = position;
            } else if state.down && !is_set {
                state.end = position;
                state.click = true;
                state.down = false;
            }
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn button(&self, button: MouseButton) -> &GestureButton {
        &self.buttons[button as usize]
    }

    pub fn is_over(&self, rect: &Rect) -> bool {
        rect.contains(self.position)
    }

    /// True while `button` is held and its press started inside `rect`.
    pub fn is_down(&self, rect: &Rect, button: MouseButton) -> bool {
        let state = &self.buttons[button as usize];
        state.down && rect.contains(state.start)
    }

    /// Claims a completed click whose press and release both fall inside
    /// `rect`. The first successful caller consumes it.
    pub fn was_clicked(&mut self, rect: &Rect, button: MouseButton) -> bool {
        let state = &mut self.buttons[button as usize];
        let clicked = state.click && rect.contains(state.start) && rect.contains(state.end);

        if clicked {
            state.click = false;
        }

        clicked
    }
}
