//! Raw per-frame input and the pointer gesture recognizer built on top of it.

mod gesture;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use gesture::{GestureButton, GestureTracker};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; containment is half-open on the far edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.w
            && point.y >= self.y
            && point.y < self.y + self.h
    }
}

/// Pointer buttons tracked by the gesture recognizer, in bitmask order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left = 0,
    Middle = 1,
    Right = 2,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [
        MouseButton::Left,
        MouseButton::Middle,
        MouseButton::Right,
    ];

    pub fn bit(self) -> u8 {
        1 << self as u8
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Up, Down, Left, Right,
    Escape, Enter, Space, Tab, Backspace, Grave,
    Insert, Delete, PageUp, PageDown, Home, End,
    Shift, Ctrl, Alt,
}

/// Snapshot of the input devices for one frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    pub mouse_buttons: u8,
    pub mouse: Point,
    /// Virtual gamepad bits, filled in by the shell from the keymap.
    pub gamepad: u8,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as held and, if it was not held before, as pressed this frame.
    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Forgets the one-shot presses; call once the frame has been processed.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    pub fn key(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn key_pressed_once(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn any_key_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    pub fn set_mouse(&mut self, position: Point, buttons: u8) {
        self.mouse = position;
        self.mouse_buttons = buttons;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10, 10, 5, 5);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(14, 14)));
        assert!(!rect.contains(Point::new(15, 12)));
        assert!(!rect.contains(Point::new(12, 15)));
        assert!(!rect.contains(Point::new(9, 12)));
    }

    #[test]
    fn key_press_is_reported_once() {
        let mut input = InputState::new();
        input.press(Key::F8);
        assert!(input.key(Key::F8));
        assert!(input.key_pressed_once(Key::F8));

        input.end_frame();
        input.press(Key::F8);
        assert!(input.key(Key::F8));
        assert!(!input.key_pressed_once(Key::F8));

        input.release(Key::F8);
        input.press(Key::F8);
        assert!(input.key_pressed_once(Key::F8));
    }
}
