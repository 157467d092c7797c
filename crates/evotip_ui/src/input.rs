//! Per-frame input snapshot.
//!
//! The host copies its pointer position and this frame's button and key
//! presses in here once per display frame; the overlay only reads it.
//! Held state is not tracked: popups react to presses only.

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; opens drill-down popups.
    Left,
    /// Secondary button.
    Right,
}

impl MouseButton {
    const fn mask(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Right => 2,
        }
    }
}

/// Keyboard keys the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Closes every open popup.
    Escape,
}

/// Pointer position plus the presses seen this frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: (f32, f32),
    clicked: u8,
    keys: Vec<Key>,
}

impl InputState {
    /// Creates an empty snapshot with the pointer at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame. The pointer position carries over.
    pub fn begin_frame(&mut self) {
        self.clicked = 0;
        self.keys.clear();
    }

    /// Sets the pointer position in screen pixels.
    pub fn set_mouse_pos(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
    }

    /// Records a button press this frame.
    pub fn mouse_button_down(&mut self, button: MouseButton) {
        self.clicked |= button.mask();
    }

    /// Records a key press this frame.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    /// Returns true if `button` was pressed this frame.
    #[must_use]
    pub fn mouse_clicked(&self, button: MouseButton) -> bool {
        self.clicked & button.mask() != 0
    }

    /// Returns true if `key` was pressed this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Current pointer position.
    #[must_use]
    pub fn mouse_pos(&self) -> (f32, f32) {
        self.pointer
    }
}
