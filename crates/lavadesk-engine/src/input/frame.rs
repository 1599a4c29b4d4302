use std::collections::HashSet;

use super::types::Key;

/// Per-frame input deltas.
///
/// `InputState` holds what is down right now; `InputFrame` collects what
/// happened since the previous frame and is cleared after every frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys that went down this frame.
    pub keys_pressed: HashSet<Key>,

    /// Accumulated relative mouse motion (x right, y down).
    pub mouse_delta: (f32, f32),

    /// Accumulated vertical wheel movement in line units.
    pub scroll_lines: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll_lines = 0.0;
    }

    /// True if `key` went down at any point during this frame, even if it was
    /// released again before the frame was drawn.
    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
