use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current input state for the window.
///
/// Holds focus and "is down" information. Per-frame transitions are recorded
/// into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                }
            }

            InputEvent::MouseMotion { dx, dy } => {
                frame.mouse_delta.0 += dx;
                frame.mouse_delta.1 += dy;
            }

            InputEvent::MouseWheel(delta) => {
                frame.scroll_lines += delta.lines_y();
            }

            InputEvent::Key { key, state } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(key) {
                        frame.keys_pressed.insert(key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state }
    }

    // ── keys ─────────────────────────────────────────────────────────────

    #[test]
    fn press_is_recorded_once_per_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        // The second press is a platform auto-repeat.
        state.apply_event(&mut frame, key(Key::P, KeyState::Pressed));
        state.apply_event(&mut frame, key(Key::P, KeyState::Pressed));

        assert!(state.key_down(Key::P));
        assert!(frame.pressed(Key::P));
        assert_eq!(frame.keys_pressed.len(), 1);

        frame.clear();
        state.apply_event(&mut frame, key(Key::P, KeyState::Pressed));
        assert!(!frame.pressed(Key::P), "held key reported as a new press");
    }

    #[test]
    fn tap_within_one_frame_still_reports_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::O, KeyState::Pressed));
        state.apply_event(&mut frame, key(Key::O, KeyState::Released));

        assert!(!state.key_down(Key::O));
        assert!(frame.pressed(Key::O));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::L, KeyState::Released));
        assert!(!state.key_down(Key::L));
        assert!(frame.keys_pressed.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::W, KeyState::Pressed));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.key_down(Key::W));
    }

    // ── mouse ────────────────────────────────────────────────────────────

    #[test]
    fn motion_and_scroll_accumulate_until_cleared() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::MouseMotion { dx: 2.0, dy: -1.0 });
        state.apply_event(&mut frame, InputEvent::MouseMotion { dx: 3.0, dy: 4.0 });
        state.apply_event(&mut frame, InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: 1.0 }));
        state.apply_event(
            &mut frame,
            InputEvent::MouseWheel(MouseWheelDelta::Pixel { x: 0.0, y: 80.0 }),
        );

        assert_eq!(frame.mouse_delta, (5.0, 3.0));
        assert_eq!(frame.scroll_lines, 3.0);

        frame.clear();
        assert_eq!(frame.mouse_delta, (0.0, 0.0));
        assert_eq!(frame.scroll_lines, 0.0);
    }
}
