use lavadesk_engine::core::AppControl;
use lavadesk_engine::input::{InputFrame, InputState, Key};

use crate::camera::CameraMovement;
use crate::lights::LightId;
use crate::state::{FillMode, ViewerState};

/// Edge detector for toggle keys.
///
/// Fires once on the first frame the key is observed down and re-arms only
/// after a frame where it is observed up.
#[derive(Debug, Default, Copy, Clone)]
pub struct ToggleLatch {
    was_down: bool,
}

impl ToggleLatch {
    pub fn update(&mut self, down: bool) -> bool {
        let fire = down && !self.was_down;
        self.was_down = down;
        fire
    }
}

const MOVEMENT_KEYS: [(Key, CameraMovement); 6] = [
    (Key::W, CameraMovement::Forward),
    (Key::S, CameraMovement::Backward),
    (Key::A, CameraMovement::Left),
    (Key::D, CameraMovement::Right),
    (Key::E, CameraMovement::Up),
    (Key::Q, CameraMovement::Down),
];

/// Keyboard and mouse command surface.
#[derive(Debug, Default)]
pub struct Controls {
    projection: ToggleLatch,
    key_light: ToggleLatch,
    spot_light: ToggleLatch,
    orbit: ToggleLatch,
    warned_wireframe: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one frame of input to `state`.
    ///
    /// A key counts as down if it is held now or was pressed at any point
    /// since the last frame, so a tap shorter than a frame still registers.
    pub fn apply(
        &mut self,
        input: &InputState,
        frame: &InputFrame,
        state: &mut ViewerState,
        dt: f32,
    ) -> AppControl {
        let down = |key: Key| input.key_down(key) || frame.pressed(key);

        if down(Key::Escape) {
            return AppControl::Exit;
        }

        // ── fill mode ──
        if down(Key::ArrowRight) {
            self.set_fill_mode(state, FillMode::Wireframe);
        }
        if down(Key::ArrowLeft) {
            self.set_fill_mode(state, FillMode::Fill);
        }

        // ── camera ──
        for (key, movement) in MOVEMENT_KEYS {
            if down(key) {
                state.camera.process_keyboard(movement, dt);
            }
        }

        let (dx, dy) = frame.mouse_delta;
        if dx != 0.0 || dy != 0.0 {
            // Screen y grows downward.
            state.camera.process_mouse_movement(dx, -dy, true);
        }
        if frame.scroll_lines != 0.0 {
            state.camera.process_mouse_scroll(frame.scroll_lines);
            log::debug!("camera speed {:.1}", state.camera.movement_speed);
        }

        // ── toggles ──
        if self.projection.update(down(Key::P)) {
            state.projection = state.projection.toggled();
            log::info!("projection: {}", state.projection.name());
        }
        if self.key_light.update(down(Key::O)) {
            let on = state.lights.toggle(LightId::Key);
            log::info!("{}: {}", LightId::Key.name(), on_off(on));
        }
        if self.spot_light.update(down(Key::I)) {
            let on = state.lights.toggle(LightId::Spot);
            log::info!("{}: {}", LightId::Spot.name(), on_off(on));
        }
        if self.orbit.update(down(Key::L)) {
            let orbit = state.lights.toggle_orbit();
            log::info!("spot light orbit: {}", on_off(orbit));
        }

        AppControl::Continue
    }

    fn set_fill_mode(&mut self, state: &mut ViewerState, mode: FillMode) {
        if state.fill_mode == mode {
            return;
        }
        if mode == FillMode::Wireframe && !state.wireframe_available {
            if !self.warned_wireframe {
                log::warn!("wireframe needs POLYGON_MODE_LINE, which this device lacks");
                self.warned_wireframe = true;
            }
            return;
        }
        state.fill_mode = mode;
        log::info!("fill mode: {mode:?}");
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use lavadesk_engine::input::{InputEvent, KeyState};

    struct Harness {
        input: InputState,
        frame: InputFrame,
        controls: Controls,
        state: ViewerState,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                input: InputState::default(),
                frame: InputFrame::default(),
                controls: Controls::new(),
                state: ViewerState::new(crate::Projection::Perspective, true),
            }
        }

        fn key(&mut self, key: Key, state: KeyState) {
            self.input.apply_event(&mut self.frame, InputEvent::Key { key, state });
        }

        fn step(&mut self) -> AppControl {
            let control = self.controls.apply(&self.input, &self.frame, &mut self.state, 0.04);
            self.frame.clear();
            control
        }
    }

    // ── latch ────────────────────────────────────────────────────────────

    #[test]
    fn latch_fires_on_rising_edge_only() {
        let mut latch = ToggleLatch::default();
        let fired: Vec<bool> = [false, true, true, true, false, true]
            .into_iter()
            .map(|d| latch.update(d))
            .collect();
        assert_eq!(fired, [false, true, false, false, false, true]);
    }

    // ── toggles ──────────────────────────────────────────────────────────

    #[test]
    fn held_key_flips_projection_once() {
        let mut h = Harness::new();
        h.key(Key::P, KeyState::Pressed);
        for _ in 0..10 {
            h.step();
        }
        assert_eq!(h.state.projection, crate::Projection::Orthographic);

        h.key(Key::P, KeyState::Released);
        h.step();
        h.key(Key::P, KeyState::Pressed);
        h.step();
        assert_eq!(h.state.projection, crate::Projection::Perspective);
    }

    #[test]
    fn tap_between_frames_still_toggles() {
        let mut h = Harness::new();
        h.key(Key::O, KeyState::Pressed);
        h.key(Key::O, KeyState::Released);
        h.step();
        h.step();
        assert!(!h.state.lights.key.on);
        assert_eq!(h.state.lights.key.color, Vec3::ZERO);
    }

    #[test]
    fn spot_light_and_orbit_keys() {
        let mut h = Harness::new();
        h.key(Key::L, KeyState::Pressed);
        h.step();
        assert!(h.state.lights.orbit);

        h.key(Key::I, KeyState::Pressed);
        h.step();
        assert!(!h.state.lights.spot.on);
        assert!(!h.state.lights.orbit);
    }

    #[test]
    fn escape_requests_exit() {
        let mut h = Harness::new();
        assert_eq!(h.step(), AppControl::Continue);
        h.key(Key::Escape, KeyState::Pressed);
        assert_eq!(h.step(), AppControl::Exit);
    }

    // ── fill mode ────────────────────────────────────────────────────────

    #[test]
    fn arrows_select_fill_mode() {
        let mut h = Harness::new();
        h.key(Key::ArrowRight, KeyState::Pressed);
        h.step();
        assert_eq!(h.state.fill_mode, FillMode::Wireframe);

        h.key(Key::ArrowRight, KeyState::Released);
        h.key(Key::ArrowLeft, KeyState::Pressed);
        h.step();
        assert_eq!(h.state.fill_mode, FillMode::Fill);
    }

    #[test]
    fn wireframe_refused_without_device_support() {
        let mut h = Harness::new();
        h.state.wireframe_available = false;
        h.key(Key::ArrowRight, KeyState::Pressed);
        h.step();
        h.step();
        assert_eq!(h.state.fill_mode, FillMode::Fill);
    }

    // ── camera ───────────────────────────────────────────────────────────

    #[test]
    fn held_movement_key_moves_every_frame() {
        let mut h = Harness::new();
        let start = h.state.camera.position;
        h.key(Key::W, KeyState::Pressed);
        h.step();
        let one = h.state.camera.position;
        h.step();
        let two = h.state.camera.position;

        let stride = h.state.camera.movement_speed * 0.04;
        assert!(((one - start).length() - stride).abs() < 1e-5);
        assert!(((two - one).length() - stride).abs() < 1e-5);
    }

    #[test]
    fn mouse_up_raises_pitch() {
        let mut h = Harness::new();
        let pitch = h.state.camera.pitch;
        h.input.apply_event(&mut h.frame, InputEvent::MouseMotion { dx: 0.0, dy: -50.0 });
        h.step();
        assert!((h.state.camera.pitch - (pitch + 5.0)).abs() < 1e-4);
    }
}
