use glam::{Mat3, Vec3};

/// Angular speed of the spot-light orbit around the world Y axis.
pub const ORBIT_DEGREES_PER_SECOND: f32 = 45.0;

/// Scale applied to the marker cube drawn at the spot light.
pub const MARKER_SCALE: f32 = 0.1;

/// Addressable light in the rig. Glowing materials link to one of these.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LightId {
    Key,
    Spot,
}

impl LightId {
    pub fn name(self) -> &'static str {
        match self {
            LightId::Key => "key light",
            LightId::Spot => "spot light",
        }
    }
}

/// Point light with an on/off switch.
///
/// Switching off snaps `color` to black; switching on restores `nominal`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub nominal: Vec3,
    pub on: bool,
}

impl PointLight {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position,
            color,
            nominal: color,
            on: true,
        }
    }

    pub fn set_on(&mut self, on: bool) {
        self.on = on;
        self.color = if on { self.nominal } else { Vec3::ZERO };
    }
}

/// The desk's two point lights plus ambient.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub key: PointLight,
    pub spot: PointLight,
    pub ambient: Vec3,
    /// Spot light circles the Y axis while set.
    pub orbit: bool,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            key: PointLight::new(Vec3::new(0.5, 1.1, 2.5), Vec3::new(0.9, 0.2, 0.0)),
            spot: PointLight::new(Vec3::new(1.5, 2.0, -1.5), Vec3::new(0.7, 0.7, 0.6)),
            ambient: Vec3::splat(0.1),
            orbit: false,
        }
    }
}

impl LightRig {
    pub fn light(&self, id: LightId) -> &PointLight {
        match id {
            LightId::Key => &self.key,
            LightId::Spot => &self.spot,
        }
    }

    fn light_mut(&mut self, id: LightId) -> &mut PointLight {
        match id {
            LightId::Key => &mut self.key,
            LightId::Spot => &mut self.spot,
        }
    }

    pub fn is_on(&self, id: LightId) -> bool {
        self.light(id).on
    }

    /// Flips a light and returns its new state.
    ///
    /// Turning the spot light off also stops its orbit.
    pub fn toggle(&mut self, id: LightId) -> bool {
        let on = !self.is_on(id);
        self.light_mut(id).set_on(on);
        if id == LightId::Spot && !on {
            self.orbit = false;
        }
        on
    }

    /// Flips the orbit flag and returns its new state.
    pub fn toggle_orbit(&mut self) -> bool {
        self.orbit = !self.orbit;
        self.orbit
    }

    /// Rotates the spot light about world Y by `45°/s * dt` when orbiting.
    pub fn advance_orbit(&mut self, dt: f32) {
        if !self.orbit {
            return;
        }
        let angle = (ORBIT_DEGREES_PER_SECOND * dt).to_radians();
        self.spot.position = Mat3::from_rotation_y(angle) * self.spot.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    // ── switches ─────────────────────────────────────────────────────────

    #[test]
    fn key_light_color_snaps_to_black_and_back() {
        let mut rig = LightRig::default();
        assert!(!rig.toggle(LightId::Key));
        assert_eq!(rig.key.color, Vec3::ZERO);
        assert!(!rig.is_on(LightId::Key));

        assert!(rig.toggle(LightId::Key));
        assert_eq!(rig.key.color, Vec3::new(0.9, 0.2, 0.0));
    }

    #[test]
    fn spot_off_stops_orbit() {
        let mut rig = LightRig::default();
        rig.toggle_orbit();
        assert!(rig.orbit);

        rig.toggle(LightId::Spot);
        assert!(!rig.orbit);
        assert_eq!(rig.spot.color, Vec3::ZERO);

        // Back on: color restored, orbit stays off.
        rig.toggle(LightId::Spot);
        assert!(!rig.orbit);
        assert_eq!(rig.spot.color, Vec3::new(0.7, 0.7, 0.6));
    }

    // ── orbit ────────────────────────────────────────────────────────────

    #[test]
    fn orbit_matches_closed_form_rotation() {
        let mut rig = LightRig::default();
        rig.orbit = true;
        let start = rig.spot.position;

        let dt = 0.04;
        let steps = 50;
        for _ in 0..steps {
            rig.advance_orbit(dt);
        }

        let t = dt * steps as f32;
        let expected = Mat3::from_rotation_y((45.0 * t).to_radians()) * start;
        assert!(approx(rig.spot.position, expected), "{:?} vs {expected:?}", rig.spot.position);
        // Height and distance from the axis are preserved.
        assert!((rig.spot.position.y - start.y).abs() < 1e-5);
        let horiz = |v: Vec3| (v.x * v.x + v.z * v.z).sqrt();
        assert!((horiz(rig.spot.position) - horiz(start)).abs() < 1e-4);
    }

    #[test]
    fn quarter_turn_after_two_seconds() {
        let mut rig = LightRig::default();
        rig.orbit = true;
        rig.spot.position = Vec3::new(1.0, 2.0, 0.0);
        for _ in 0..100 {
            rig.advance_orbit(0.02);
        }
        // +90° about Y takes +X to -Z.
        assert!(approx(rig.spot.position, Vec3::new(0.0, 2.0, -1.0)));
    }

    #[test]
    fn no_orbit_no_motion() {
        let mut rig = LightRig::default();
        let start = rig.spot.position;
        rig.advance_orbit(1.0);
        assert_eq!(rig.spot.position, start);
    }
}
