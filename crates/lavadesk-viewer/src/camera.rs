use glam::{Mat4, Vec3};

/// Fly-camera movement directions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Euler-angle fly camera.
///
/// Yaw and pitch are in degrees; yaw 0 looks down +X, pitch is clamped to
/// ±89° so the view never flips over the pole.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub world_up: Vec3,

    pub yaw: f32,
    pub pitch: f32,

    /// World units per second.
    pub movement_speed: f32,
    /// Degrees per unit of mouse motion.
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
}

impl Camera {
    pub const PITCH_LIMIT: f32 = 89.0;
    pub const MIN_SPEED: f32 = 0.5;
    pub const MAX_SPEED: f32 = 20.0;
    /// Speed change per scroll line.
    pub const SCROLL_SPEED_STEP: f32 = 0.5;

    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw,
            pitch,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: 45.0,
        };
        camera.update_vectors();
        camera
    }

    /// Starting pose overlooking the desk.
    pub fn desk() -> Self {
        Self::new(Vec3::new(-5.0, 2.5, -3.0), Vec3::Y, 35.0, -20.0)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn process_keyboard(&mut self, direction: CameraMovement, dt: f32) {
        let velocity = self.movement_speed * dt;
        let offset = match direction {
            CameraMovement::Forward => self.front,
            CameraMovement::Backward => -self.front,
            CameraMovement::Left => -self.right,
            CameraMovement::Right => self.right,
            CameraMovement::Up => self.world_up,
            CameraMovement::Down => -self.world_up,
        };
        self.position += offset * velocity;
    }

    /// `dx` grows to the right, `dy` grows upward.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch += dy * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Scrolling changes movement speed rather than zoom.
    pub fn process_mouse_scroll(&mut self, lines: f32) {
        self.movement_speed = (self.movement_speed + lines * Self::SCROLL_SPEED_STEP)
            .clamp(Self::MIN_SPEED, Self::MAX_SPEED);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::desk()
    }
}

/// Projection mode, switched at runtime.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Projection {
    Perspective,
    Orthographic,
}

impl Projection {
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 100.0;
    /// Half-extent of the orthographic view volume.
    pub const ORTHO_HALF: f32 = 5.0;

    pub fn toggled(self) -> Self {
        match self {
            Projection::Perspective => Projection::Orthographic,
            Projection::Orthographic => Projection::Perspective,
        }
    }

    /// Clip-space matrix with wgpu's `[0, 1]` depth range.
    pub fn matrix(self, fov_degrees: f32, aspect: f32) -> Mat4 {
        match self {
            Projection::Perspective => Mat4::perspective_rh(
                fov_degrees.to_radians(),
                aspect.max(f32::EPSILON),
                Self::NEAR,
                Self::FAR,
            ),
            Projection::Orthographic => Mat4::orthographic_rh(
                -Self::ORTHO_HALF,
                Self::ORTHO_HALF,
                -Self::ORTHO_HALF,
                Self::ORTHO_HALF,
                Self::NEAR,
                Self::FAR,
            ),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Projection::Perspective => "perspective",
            Projection::Orthographic => "orthographic",
        }
    }
}
