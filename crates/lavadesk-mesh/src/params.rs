use glam::{Vec2, Vec3, Vec4};

/// Length of the legacy positional parameter block.
pub const PARAM_BLOCK_LEN: usize = 24;

/// Rotation by `degrees` around `axis`.
///
/// The axis need not be unit length; a zero axis means "no rotation".
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisAngle {
    pub degrees: f32,
    pub axis: Vec3,
}

impl AxisAngle {
    pub const fn new(degrees: f32, axis: Vec3) -> Self {
        Self { degrees, axis }
    }

    /// Zero rotation around `axis`.
    pub const fn none(axis: Vec3) -> Self {
        Self::new(0.0, axis)
    }
}

/// Placement and surface parameters of one shape instance.
///
/// The three rotation slots are named after the axis they conventionally use,
/// but each carries its own axis. They are applied in the fixed order
/// `x`, then `z`, then `y` (see [`crate::model_matrix`]).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeParams {
    /// Base color (rgba). Only alpha reaches the vertex data.
    pub color: Vec4,
    pub scale: Vec3,
    pub rot_x: AxisAngle,
    pub rot_y: AxisAngle,
    pub rot_z: AxisAngle,
    pub translation: Vec3,
    /// Multiplier applied to texture coordinates at sampling time.
    pub uv_scale: Vec2,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            scale: Vec3::ONE,
            rot_x: AxisAngle::none(Vec3::X),
            rot_y: AxisAngle::none(Vec3::Y),
            rot_z: AxisAngle::none(Vec3::Z),
            translation: Vec3::ZERO,
            uv_scale: Vec2::ONE,
        }
    }
}

impl ShapeParams {
    /// Reads the positional 24-float block:
    /// color(4) scale(3) rotX(angle, axis xyz) rotY(4) rotZ(4) translate(3) uvScale(2).
    pub fn from_block(p: &[f32; PARAM_BLOCK_LEN]) -> Self {
        let aa = |i: usize| AxisAngle::new(p[i], Vec3::new(p[i + 1], p[i + 2], p[i + 3]));
        Self {
            color: Vec4::new(p[0], p[1], p[2], p[3]),
            scale: Vec3::new(p[4], p[5], p[6]),
            rot_x: aa(7),
            rot_y: aa(11),
            rot_z: aa(15),
            translation: Vec3::new(p[19], p[20], p[21]),
            uv_scale: Vec2::new(p[22], p[23]),
        }
    }

    pub fn scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vec3::new(x, y, z);
        self
    }

    pub fn uniform_scale(self, s: f32) -> Self {
        self.scale(s, s, s)
    }

    /// Rotation slot X, about the X axis.
    pub fn rotate_x(mut self, degrees: f32) -> Self {
        self.rot_x = AxisAngle::new(degrees, Vec3::X);
        self
    }

    /// Rotation slot Y, about the Y axis.
    pub fn rotate_y(mut self, degrees: f32) -> Self {
        self.rot_y = AxisAngle::new(degrees, Vec3::Y);
        self
    }

    /// Rotation slot Z, about the Z axis.
    pub fn rotate_z(mut self, degrees: f32) -> Self {
        self.rot_z = AxisAngle::new(degrees, Vec3::Z);
        self
    }

    pub fn translate(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vec3::new(x, y, z);
        self
    }

    pub fn uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Vec2::new(u, v);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_fields_land_in_named_slots() {
        #[rustfmt::skip]
        let block = [
            0.1, 0.2, 0.3, 0.4,
            2.0, 3.0, 4.0,
            10.0, 1.0, 0.0, 0.0,
            20.0, 0.0, 1.0, 0.0,
            30.0, 0.0, 0.0, 1.0,
            5.0, 6.0, 7.0,
            0.5, 0.25,
        ];
        let p = ShapeParams::from_block(&block);

        assert_eq!(p.color, Vec4::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(p.scale, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(p.rot_x, AxisAngle::new(10.0, Vec3::X));
        assert_eq!(p.rot_y, AxisAngle::new(20.0, Vec3::Y));
        assert_eq!(p.rot_z, AxisAngle::new(30.0, Vec3::Z));
        assert_eq!(p.translation, Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(p.uv_scale, Vec2::new(0.5, 0.25));
    }

    #[test]
    fn builder_matches_equivalent_block() {
        #[rustfmt::skip]
        let block = [
            1.0, 1.0, 1.0, 1.0,
            0.8, 0.8, 0.8,
            0.0, 1.0, 0.0, 0.0,
            -30.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
            -1.0, -1.0, 1.1,
            1.0, 1.0,
        ];
        let built = ShapeParams::default()
            .uniform_scale(0.8)
            .rotate_y(-30.0)
            .translate(-1.0, -1.0, 1.1);
        assert_eq!(built, ShapeParams::from_block(&block));
    }
}
