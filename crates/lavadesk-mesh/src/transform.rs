use glam::Mat4;

use crate::params::{AxisAngle, ShapeParams};

/// The individual factors of a model matrix, kept for inspection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformParts {
    pub scale: Mat4,
    pub rot_x: Mat4,
    pub rot_y: Mat4,
    pub rot_z: Mat4,
    pub translation: Mat4,
}

impl TransformParts {
    pub fn from_params(p: &ShapeParams) -> Self {
        Self {
            scale: Mat4::from_scale(p.scale),
            rot_x: rotation(p.rot_x),
            rot_y: rotation(p.rot_y),
            rot_z: rotation(p.rot_z),
            translation: Mat4::from_translation(p.translation),
        }
    }

    /// `translation * rot_x * rot_z * rot_y * scale`.
    ///
    /// Slot order is X, Z, Y; changing it changes every placed shape.
    pub fn compose(&self) -> Mat4 {
        self.translation * self.rot_x * self.rot_z * self.rot_y * self.scale
    }
}

/// Rotation matrix for an axis-angle pair given in degrees.
///
/// The axis is normalized first. A zero-length axis yields identity.
pub fn rotation(r: AxisAngle) -> Mat4 {
    match r.axis.try_normalize() {
        Some(axis) if r.degrees != 0.0 => Mat4::from_axis_angle(axis, r.degrees.to_radians()),
        _ => Mat4::IDENTITY,
    }
}

/// Composed model matrix for a shape instance.
pub fn model_matrix(p: &ShapeParams) -> Mat4 {
    TransformParts::from_params(p).compose()
}
