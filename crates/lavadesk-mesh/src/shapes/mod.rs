//! Shape builders.
//!
//! All shapes are expanded triangle lists (no index buffer, no vertex
//! sharing). Surfaces of revolution sit in the unit square `[0,1]` on XZ,
//! centred at `(0.5, 0.5)`, and extend upward from `y = 0`.

mod fixed;
mod revolve;

pub use fixed::marker_cube;

use crate::vertex::Vertex;

/// Value of pi used to split circles into sectors.
///
/// Two-decimal precision, so a full turn falls short by about 0.0032 rad and
/// the last sector leaves a sliver open. Kept so geometry matches existing
/// renders exactly.
#[allow(clippy::approx_constant)]
pub const SECTOR_PI: f32 = 3.14;

/// How many times a side texture wraps around a cylinder wall.
pub const SIDE_TEXTURE_WRAPS: f32 = 1.0;

/// Geometry kind plus its intrinsic dimensions.
///
/// `sides` must be at least 3; smaller values are not rejected but produce
/// degenerate geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    /// Flat disc facing +Y.
    Circle { radius: f32, sides: u32 },
    /// Base disc plus a side fan up to an apex at `height`.
    Cone { radius: f32, height: f32, sides: u32 },
    /// Closed cylinder: bottom cap, top cap, side wall.
    Cylinder { radius: f32, height: f32, sides: u32 },
    /// Tube with annular caps and inner + outer walls.
    HollowCylinder {
        inner_radius: f32,
        radius: f32,
        height: f32,
        sides: u32,
    },
    /// Unit cube, `x,z` in `[-0.5, 0.5]`, `y` in `[0, 1]`.
    Cube,
    /// Quad over `[-1,1]²` at `y = 0`, split into four triangles.
    Plane,
}

impl Shape {
    /// Generates the vertex list. `alpha` fills the alpha channel on the
    /// vertices that carry the instance's color alpha (cone and wall vertices).
    pub fn build(&self, alpha: f32) -> Vec<Vertex> {
        match *self {
            Shape::Circle { radius, sides } => revolve::circle(radius, sides),
            Shape::Cone { radius, height, sides } => revolve::cone(radius, height, sides, alpha),
            Shape::Cylinder { radius, height, sides } => {
                revolve::cylinder(radius, height, sides, alpha)
            }
            Shape::HollowCylinder {
                inner_radius,
                radius,
                height,
                sides,
            } => revolve::hollow_cylinder(inner_radius, radius, height, sides, alpha),
            Shape::Cube => fixed::cube(),
            Shape::Plane => fixed::plane(),
        }
    }

    /// Number of vertices [`build`](Self::build) emits.
    pub fn vertex_count(&self) -> usize {
        match *self {
            Shape::Circle { sides, .. } => 3 * sides as usize,
            Shape::Cone { sides, .. } => 6 * sides as usize,
            Shape::Cylinder { sides, .. } => 12 * sides as usize,
            Shape::HollowCylinder { sides, .. } => 24 * sides as usize,
            Shape::Cube => 36,
            Shape::Plane => 12,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circle",
            Shape::Cone { .. } => "cone",
            Shape::Cylinder { .. } => "cylinder",
            Shape::HollowCylinder { .. } => "hollow cylinder",
            Shape::Cube => "cube",
            Shape::Plane => "plane",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revolved(sides: u32) -> [Shape; 4] {
        [
            Shape::Circle { radius: 0.45, sides },
            Shape::Cone { radius: 0.5, height: 1.8, sides },
            Shape::Cylinder { radius: 0.5, height: 4.0, sides },
            Shape::HollowCylinder {
                inner_radius: 0.45,
                radius: 0.5,
                height: 1.0,
                sides,
            },
        ]
    }

    // ── counts ───────────────────────────────────────────────────────────

    #[test]
    fn vertex_counts_follow_sides() {
        for sides in [3, 4, 17, 128, 144] {
            let s = sides as usize;
            let [circle, cone, cylinder, hollow] = revolved(sides);
            assert_eq!(circle.build(1.0).len(), 3 * s);
            assert_eq!(cone.build(1.0).len(), 6 * s);
            assert_eq!(cylinder.build(1.0).len(), 12 * s);
            assert_eq!(hollow.build(1.0).len(), 24 * s);
        }
    }

    #[test]
    fn vertex_count_matches_build() {
        for shape in revolved(36).into_iter().chain([Shape::Cube, Shape::Plane]) {
            assert_eq!(shape.vertex_count(), shape.build(1.0).len(), "{}", shape.kind());
            assert_eq!(shape.vertex_count() % 3, 0);
        }
    }

    #[test]
    fn hollow_count_ignores_radii() {
        let thin = Shape::HollowCylinder { inner_radius: 0.49, radius: 0.5, height: 1.0, sides: 60 };
        let thick = Shape::HollowCylinder { inner_radius: 0.05, radius: 2.0, height: 3.0, sides: 60 };
        assert_eq!(thin.build(1.0).len(), thick.build(1.0).len());
        assert_eq!(thin.build(1.0).len(), 24 * 60);
    }

    #[test]
    fn fixed_shapes_have_fixed_counts() {
        assert_eq!(Shape::Cube.build(0.3).len(), 36);
        assert_eq!(Shape::Plane.build(0.3).len(), 12);
    }

    #[test]
    fn too_few_sides_is_degenerate_not_a_panic() {
        assert!(Shape::Circle { radius: 0.5, sides: 0 }.build(1.0).is_empty());
        assert_eq!(Shape::Cone { radius: 0.5, height: 1.0, sides: 1 }.build(1.0).len(), 6);
    }

    // ── attributes ───────────────────────────────────────────────────────

    #[test]
    fn all_attributes_are_finite() {
        for shape in revolved(144).into_iter().chain([Shape::Cube, Shape::Plane]) {
            for v in shape.build(0.7) {
                let all = v.position.iter().chain(&v.color).chain(&v.uv);
                assert!(all.into_iter().all(|f| f.is_finite()), "{}", shape.kind());
            }
        }
    }

    #[test]
    fn revolved_shapes_stay_within_radius_and_height() {
        let [circle, cone, cylinder, hollow] = revolved(72);
        for (shape, r, h) in [(circle, 0.45, 0.0), (cone, 0.5, 1.8), (cylinder, 0.5, 4.0), (hollow, 0.5, 1.0)] {
            for v in shape.build(1.0) {
                let dx = v.position[0] - 0.5;
                let dz = v.position[2] - 0.5;
                assert!((dx * dx + dz * dz).sqrt() <= r + 1e-5, "{}", shape.kind());
                assert!(v.position[1] >= 0.0 && v.position[1] <= h + 1e-6, "{}", shape.kind());
            }
        }
    }
}
