//! Table-driven shapes.

use crate::vertex::Vertex;

// Rows are `x y z  nx ny nz a  u v`. Texture atlas: four side faces across
// the upper half (v 0.5..1), top and bottom share the lower-left quarter.
#[rustfmt::skip]
const CUBE: [[f32; 9]; 36] = [
    // front
    [ 0.5, 0.0,  0.5,   0.0, 0.0,  1.0, 1.0,   0.25, 0.5],
    [-0.5, 0.0,  0.5,   0.0, 0.0,  1.0, 1.0,   0.0,  0.5],
    [-0.5, 1.0,  0.5,   0.0, 0.0,  1.0, 1.0,   0.0,  1.0],
    [ 0.5, 0.0,  0.5,   0.0, 0.0,  1.0, 1.0,   0.25, 0.5],
    [ 0.5, 1.0,  0.5,   0.0, 0.0,  1.0, 1.0,   0.25, 1.0],
    [-0.5, 1.0,  0.5,   0.0, 0.0,  1.0, 1.0,   0.0,  1.0],
    // right
    [ 0.5, 0.0,  0.5,   1.0, 0.0,  0.0, 1.0,   0.25, 0.5],
    [ 0.5, 1.0,  0.5,   1.0, 0.0,  0.0, 1.0,   0.25, 1.0],
    [ 0.5, 1.0, -0.5,   1.0, 0.0,  0.0, 1.0,   0.5,  1.0],
    [ 0.5, 0.0,  0.5,   1.0, 0.0,  0.0, 1.0,   0.25, 0.5],
    [ 0.5, 0.0, -0.5,   1.0, 0.0,  0.0, 1.0,   0.5,  0.5],
    [ 0.5, 1.0, -0.5,   1.0, 0.0,  0.0, 1.0,   0.5,  1.0],
    // back
    [ 0.5, 0.0, -0.5,   0.0, 0.0, -1.0, 1.0,   0.5,  0.5],
    [-0.5, 0.0, -0.5,   0.0, 0.0, -1.0, 1.0,   0.75, 0.5],
    [-0.5, 1.0, -0.5,   0.0, 0.0, -1.0, 1.0,   0.75, 1.0],
    [ 0.5, 0.0, -0.5,   0.0, 0.0, -1.0, 1.0,   0.5,  0.5],
    [ 0.5, 1.0, -0.5,   0.0, 0.0, -1.0, 1.0,   0.5,  1.0],
    [-0.5, 1.0, -0.5,   0.0, 0.0, -1.0, 1.0,   0.75, 1.0],
    // left
    [-0.5, 0.0,  0.5,  -1.0, 0.0,  0.0, 1.0,   1.0,  0.5],
    [-0.5, 1.0,  0.5,  -1.0, 0.0,  0.0, 1.0,   1.0,  1.0],
    [-0.5, 1.0, -0.5,  -1.0, 0.0,  0.0, 1.0,   0.75, 1.0],
    [-0.5, 0.0,  0.5,  -1.0, 0.0,  0.0, 1.0,   1.0,  0.5],
    [-0.5, 0.0, -0.5,  -1.0, 0.0,  0.0, 1.0,   0.75, 0.5],
    [-0.5, 1.0, -0.5,  -1.0, 0.0,  0.0, 1.0,   0.75, 1.0],
    // top
    [-0.5, 1.0,  0.5,   0.0, 1.0,  0.0, 1.0,   0.0,  0.0],
    [-0.5, 1.0, -0.5,   0.0, 1.0,  0.0, 1.0,   0.0,  0.5],
    [ 0.5, 1.0,  0.5,   0.0, 1.0,  0.0, 1.0,   0.25, 0.0],
    [-0.5, 1.0, -0.5,   0.0, 1.0,  0.0, 1.0,   0.0,  0.5],
    [ 0.5, 1.0,  0.5,   0.0, 1.0,  0.0, 1.0,   0.25, 0.0],
    [ 0.5, 1.0, -0.5,   0.0, 1.0,  0.0, 1.0,   0.25, 0.5],
    // bottom
    [-0.5, 0.0,  0.5,   0.0, -1.0, 0.0, 1.0,   0.0,  0.0],
    [-0.5, 0.0, -0.5,   0.0, -1.0, 0.0, 1.0,   0.0,  0.5],
    [ 0.5, 0.0,  0.5,   0.0, -1.0, 0.0, 1.0,   0.25, 0.0],
    [-0.5, 0.0, -0.5,   0.0, -1.0, 0.0, 1.0,   0.0,  0.5],
    [ 0.5, 0.0,  0.5,   0.0, -1.0, 0.0, 1.0,   0.25, 0.0],
    [ 0.5, 0.0, -0.5,   0.0, -1.0, 0.0, 1.0,   0.25, 0.5],
];

// Four triangles meeting along the z axis.
#[rustfmt::skip]
const PLANE: [[f32; 9]; 12] = [
    [-1.0, 0.0, -1.0,   0.0, 1.0, 0.0, 1.0,   0.0, 1.0],
    [ 0.0, 0.0,  1.0,   0.0, 1.0, 0.0, 1.0,   0.5, 0.0],
    [-1.0, 0.0,  1.0,   0.0, 1.0, 0.0, 1.0,   0.0, 0.0],

    [-1.0, 0.0, -1.0,   0.0, 1.0, 0.0, 1.0,   0.0, 1.0],
    [ 0.0, 0.0,  1.0,   0.0, 1.0, 0.0, 1.0,   0.5, 0.0],
    [ 0.0, 0.0, -1.0,   0.0, 1.0, 0.0, 1.0,   0.5, 1.0],

    [ 0.0, 0.0, -1.0,   0.0, 1.0, 0.0, 1.0,   0.5, 1.0],
    [ 0.0, 0.0,  1.0,   0.0, 1.0, 0.0, 1.0,   0.5, 0.0],
    [ 1.0, 0.0,  1.0,   0.0, 1.0, 0.0, 1.0,   1.0, 0.0],

    [ 0.0, 0.0, -1.0,   0.0, 1.0, 0.0, 1.0,   0.5, 1.0],
    [ 1.0, 0.0,  1.0,   0.0, 1.0, 0.0, 1.0,   1.0, 0.0],
    [ 1.0, 0.0, -1.0,   0.0, 1.0, 0.0, 1.0,   1.0, 1.0],
];

pub(super) fn cube() -> Vec<Vertex> {
    CUBE.iter().copied().map(Vertex::from_row).collect()
}

pub(super) fn plane() -> Vec<Vertex> {
    PLANE.iter().copied().map(Vertex::from_row).collect()
}

/// Face normal followed by four corners `(x, y, z, u, v)`, counter-clockwise
/// seen from outside.
type Face = ([f32; 3], [[f32; 5]; 4]);

#[rustfmt::skip]
const MARKER_FACES: [Face; 6] = [
    ([ 0.0,  0.0, -1.0], [[-0.5, -0.5, -0.5, 0.0, 0.0], [ 0.5, -0.5, -0.5, 1.0, 0.0], [ 0.5,  0.5, -0.5, 1.0, 1.0], [-0.5,  0.5, -0.5, 0.0, 1.0]]),
    ([ 0.0,  0.0,  1.0], [[-0.5, -0.5,  0.5, 0.0, 0.0], [ 0.5, -0.5,  0.5, 1.0, 0.0], [ 0.5,  0.5,  0.5, 1.0, 1.0], [-0.5,  0.5,  0.5, 0.0, 1.0]]),
    ([-1.0,  0.0,  0.0], [[-0.5,  0.5,  0.5, 1.0, 0.0], [-0.5,  0.5, -0.5, 1.0, 1.0], [-0.5, -0.5, -0.5, 0.0, 1.0], [-0.5, -0.5,  0.5, 0.0, 0.0]]),
    ([ 1.0,  0.0,  0.0], [[ 0.5,  0.5,  0.5, 1.0, 0.0], [ 0.5,  0.5, -0.5, 1.0, 1.0], [ 0.5, -0.5, -0.5, 0.0, 1.0], [ 0.5, -0.5,  0.5, 0.0, 0.0]]),
    ([ 0.0, -1.0,  0.0], [[-0.5, -0.5, -0.5, 0.0, 1.0], [ 0.5, -0.5, -0.5, 1.0, 1.0], [ 0.5, -0.5,  0.5, 1.0, 0.0], [-0.5, -0.5,  0.5, 0.0, 0.0]]),
    ([ 0.0,  1.0,  0.0], [[-0.5,  0.5, -0.5, 0.0, 1.0], [ 0.5,  0.5, -0.5, 1.0, 1.0], [ 0.5,  0.5,  0.5, 1.0, 0.0], [-0.5,  0.5,  0.5, 0.0, 0.0]]),
];

/// Centred unit cube used to mark a light position.
///
/// Same vertex layout as the scene shapes; the face normal sits in the
/// color slot with alpha 1.
pub fn marker_cube() -> Vec<Vertex> {
    let mut out = Vec::with_capacity(36);
    for (n, corners) in MARKER_FACES {
        for k in [0, 1, 2, 2, 3, 0] {
            let [x, y, z, u, v] = corners[k];
            out.push(Vertex::new([x, y, z], [n[0], n[1], n[2], 1.0], [u, v]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn cube_faces_point_outward() {
        // Each vertex lies on the face its normal names.
        for v in cube() {
            let n = v.normal();
            let centred = [v.position[0], v.position[1] - 0.5, v.position[2]];
            assert!((dot(n, centred) - 0.5).abs() < 1e-6, "{v:?}");
        }
    }

    #[test]
    fn cube_side_faces_use_upper_atlas_half() {
        let verts = cube();
        for v in &verts[..24] {
            assert!(v.uv[1] >= 0.5);
        }
        for v in &verts[24..] {
            assert!(v.uv[0] <= 0.25 && v.uv[1] <= 0.5);
        }
    }

    #[test]
    fn plane_covers_unit_texture() {
        let verts = plane();
        assert!(verts.iter().all(|v| v.position[1] == 0.0 && v.normal() == [0.0, 1.0, 0.0]));
        let max_u = verts.iter().map(|v| v.uv[0]).fold(0.0f32, f32::max);
        let max_v = verts.iter().map(|v| v.uv[1]).fold(0.0f32, f32::max);
        assert_eq!((max_u, max_v), (1.0, 1.0));
    }

    #[test]
    fn marker_cube_is_centred() {
        let verts = marker_cube();
        assert_eq!(verts.len(), 36);
        let sum = verts.iter().fold([0.0f32; 3], |acc, v| {
            [acc[0] + v.position[0], acc[1] + v.position[1], acc[2] + v.position[2]]
        });
        assert!(sum.iter().all(|s| s.abs() < 1e-5));
        for v in &verts {
            assert!((dot(v.normal(), v.position) - 0.5).abs() < 1e-6);
            assert_eq!(v.color[3], 1.0);
        }
    }
}
