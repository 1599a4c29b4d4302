//! Surfaces of revolution.
//!
//! Sector `i` spans angles `i * step .. (i + 1) * step` with
//! `step = 2 * SECTOR_PI / sides`. Fans (disc, cone, cylinder top) iterate
//! `i = 1..=sides`, walls and hollow caps iterate `i = 0..sides`; neither
//! wraps the last sector back onto sector 0.
//!
//! The color slot carries a direction: `x`/`z` are the sector's outward
//! offset scaled to unit radius, `y` is -1 / 0 / +1 for bottom / wall / top.

use super::{SECTOR_PI, SIDE_TEXTURE_WRAPS};
use crate::vertex::Vertex;

/// One ring of points at a given radius.
#[derive(Copy, Clone)]
struct Ring {
    radius: f32,
    step: f32,
}

impl Ring {
    fn new(radius: f32, sides: u32) -> Self {
        Self {
            radius,
            step: sector_step(sides),
        }
    }

    #[inline]
    fn angle(&self, i: u32) -> f32 {
        i as f32 * self.step
    }

    /// Point on the ring for sector boundary `i`, at height `y`.
    #[inline]
    fn point(&self, i: u32, y: f32) -> [f32; 3] {
        let a = self.angle(i);
        [0.5 + self.radius * a.cos(), y, 0.5 + self.radius * a.sin()]
    }

    /// Texture coordinate on a disc of half-extent `(du, dv)` centred at `(0.5, v0)`.
    #[inline]
    fn disc_uv(&self, i: u32, du: f32, v0: f32, dv: f32) -> [f32; 2] {
        let a = self.angle(i);
        [0.5 + du * a.cos(), v0 + dv * a.sin()]
    }

    /// Horizontal direction `(x, z)` for sector boundary `i`.
    ///
    /// Computed through the ring point and recentred, which is not bit-equal
    /// to `2r·cos` in f32.
    #[inline]
    fn direction(&self, i: u32) -> (f32, f32) {
        let a = self.angle(i);
        let mut x = 0.5 + self.radius * a.cos();
        let mut z = 0.5 + self.radius * a.sin();
        x -= 0.5;
        x *= 2.0;
        z -= 0.5;
        z *= 2.0;
        (x, z)
    }
}

#[inline]
fn sector_step(sides: u32) -> f32 {
    2.0 * SECTOR_PI / sides as f32
}

#[inline]
fn v(position: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Vertex {
    Vertex::new(position, color, uv)
}

// ── disc ──────────────────────────────────────────────────────────────────

pub(super) fn circle(radius: f32, sides: u32) -> Vec<Vertex> {
    let ring = Ring::new(radius, sides);
    let mut out = Vec::with_capacity(3 * sides as usize);

    for i in 1..=sides {
        let (dx, dz) = ring.direction(i);
        let c = [dx, 1.0, dz, 1.0];

        out.push(v([0.5, 0.0, 0.5], [0.0, 1.0, 0.0, 1.0], [0.5, 0.5]));
        out.push(v(ring.point(i, 0.0), c, ring.disc_uv(i, 0.5, 0.5, 0.5)));
        out.push(v(ring.point(i + 1, 0.0), c, ring.disc_uv(i + 1, 0.5, 0.5, 0.5)));
    }

    out
}

// ── cone ──────────────────────────────────────────────────────────────────

pub(super) fn cone(radius: f32, height: f32, sides: u32, alpha: f32) -> Vec<Vertex> {
    let ring = Ring::new(radius, sides);
    let tex_step = 1.0 / sides as f32;
    let mut tex_x = 0.0f32;
    let mut out = Vec::with_capacity(6 * sides as usize);

    for i in 1..=sides {
        let (dx, dz) = ring.direction(i);
        let base = [dx, -1.0, dz, alpha];
        let side = [dx, 1.0, dz, alpha];

        // Base fan. The two rim points use different UV mappings.
        out.push(v([0.5, 0.0, 0.5], base, [0.5, 0.25]));
        out.push(v(ring.point(i, 0.0), base, ring.disc_uv(i, radius, 0.5, radius)));
        out.push(v(ring.point(i + 1, 0.0), base, ring.disc_uv(i + 1, radius, 0.25, 0.25)));

        // Side triangle to the apex.
        out.push(v(ring.point(i, 0.0), side, [tex_x, 0.0]));
        out.push(v(ring.point(i + 1, 0.0), side, [tex_x + tex_step, 0.0]));
        out.push(v([0.5, height, 0.5], side, [tex_x + tex_step / 2.0, 1.0]));

        tex_x += tex_step;
    }

    out
}

// ── cylinder ──────────────────────────────────────────────────────────────

pub(super) fn cylinder(radius: f32, height: f32, sides: u32, alpha: f32) -> Vec<Vertex> {
    let ring = Ring::new(radius, sides);
    let mut out = Vec::with_capacity(12 * sides as usize);

    for i in 0..sides {
        let (dx, dz) = ring.direction(i);
        let c = [dx, -1.0, dz, 1.0];

        out.push(v([0.5, 0.0, 0.5], [0.0, -1.0, 0.0, 1.0], [0.5, 0.125]));
        out.push(v(ring.point(i, 0.0), c, ring.disc_uv(i, 0.5, 0.125, 0.125)));
        out.push(v(ring.point(i + 1, 0.0), c, ring.disc_uv(i + 1, 0.5, 0.125, 0.125)));
    }

    for i in 1..=sides {
        let (dx, dz) = ring.direction(i);
        let c = [dx, 1.0, dz, 1.0];

        out.push(v([0.5, height, 0.5], [0.0, 1.0, 0.0, 1.0], [0.5, 0.875]));
        out.push(v(ring.point(i, height), c, ring.disc_uv(i, 0.5, 0.875, 0.125)));
        out.push(v(ring.point(i + 1, height), c, ring.disc_uv(i + 1, 0.5, 0.875, 0.125)));
    }

    let mut wall = Wall::new(sides);
    wall.extend(&mut out, ring, ring, height, alpha, 1.0);

    out
}

// ── hollow cylinder ───────────────────────────────────────────────────────

pub(super) fn hollow_cylinder(
    inner_radius: f32,
    radius: f32,
    height: f32,
    sides: u32,
    alpha: f32,
) -> Vec<Vertex> {
    let outer = Ring::new(radius, sides);
    let inner = Ring::new(inner_radius, sides);
    let mut out = Vec::with_capacity(24 * sides as usize);

    // Inner rim UVs shrink with the radius ratio.
    let ratio = inner_radius / radius;

    for (y, ny) in [(0.0, -1.0), (height, 1.0)] {
        for i in 0..sides {
            let (dx, dz) = outer.direction(i);
            let co = [dx, ny, dz, 1.0];
            let ci = [-dx, ny, -dz, 1.0];

            let in_uv = |k| inner.disc_uv(k, ratio * 0.5, 0.125, ratio * 0.125);
            let out_uv = |k| outer.disc_uv(k, 0.5, 0.125, 0.125);

            out.push(v(inner.point(i, y), ci, in_uv(i)));
            out.push(v(outer.point(i, y), co, out_uv(i)));
            out.push(v(inner.point(i + 1, y), ci, in_uv(i + 1)));

            out.push(v(inner.point(i + 1, y), ci, in_uv(i + 1)));
            out.push(v(outer.point(i + 1, y), co, out_uv(i + 1)));
            out.push(v(outer.point(i, y), co, out_uv(i)));
        }
    }

    // The inner wall continues the outer wall's texture offset.
    let mut wall = Wall::new(sides);
    wall.extend(&mut out, outer, outer, height, alpha, 1.0);
    wall.extend(&mut out, inner, outer, height, alpha, -1.0);

    out
}

/// Side-wall quads with horizontally advancing texture coordinates.
struct Wall {
    sides: u32,
    /// Texture advance per sector.
    du: f32,
    u: f32,
}

impl Wall {
    fn new(sides: u32) -> Self {
        Self {
            sides,
            du: 1.0 / (sides as f32 / SIDE_TEXTURE_WRAPS),
            u: 0.0,
        }
    }

    /// Emits one quad per sector on `ring`. Directions come from `dir_ring`
    /// and are multiplied by `sign`.
    fn extend(
        &mut self,
        out: &mut Vec<Vertex>,
        ring: Ring,
        dir_ring: Ring,
        height: f32,
        alpha: f32,
        sign: f32,
    ) {
        for i in 0..self.sides {
            let (dx, dz) = dir_ring.direction(i);
            let c = [sign * dx, 0.0, sign * dz, alpha];
            let (u0, u1) = (self.u, self.u + self.du);

            out.push(v(ring.point(i, 0.0), c, [u0, 0.25]));
            out.push(v(ring.point(i, height), c, [u0, 0.75]));
            out.push(v(ring.point(i + 1, height), c, [u1, 0.75]));

            out.push(v(ring.point(i + 1, height), c, [u1, 0.75]));
            out.push(v(ring.point(i + 1, 0.0), c, [u1, 0.25]));
            out.push(v(ring.point(i, 0.0), c, [u0, 0.25]));

            self.u += self.du;
        }
    }
}
