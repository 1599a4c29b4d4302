use bytemuck::{Pod, Zeroable};

/// Interleaved vertex as uploaded to the GPU (36 bytes, no padding).
///
///  offset  0  position  [f32; 3]
///  offset 12  color     [f32; 4]   xyz doubles as the shading normal, w is alpha
///  offset 28  uv        [f32; 2]
///
/// Every builder emits exactly this layout; the renderer's vertex attributes
/// are bound to these offsets.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const FLOATS: usize = 9;
    pub const STRIDE: u64 = (Self::FLOATS * std::mem::size_of::<f32>()) as u64;
    pub const POSITION_OFFSET: u64 = 0;
    pub const COLOR_OFFSET: u64 = 12;
    pub const UV_OFFSET: u64 = 28;

    #[inline]
    pub const fn new(position: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Self {
        Self { position, color, uv }
    }

    /// Builds a vertex from one row of a 9-float table.
    #[inline]
    pub const fn from_row(r: [f32; 9]) -> Self {
        Self::new([r[0], r[1], r[2]], [r[3], r[4], r[5], r[6]], [r[7], r[8]])
    }

    /// First three color channels, used as the normal by the lit shaders.
    #[inline]
    pub fn normal(&self) -> [f32; 3] {
        [self.color[0], self.color[1], self.color[2]]
    }
}
