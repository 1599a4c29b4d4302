use lavadesk_mesh::Vertex;
use wgpu::util::DeviceExt;

/// Vertex buffer owned by one scene instance. Released when dropped.
pub(crate) struct GpuMesh {
    vbo: wgpu::Buffer,
    vertex_count: u32,
}

impl GpuMesh {
    pub(crate) fn new(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> Self {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vbo,
            vertex_count: vertices.len() as u32,
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.draw(0..self.vertex_count, 0..1);
    }
}

const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x4, // color / normal + alpha
    2 => Float32x2  // uv
];

/// Buffer layout for [`Vertex`]; attribute offsets match its field offsets.
pub(crate) fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: Vertex::STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_offsets_match_vertex() {
        let layout = vertex_layout();
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(
            offsets,
            [Vertex::POSITION_OFFSET, Vertex::COLOR_OFFSET, Vertex::UV_OFFSET]
        );
        assert_eq!(layout.array_stride, 36);
    }
}
