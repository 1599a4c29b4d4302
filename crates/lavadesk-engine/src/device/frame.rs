/// A single acquired frame.
///
/// Holds the swapchain texture until [`Gpu::submit`](super::Gpu::submit)
/// presents it; no further frame can be acquired while this is alive.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
