//! wgpu execution of a [`crate::FramePlan`].

mod gpu_mesh;
mod scene_renderer;
mod texture;

pub use scene_renderer::SceneRenderer;
