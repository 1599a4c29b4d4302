//! GPU rendering glue.
//!
//! Renderers own their GPU resources (pipelines, buffers, textures) and
//! record passes into a `RenderTarget` handed out by `FrameCtx::render`.

mod ctx;

pub use ctx::{RenderCtx, RenderTarget};
