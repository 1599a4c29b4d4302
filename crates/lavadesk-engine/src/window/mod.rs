//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the window, wires them to the GPU layer
//! and paces frames.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
