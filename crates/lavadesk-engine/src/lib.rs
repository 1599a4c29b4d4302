//! Lavadesk engine crate.
//!
//! Platform and GPU runtime shared by the desk viewer: window + event loop,
//! wgpu device/surface with a depth buffer, polled input and frame timing.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
