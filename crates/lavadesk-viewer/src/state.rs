use crate::camera::{Camera, Projection};
use crate::lights::LightRig;

/// Polygon rasterization mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FillMode {
    Fill,
    Wireframe,
}

/// Everything input can change between frames.
///
/// Owned by the app, mutated by [`crate::Controls::apply`] and
/// [`LightRig::advance_orbit`], read by [`crate::plan_frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    pub camera: Camera,
    pub projection: Projection,
    pub lights: LightRig,
    pub fill_mode: FillMode,
    /// Whether the device can rasterize lines; wireframe requests are
    /// refused otherwise.
    pub wireframe_available: bool,
}

impl ViewerState {
    pub fn new(projection: Projection, wireframe_available: bool) -> Self {
        Self {
            camera: Camera::desk(),
            projection,
            lights: LightRig::default(),
            fill_mode: FillMode::Fill,
            wireframe_available,
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(Projection::Perspective, false)
    }
}
