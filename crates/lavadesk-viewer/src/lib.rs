//! Lava-lamp desk viewer.
//!
//! The frame is split into a CPU half and a GPU half:
//! - [`controls`] turns input into [`ViewerState`] changes
//! - [`plan_frame`] turns state + assembled [`SceneMesh`]es into a [`FramePlan`]
//! - [`render::SceneRenderer`] executes the plan with wgpu
//!
//! Everything except `render` and `app` is testable without a GPU.

pub mod app;
pub mod camera;
pub mod config;
pub mod controls;
pub mod lights;
pub mod material;
pub mod plan;
pub mod render;
pub mod scene;
pub mod state;
pub mod textures;

pub use app::ViewerApp;
pub use camera::{Camera, CameraMovement, Projection};
pub use config::{Cli, ViewerConfig};
pub use controls::{Controls, ToggleLatch};
pub use lights::{LightId, LightRig, PointLight};
pub use material::{resolve_material, Material, Shading, ShaderVariant};
pub use plan::{plan_frame, DrawCmd, FramePlan, FrameLighting};
pub use scene::{assemble, desk_scene, SceneMesh, ShapeInstance};
pub use state::{FillMode, ViewerState};
pub use textures::{TextureError, LoadedTexture};
