use anyhow::Result;
use lavadesk_engine::core::{App, AppControl, FrameCtx, StartCtx};

use crate::config::ViewerConfig;
use crate::controls::Controls;
use crate::plan::plan_frame;
use crate::render::SceneRenderer;
use crate::scene::{assemble, desk_scene, SceneMesh};
use crate::state::ViewerState;
use crate::textures::load_scene_textures;

/// The desk viewer as an engine [`App`].
pub struct ViewerApp {
    config: ViewerConfig,
    scene: Vec<SceneMesh>,
    state: ViewerState,
    controls: Controls,
    renderer: Option<SceneRenderer>,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            state: ViewerState::new(config.projection, false),
            config,
            scene: assemble(&desk_scene()),
            controls: Controls::new(),
            renderer: None,
        }
    }
}

impl App for ViewerApp {
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> Result<()> {
        let instances = self.scene.iter().map(|mesh| &mesh.instance);
        let textures = load_scene_textures(&self.config.texture_dir, instances)?;

        let wireframe = ctx.gpu.supports_wireframe();
        let renderer = SceneRenderer::new(&ctx.render_ctx(), &self.scene, &textures, wireframe)?;
        self.renderer = Some(renderer);
        self.state.wireframe_available = wireframe;

        if self.config.capture_cursor {
            ctx.window.set_cursor_captured(true);
        }

        log::info!(
            "controls: WASD/QE move, mouse look, scroll speed, P projection, \
             O key light, I spot light, L orbit, arrows fill mode, Esc quit"
        );
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let dt = ctx.time.dt;

        if self.controls.apply(ctx.input, ctx.input_frame, &mut self.state, dt) == AppControl::Exit {
            log::info!("escape pressed, closing");
            return AppControl::Exit;
        }
        self.state.lights.advance_orbit(dt);

        let plan = plan_frame(&self.state, &self.scene, ctx.gpu.aspect_ratio());
        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };

        ctx.render(wgpu::Color::BLACK, |rctx, target| renderer.render(rctx, target, &plan))
    }
}
