use glam::{Mat3, Mat4, Vec2, Vec3};

use crate::lights::MARKER_SCALE;
use crate::material::{resolve_material, ShaderVariant};
use crate::scene::SceneMesh;
use crate::state::{FillMode, ViewerState};

/// Per-frame values shared by every draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameLighting {
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub ambient: Vec3,
    pub key_position: Vec3,
    pub key_color: Vec3,
    pub spot_position: Vec3,
    pub spot_color: Vec3,
}

/// One scene draw. `mesh` indexes the mesh list the plan was built from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCmd {
    pub mesh: usize,
    pub variant: ShaderVariant,
    pub model: Mat4,
    /// Inverse-transpose of the model's upper 3x3.
    pub normal: Mat3,
    pub object_color: Vec3,
    pub uv_scale: Vec2,
    pub transparency: f32,
}

/// Everything the renderer needs for one frame, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub lighting: FrameLighting,
    pub fill_mode: FillMode,
    pub draws: Vec<DrawCmd>,
    /// Model matrix of the spot-light marker, present while the light is on.
    pub marker: Option<Mat4>,
}

/// Builds the draw list for one frame.
///
/// Model matrices are read from `scene` as assembled.
pub fn plan_frame(state: &ViewerState, scene: &[SceneMesh], aspect: f32) -> FramePlan {
    let camera = &state.camera;
    let lights = &state.lights;

    let lighting = FrameLighting {
        view: camera.view_matrix(),
        projection: state.projection.matrix(camera.zoom, aspect),
        camera_position: camera.position,
        ambient: lights.ambient,
        key_position: lights.key.position,
        key_color: lights.key.color,
        spot_position: lights.spot.position,
        spot_color: lights.spot.color,
    };

    let draws = scene
        .iter()
        .enumerate()
        .map(|(index, mesh)| {
            let inst = &mesh.instance;
            DrawCmd {
                mesh: index,
                variant: resolve_material(inst, lights),
                model: mesh.model,
                normal: normal_matrix(mesh.model),
                object_color: inst.params.color.truncate(),
                uv_scale: inst.params.uv_scale,
                transparency: inst.transparency,
            }
        })
        .collect();

    let marker = lights.spot.on.then(|| {
        Mat4::from_translation(lights.spot.position) * Mat4::from_scale(Vec3::splat(MARKER_SCALE))
    });

    FramePlan {
        lighting,
        fill_mode: state.fill_mode,
        draws,
        marker,
    }
}

/// Falls back to the plain rotation-scale block when the model is singular.
fn normal_matrix(model: Mat4) -> Mat3 {
    let m = Mat3::from_mat4(model);
    if m.determinant().abs() <= f32::EPSILON {
        return m;
    }
    m.inverse().transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Projection;
    use crate::lights::LightId;
    use crate::scene::{assemble, desk_scene};

    fn desk() -> Vec<SceneMesh> {
        assemble(&desk_scene())
    }

    // ── draws ────────────────────────────────────────────────────────────

    #[test]
    fn draws_follow_declaration_order() {
        let scene = desk();
        let plan = plan_frame(&ViewerState::default(), &scene, 4.0 / 3.0);
        assert_eq!(plan.draws.len(), scene.len());
        for (i, d) in plan.draws.iter().enumerate() {
            assert_eq!(d.mesh, i);
            assert_eq!(d.model, scene[i].model);
        }
    }

    #[test]
    fn draws_use_the_assembled_model() {
        let mut scene = desk();
        let moved = Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0)) * Mat4::from_scale(Vec3::splat(2.0));
        scene[3].model = moved;

        let plan = plan_frame(&ViewerState::default(), &scene, 1.0);
        assert_eq!(plan.draws[3].model, moved);
        assert_eq!(plan.draws[3].normal, normal_matrix(moved));
        assert_eq!(plan.draws[4].model, scene[4].model);
    }

    #[test]
    fn switching_the_key_light_off_turns_glow_into_gloss() {
        let scene = desk();
        let mut state = ViewerState::default();

        let on = plan_frame(&state, &scene, 1.0);
        assert_eq!(on.draws[1].variant, ShaderVariant::Glow);
        assert_eq!(on.draws[2].variant, ShaderVariant::Glow);

        state.lights.toggle(LightId::Key);
        let off = plan_frame(&state, &scene, 1.0);
        assert_eq!(off.draws[1].variant, ShaderVariant::Gloss);
        assert_eq!(off.draws[2].variant, ShaderVariant::Gloss);
        assert_eq!(off.lighting.key_color, Vec3::ZERO);
    }

    #[test]
    fn unset_material_plans_matte() {
        let scene = desk();
        let plan = plan_frame(&ViewerState::default(), &scene, 1.0);
        let floor = plan.draws.last().map(|d| d.variant);
        assert_eq!(floor, Some(ShaderVariant::Matte));
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 0.5, 1.0));
        let n = normal_matrix(model);
        let normal = (n * Vec3::new(1.0, 1.0, 0.0)).normalize();
        // A 45° surface squashed in y tilts its normal toward y.
        assert!(normal.y > normal.x);
    }

    // ── marker ───────────────────────────────────────────────────────────

    #[test]
    fn marker_only_while_spot_is_on() {
        let scene = desk();
        let mut state = ViewerState::default();

        let plan = plan_frame(&state, &scene, 1.0);
        let marker = plan.marker.map(|m| m.transform_point3(Vec3::ZERO));
        assert_eq!(marker, Some(state.lights.spot.position));

        state.lights.toggle(LightId::Spot);
        assert!(plan_frame(&state, &scene, 1.0).marker.is_none());
    }

    #[test]
    fn marker_is_scaled_down() {
        let plan = plan_frame(&ViewerState::default(), &[], 1.0);
        let Some(m) = plan.marker else { panic!("spot light starts on") };
        let edge = m.transform_vector3(Vec3::X);
        assert!((edge.length() - MARKER_SCALE).abs() < 1e-6);
    }

    // ── projection ───────────────────────────────────────────────────────

    #[test]
    fn projection_follows_mode_and_aspect() {
        let mut state = ViewerState::default();
        let wide = plan_frame(&state, &[], 2.0).lighting.projection;
        let narrow = plan_frame(&state, &[], 1.0).lighting.projection;
        assert_ne!(wide, narrow);

        state.projection = Projection::Orthographic;
        let ortho = plan_frame(&state, &[], 2.0).lighting.projection;
        assert_eq!(ortho, Projection::Orthographic.matrix(45.0, 2.0));
    }
}
