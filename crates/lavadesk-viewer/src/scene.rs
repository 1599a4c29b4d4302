use glam::Mat4;
use lavadesk_mesh::{model_matrix, Shape, ShapeParams, Vertex};

use crate::lights::LightId;
use crate::material::Material;

/// One placed, textured shape in the static scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeInstance {
    pub name: &'static str,
    pub shape: Shape,
    pub params: ShapeParams,
    /// File name under the texture directory.
    pub texture: &'static str,
    /// `None` renders matte.
    pub material: Option<Material>,
    /// Base alpha before specular highlights are added.
    pub transparency: f32,
}

impl ShapeInstance {
    fn new(name: &'static str, shape: Shape, texture: &'static str) -> Self {
        Self {
            name,
            shape,
            params: ShapeParams::default(),
            texture,
            material: None,
            transparency: 1.0,
        }
    }

    fn params(mut self, params: ShapeParams) -> Self {
        self.params = params;
        self
    }

    fn material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    fn transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency;
        self
    }
}

/// A render-ready instance: its declaration, composed model matrix and
/// generated vertices.
///
/// `model` is composed once here and never rebuilt.
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub instance: ShapeInstance,
    pub model: Mat4,
    pub vertices: Vec<Vertex>,
}

/// Builds vertices and model matrices for `instances`, preserving order.
pub fn assemble(instances: &[ShapeInstance]) -> Vec<SceneMesh> {
    instances
        .iter()
        .map(|inst| SceneMesh {
            instance: inst.clone(),
            model: model_matrix(&inst.params),
            vertices: inst.shape.build(inst.params.color.w),
        })
        .collect()
}

/// Distinct texture names in first-use order.
pub fn texture_names<'a>(
    instances: impl IntoIterator<Item = &'a ShapeInstance>,
) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for inst in instances {
        if !names.contains(&inst.texture) {
            names.push(inst.texture);
        }
    }
    names
}

const LAMP_CONE: Shape = Shape::Cone { radius: 0.5, height: 1.8, sides: 144 };
const MUG: Shape = Shape::HollowCylinder { inner_radius: 0.45, radius: 0.5, height: 1.0, sides: 144 };
const PENCIL: Shape = Shape::Cylinder { radius: 0.5, height: 4.0, sides: 128 };

/// The desk: lava lamp, mug of coffee, pencil cup, pencils, desk, paper, floor.
///
/// Draw order is declaration order; transparent pieces rely on depth testing
/// rather than sorting.
pub fn desk_scene() -> Vec<ShapeInstance> {
    let p = ShapeParams::default;

    vec![
        // ── lava lamp ──
        ShapeInstance::new("lamp cap", LAMP_CONE, "blacksparkle.png")
            .params(p().uniform_scale(0.2).translate(0.4, 1.47, 2.4))
            .material(Material::Gloss),
        ShapeInstance::new("lamp glass", LAMP_CONE, "lava.png")
            .params(p().translate(0.0, 0.0, 2.0))
            .material(Material::Glow(LightId::Key))
            .transparency(0.7),
        ShapeInstance::new(
            "lamp base collar",
            Shape::Cone { radius: 0.5, height: 0.5, sides: 144 },
            "blacksparkle.png",
        )
        .params(p().rotate_x(180.0).translate(0.0, 0.0, 3.0))
        .material(Material::Glow(LightId::Key)),
        ShapeInstance::new(
            "lamp base",
            Shape::Cone { radius: 0.5, height: 1.0, sides: 144 },
            "blacksparkle.png",
        )
        .params(p().translate(0.0, -1.0, 2.0))
        .material(Material::Gloss),
        // ── mug ──
        ShapeInstance::new("mug", MUG, "mug1.png")
            .params(p().uniform_scale(0.8).rotate_y(-30.0).translate(-1.0, -1.0, 1.1))
            .material(Material::Gloss),
        ShapeInstance::new(
            "mug handle",
            Shape::HollowCylinder { inner_radius: 0.35, radius: 0.5, height: 1.0, sides: 144 },
            "mug2.png",
        )
        .params(
            p().scale(0.3, 0.1, 0.4)
                .rotate_x(90.0)
                .rotate_z(-60.0)
                .translate(-1.2, -0.35, 2.15),
        )
        .material(Material::Gloss),
        ShapeInstance::new("coffee", Shape::Circle { radius: 0.45, sides: 144 }, "coffee1.png")
            .params(p().uniform_scale(0.8).rotate_y(180.0).translate(-0.47, -0.4, 2.05))
            .material(Material::Satin),
        // ── pencil cup ──
        ShapeInstance::new("pencil cup", MUG, "glass1.png")
            .params(p().scale(0.5, 0.8, 0.5).rotate_y(-30.0).translate(-0.8, -1.0, -3.0))
            .material(Material::Gloss)
            .transparency(0.4),
        ShapeInstance::new("pencil (leaning)", PENCIL, "pencil1.png")
            .params(p().scale(0.06, 0.3, 0.06).rotate_x(-25.0).translate(-0.8, -1.0, -2.5))
            .material(Material::Matte),
        ShapeInstance::new("pencil (upright)", PENCIL, "pencil2.png")
            .params(p().scale(0.06, 0.3, 0.06).rotate_z(-20.0).translate(-0.85, -1.0, -2.7)),
        // ── desk ──
        ShapeInstance::new("desk top", Shape::Cube, "lightboard.png")
            .params(p().scale(2.6, 0.07, 3.3).rotate_z(30.0).translate(0.0, -0.32, -0.5))
            .material(Material::Satin),
        ShapeInstance::new("desk leg (front)", Shape::Cube, "black.png")
            .params(p().scale(0.1, 1.15, 0.1).rotate_z(30.0).translate(1.0, -1.0, 1.0))
            .material(Material::Satin),
        ShapeInstance::new("desk leg (back)", Shape::Cube, "black.png")
            .params(p().scale(0.1, 1.15, 0.1).rotate_z(30.0).translate(1.0, -1.0, -2.0))
            .material(Material::Satin),
        ShapeInstance::new("drawing", Shape::Plane, "drawing3.png")
            .params(p().scale(1.0, 1.0, 0.75).rotate_z(30.0).translate(0.0, -0.22, -0.2)),
        // ── pencil on the desk ──
        ShapeInstance::new("pencil (lying)", PENCIL, "pencil2.png").params(
            p().scale(0.06, 0.3, 0.06)
                .rotate_x(90.0)
                .rotate_z(20.0)
                .translate(-1.3, -0.9, -2.0),
        ),
        ShapeInstance::new(
            "pencil tip",
            Shape::Cone { radius: 0.5, height: 1.0, sides: 144 },
            "penciltip1.png",
        )
        .params(
            p().scale(0.06, 0.2, 0.06)
                .rotate_x(90.0)
                .rotate_z(-160.0)
                .translate(-1.244, -0.9, -1.98),
        ),
        // ── room ──
        ShapeInstance::new("floor", Shape::Plane, "wood1.png")
            .params(p().scale(2.0, 6.0, 3.0).translate(0.0, -1.0, 0.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn desk_has_every_piece_in_order() {
        let scene = desk_scene();
        assert_eq!(scene.len(), 17);
        assert_eq!(scene[0].name, "lamp cap");
        assert_eq!(scene[16].name, "floor");
    }

    #[test]
    fn exactly_two_pieces_glow_from_the_key_light() {
        let glowing: Vec<_> = desk_scene()
            .into_iter()
            .filter(|i| i.material == Some(Material::Glow(LightId::Key)))
            .map(|i| i.name)
            .collect();
        assert_eq!(glowing, ["lamp glass", "lamp base collar"]);
    }

    #[test]
    fn transparent_pieces() {
        let scene = desk_scene();
        let see_through: Vec<_> = scene.iter().filter(|i| i.transparency < 1.0).map(|i| i.name).collect();
        assert_eq!(see_through, ["lamp glass", "pencil cup"]);
    }

    #[test]
    fn assemble_keeps_order_and_vertex_counts() {
        let scene = desk_scene();
        let meshes = assemble(&scene);
        assert_eq!(meshes.len(), scene.len());
        for (inst, mesh) in scene.iter().zip(&meshes) {
            assert_eq!(inst, &mesh.instance);
            assert_eq!(mesh.vertices.len(), inst.shape.vertex_count());
            assert_eq!(mesh.model, model_matrix(&inst.params));
        }
    }

    #[test]
    fn floor_sits_below_the_desk() {
        let scene = desk_scene();
        let floor = assemble(&scene[16..]);
        let y = floor[0].model.transform_point3(Vec3::ZERO).y;
        assert_eq!(y, -1.0);
    }

    #[test]
    fn texture_names_are_unique_and_ordered() {
        let names = texture_names(&desk_scene());
        assert_eq!(names.first(), Some(&"blacksparkle.png"));
        assert_eq!(names.last(), Some(&"wood1.png"));
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), names.len());
        assert_eq!(names.len(), 13);
    }
}
