use crate::lights::{LightId, LightRig};
use crate::scene::ShapeInstance;

/// Surface material of a shape instance.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Material {
    Matte,
    Satin,
    Gloss,
    /// Emissive while the linked light is on, gloss otherwise.
    Glow(LightId),
}

impl Material {
    /// Shader variant for this material given the state of its linked light.
    ///
    /// `light_on` only matters for [`Material::Glow`].
    pub fn resolve(self, light_on: bool) -> ShaderVariant {
        match self {
            Material::Matte => ShaderVariant::Matte,
            Material::Satin => ShaderVariant::Satin,
            Material::Gloss => ShaderVariant::Gloss,
            Material::Glow(_) if light_on => ShaderVariant::Glow,
            Material::Glow(_) => ShaderVariant::Gloss,
        }
    }

    pub fn linked_light(self) -> Option<LightId> {
        match self {
            Material::Glow(id) => Some(id),
            _ => None,
        }
    }
}

/// Resolves an instance's shader against the current light rig.
/// Instances without a material render matte.
pub fn resolve_material(instance: &ShapeInstance, rig: &LightRig) -> ShaderVariant {
    match instance.material {
        None => ShaderVariant::Matte,
        Some(m) => m.resolve(m.linked_light().is_some_and(|id| rig.is_on(id))),
    }
}

/// Fragment program a draw uses. One pipeline exists per variant; the lit
/// variants share an entry point and differ in their [`Shading`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderVariant {
    Matte,
    Satin,
    Gloss,
    Glow,
}

/// Specular parameters of a shader variant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Shading {
    pub specular_intensity: f32,
    pub highlight_size: f32,
}

impl ShaderVariant {
    pub const ALL: [ShaderVariant; 4] = [
        ShaderVariant::Matte,
        ShaderVariant::Satin,
        ShaderVariant::Gloss,
        ShaderVariant::Glow,
    ];

    /// Fragment entry point in `phong.wgsl`.
    pub fn entry_point(self) -> &'static str {
        match self {
            ShaderVariant::Matte | ShaderVariant::Satin | ShaderVariant::Gloss => "fs_phong",
            ShaderVariant::Glow => "fs_glow",
        }
    }

    /// Glow computes its highlights with the gloss parameters.
    pub fn shading(self) -> Shading {
        let (specular_intensity, highlight_size) = match self {
            ShaderVariant::Matte => (0.2, 15.0),
            ShaderVariant::Satin => (0.5, 25.0),
            ShaderVariant::Gloss | ShaderVariant::Glow => (3.5, 55.0),
        };
        Shading {
            specular_intensity,
            highlight_size,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderVariant::Matte => "matte",
            ShaderVariant::Satin => "satin",
            ShaderVariant::Gloss => "gloss",
            ShaderVariant::Glow => "glow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lavadesk_mesh::{Shape, ShapeParams};

    fn instance(material: Option<Material>) -> ShapeInstance {
        ShapeInstance {
            name: "probe",
            shape: Shape::Cube,
            params: ShapeParams::default(),
            texture: "black.png",
            material,
            transparency: 1.0,
        }
    }

    // ── dispatch ─────────────────────────────────────────────────────────

    #[test]
    fn glow_downgrades_to_gloss_when_light_is_off() {
        let mut rig = LightRig::default();
        let lamp = instance(Some(Material::Glow(LightId::Key)));

        assert_eq!(resolve_material(&lamp, &rig), ShaderVariant::Glow);
        rig.toggle(LightId::Key);
        assert_eq!(resolve_material(&lamp, &rig), ShaderVariant::Gloss);
        rig.toggle(LightId::Key);
        assert_eq!(resolve_material(&lamp, &rig), ShaderVariant::Glow);
    }

    #[test]
    fn glow_follows_only_its_own_light() {
        let mut rig = LightRig::default();
        let lamp = instance(Some(Material::Glow(LightId::Key)));
        rig.toggle(LightId::Spot);
        assert_eq!(resolve_material(&lamp, &rig), ShaderVariant::Glow);
    }

    #[test]
    fn missing_material_is_matte() {
        let rig = LightRig::default();
        assert_eq!(resolve_material(&instance(None), &rig), ShaderVariant::Matte);
    }

    #[test]
    fn plain_materials_ignore_lights() {
        for (m, v) in [
            (Material::Matte, ShaderVariant::Matte),
            (Material::Satin, ShaderVariant::Satin),
            (Material::Gloss, ShaderVariant::Gloss),
        ] {
            assert_eq!(m.resolve(true), v);
            assert_eq!(m.resolve(false), v);
        }
    }

    // ── shading table ────────────────────────────────────────────────────

    #[test]
    fn specular_grows_with_shine() {
        let s: Vec<Shading> = ShaderVariant::ALL.iter().map(|v| v.shading()).collect();
        assert!(s[0].specular_intensity < s[1].specular_intensity);
        assert!(s[1].specular_intensity < s[2].specular_intensity);
        assert_eq!(s[2], s[3]);
    }

    #[test]
    fn only_glow_skips_diffuse_lighting() {
        for v in ShaderVariant::ALL {
            assert_eq!(v.entry_point() == "fs_glow", v == ShaderVariant::Glow, "{}", v.name());
        }
    }
}
