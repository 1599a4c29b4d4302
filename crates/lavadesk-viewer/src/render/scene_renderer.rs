use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use lavadesk_engine::render::{RenderCtx, RenderTarget};
use lavadesk_mesh::marker_cube;

use crate::material::ShaderVariant;
use crate::plan::{DrawCmd, FrameLighting, FramePlan};
use crate::scene::SceneMesh;
use crate::state::FillMode;
use crate::textures::LoadedTexture;

use super::gpu_mesh::{vertex_layout, GpuMesh};
use super::texture::{create_sampler, GpuTexture};

/// Draws the desk scene and the light marker.
///
/// Bind groups:
/// - group 0: [`FrameUniform`], once per frame
/// - group 1: [`InstanceUniform`] with a dynamic offset, one slot per draw
/// - group 2: texture + sampler (scene pipelines only)
///
/// Geometry and textures are uploaded once in [`SceneRenderer::new`]; the
/// scene is static after that.
pub struct SceneRenderer {
    pipelines: HashMap<(ShaderVariant, FillMode), wgpu::RenderPipeline>,
    marker_pipelines: HashMap<FillMode, wgpu::RenderPipeline>,
    wireframe: bool,
    warned_wireframe: bool,

    frame_ubo: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    instance_bgl: wgpu::BindGroupLayout,
    instance_ubo: wgpu::Buffer,
    instance_bind_group: wgpu::BindGroup,
    instance_capacity: usize,
    /// Bytes between instance slots, rounded up to the device's uniform
    /// offset alignment.
    instance_stride: u64,
    staging: Vec<u8>,

    meshes: Vec<GpuMesh>,
    /// Index into `textures` for each mesh.
    mesh_textures: Vec<usize>,
    textures: Vec<GpuTexture>,
    marker: GpuMesh,
}

impl SceneRenderer {
    /// Uploads `scene` and `textures` and builds one pipeline per
    /// [`ShaderVariant`] and fill mode.
    ///
    /// `wireframe` must only be set when the device has `POLYGON_MODE_LINE`.
    ///
    /// Shader and pipeline validation errors are captured and returned.
    pub fn new(
        ctx: &RenderCtx<'_>,
        scene: &[SceneMesh],
        textures: &[LoadedTexture],
        wireframe: bool,
    ) -> Result<Self> {
        let device = ctx.device;

        let frame_bgl = uniform_bgl(device, "lavadesk frame bgl", FRAME_UNIFORM_SIZE, false);
        let instance_bgl =
            uniform_bgl(device, "lavadesk instance bgl", INSTANCE_UNIFORM_SIZE, true);
        let texture_bgl = texture_bgl(device);

        // ── shaders + pipelines ──
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let phong = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lavadesk phong shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/phong.wgsl").into()),
        });
        let marker_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lavadesk marker shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/marker.wgsl").into()),
        });

        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lavadesk scene pipeline layout"),
            bind_group_layouts: &[&frame_bgl, &instance_bgl, &texture_bgl],
            immediate_size: 0,
        });
        let marker_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lavadesk marker pipeline layout"),
            bind_group_layouts: &[&frame_bgl, &instance_bgl],
            immediate_size: 0,
        });

        let fill_modes: &[FillMode] = if wireframe {
            &[FillMode::Fill, FillMode::Wireframe]
        } else {
            &[FillMode::Fill]
        };

        let mut pipelines = HashMap::new();
        let mut marker_pipelines = HashMap::new();
        for &mode in fill_modes {
            for variant in ShaderVariant::ALL {
                let label = format!("lavadesk {} pipeline ({mode:?})", variant.name());
                let pipeline = create_pipeline(
                    ctx,
                    &PipelineDesc {
                        label: &label,
                        layout: &scene_layout,
                        module: &phong,
                        fs_entry: variant.entry_point(),
                        mode,
                    },
                );
                pipelines.insert((variant, mode), pipeline);
            }

            let label = format!("lavadesk marker pipeline ({mode:?})");
            let marker = create_pipeline(
                ctx,
                &PipelineDesc {
                    label: &label,
                    layout: &marker_layout,
                    module: &marker_shader,
                    fs_entry: "fs_main",
                    mode,
                },
            );
            marker_pipelines.insert(mode, marker);
        }
        check_validation("scene shaders and pipelines", pollster::block_on(scope.pop()))?;

        // ── uniforms ──
        let frame_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lavadesk frame ubo"),
            size: FRAME_UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lavadesk frame bind group"),
            layout: &frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_ubo.as_entire_binding(),
            }],
        });

        let align = u64::from(device.limits().min_uniform_buffer_offset_alignment).max(1);
        let instance_stride = INSTANCE_UNIFORM_SIZE.div_ceil(align) * align;
        let instance_capacity = (scene.len() + 1).next_power_of_two().max(32);
        let (instance_ubo, instance_bind_group) =
            create_instance_buffer(device, &instance_bgl, instance_capacity, instance_stride);

        // ── textures ──
        let sampler = create_sampler(device);
        let mut gpu_textures = Vec::with_capacity(textures.len());
        for t in textures {
            let gpu = GpuTexture::upload(device, ctx.queue, &texture_bgl, &sampler, t)
                .with_context(|| format!("texture {} has no image data", t.name))?;
            gpu_textures.push(gpu);
        }

        // ── geometry ──
        let mut meshes = Vec::with_capacity(scene.len());
        let mut mesh_textures = Vec::with_capacity(scene.len());
        let mut total_vertices = 0usize;
        for mesh in scene {
            let inst = &mesh.instance;
            let tex = gpu_textures
                .iter()
                .position(|t| t.name == inst.texture)
                .with_context(|| format!("{} uses unloaded texture {}", inst.name, inst.texture))?;
            let label = format!("lavadesk mesh {}", inst.name);
            meshes.push(GpuMesh::new(device, &label, &mesh.vertices));
            mesh_textures.push(tex);
            total_vertices += mesh.vertices.len();
        }
        let marker = GpuMesh::new(device, "lavadesk light marker", &marker_cube());

        log::info!(
            "scene uploaded: {} meshes, {total_vertices} vertices, {} textures",
            meshes.len(),
            gpu_textures.len()
        );

        Ok(Self {
            pipelines,
            marker_pipelines,
            wireframe,
            warned_wireframe: false,
            frame_ubo,
            frame_bind_group,
            instance_bgl,
            instance_ubo,
            instance_bind_group,
            instance_capacity,
            instance_stride,
            staging: Vec::new(),
            meshes,
            mesh_textures,
            textures: gpu_textures,
            marker,
        })
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, plan: &FramePlan) {
        let slots = plan.draws.len() + usize::from(plan.marker.is_some());
        if slots == 0 {
            return;
        }

        self.ensure_instance_capacity(ctx, slots);
        self.write_uniforms(ctx, plan);

        let mode = self.effective_fill_mode(plan.fill_mode);
        let stride = self.instance_stride;

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lavadesk scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, &self.frame_bind_group, &[]);

        for (slot, draw) in plan.draws.iter().enumerate() {
            let Some(mesh) = self.meshes.get(draw.mesh) else { continue };
            let Some(pipeline) = self.pipelines.get(&(draw.variant, mode)) else { continue };
            let Some(texture) = self.mesh_textures.get(draw.mesh).and_then(|&t| self.textures.get(t))
            else {
                continue;
            };

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(1, &self.instance_bind_group, &[(slot as u64 * stride) as u32]);
            rpass.set_bind_group(2, &texture.bind_group, &[]);
            mesh.draw(&mut rpass);
        }

        if plan.marker.is_some() {
            let Some(pipeline) = self.marker_pipelines.get(&mode) else { return };
            let slot = plan.draws.len() as u64;
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &self.frame_bind_group, &[]);
            rpass.set_bind_group(1, &self.instance_bind_group, &[(slot * stride) as u32]);
            self.marker.draw(&mut rpass);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn effective_fill_mode(&mut self, requested: FillMode) -> FillMode {
        if requested == FillMode::Wireframe && !self.wireframe {
            if !self.warned_wireframe {
                log::warn!("wireframe pipelines unavailable; drawing filled");
                self.warned_wireframe = true;
            }
            return FillMode::Fill;
        }
        requested
    }

    fn write_uniforms(&mut self, ctx: &RenderCtx<'_>, plan: &FramePlan) {
        ctx.queue.write_buffer(
            &self.frame_ubo,
            0,
            bytemuck::bytes_of(&FrameUniform::new(&plan.lighting)),
        );

        let stride = self.instance_stride as usize;
        let slots = plan.draws.len() + usize::from(plan.marker.is_some());
        self.staging.clear();
        self.staging.resize(slots * stride, 0);

        let instances = plan
            .draws
            .iter()
            .map(InstanceUniform::for_draw)
            .chain(plan.marker.map(InstanceUniform::for_marker));
        for (slot, inst) in instances.enumerate() {
            let at = slot * stride;
            let bytes = bytemuck::bytes_of(&inst);
            self.staging[at..at + bytes.len()].copy_from_slice(bytes);
        }

        ctx.queue.write_buffer(&self.instance_ubo, 0, &self.staging);
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity {
            return;
        }
        let new_cap = required.next_power_of_two();
        let (ubo, bind_group) =
            create_instance_buffer(ctx.device, &self.instance_bgl, new_cap, self.instance_stride);
        self.instance_ubo = ubo;
        self.instance_bind_group = bind_group;
        self.instance_capacity = new_cap;
    }
}

fn check_validation(what: &str, error: Option<impl std::fmt::Display>) -> Result<()> {
    match error {
        Some(err) => Err(anyhow!("{what} failed validation: {err}")),
        None => Ok(()),
    }
}

struct PipelineDesc<'a> {
    label: &'a str,
    layout: &'a wgpu::PipelineLayout,
    module: &'a wgpu::ShaderModule,
    fs_entry: &'a str,
    mode: FillMode,
}

fn create_pipeline(ctx: &RenderCtx<'_>, desc: &PipelineDesc<'_>) -> wgpu::RenderPipeline {
    let polygon_mode = match desc.mode {
        FillMode::Fill => wgpu::PolygonMode::Fill,
        FillMode::Wireframe => wgpu::PolygonMode::Line,
    };

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(desc.layout),
        vertex: wgpu::VertexState {
            module: desc.module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[vertex_layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.module,
            entry_point: Some(desc.fs_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        // Open shapes (discs, planes, cone sides) are seen from both sides.
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: ctx.depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Straight (non-premultiplied) alpha: `src * a + dst * (1 - a)`.
fn alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

fn uniform_bgl(
    device: &wgpu::Device,
    label: &str,
    size: u64,
    dynamic: bool,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: dynamic,
                min_binding_size: wgpu::BufferSize::new(size),
            },
            count: None,
        }],
    })
}

fn texture_bgl(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("lavadesk texture bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

fn create_instance_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    capacity: usize,
    stride: u64,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let ubo = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("lavadesk instance ubo"),
        size: capacity as u64 * stride,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("lavadesk instance bind group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &ubo,
                offset: 0,
                size: wgpu::BufferSize::new(INSTANCE_UNIFORM_SIZE),
            }),
        }],
    });
    (ubo, bind_group)
}

// ── GPU types ─────────────────────────────────────────────────────────────

const FRAME_UNIFORM_SIZE: u64 = std::mem::size_of::<FrameUniform>() as u64;
const INSTANCE_UNIFORM_SIZE: u64 = std::mem::size_of::<InstanceUniform>() as u64;

/// Frame uniform layout (224 bytes):
///
///  offset   0  view        mat4
///  offset  64  proj        mat4
///  offset 128  camera_pos  vec4   (w unused)
///  offset 144  ambient     vec4
///  offset 160  key_pos     vec4
///  offset 176  key_color   vec4
///  offset 192  spot_pos    vec4
///  offset 208  spot_color  vec4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FrameUniform {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    key_pos: [f32; 4],
    key_color: [f32; 4],
    spot_pos: [f32; 4],
    spot_color: [f32; 4],
}

impl FrameUniform {
    fn new(l: &FrameLighting) -> Self {
        let v4 = |v: Vec3| v.extend(1.0).to_array();
        Self {
            view: l.view.to_cols_array_2d(),
            proj: l.projection.to_cols_array_2d(),
            camera_pos: v4(l.camera_position),
            ambient: v4(l.ambient),
            key_pos: v4(l.key_position),
            key_color: v4(l.key_color),
            spot_pos: v4(l.spot_position),
            spot_color: v4(l.spot_color),
        }
    }
}

/// Instance uniform layout (176 bytes):
///
///  offset   0  model               mat4
///  offset  64  normal              mat4   (upper 3x3 used)
///  offset 128  object_color        vec4
///  offset 144  uv_scale            vec2
///  offset 152  transparency        f32
///  offset 156  specular_intensity  f32
///  offset 160  highlight_size      f32
///  offset 164  _pad                [f32; 3]
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct InstanceUniform {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
    object_color: [f32; 4],
    uv_scale: [f32; 2],
    transparency: f32,
    specular_intensity: f32,
    highlight_size: f32,
    _pad: [f32; 3],
}

impl InstanceUniform {
    fn for_draw(d: &DrawCmd) -> Self {
        let shading = d.variant.shading();
        Self {
            model: d.model.to_cols_array_2d(),
            normal: Mat4::from_mat3(d.normal).to_cols_array_2d(),
            object_color: d.object_color.extend(1.0).to_array(),
            uv_scale: d.uv_scale.to_array(),
            transparency: d.transparency,
            specular_intensity: shading.specular_intensity,
            highlight_size: shading.highlight_size,
            _pad: [0.0; 3],
        }
    }

    fn for_marker(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: Mat4::IDENTITY.to_cols_array_2d(),
            object_color: [1.0; 4],
            uv_scale: [1.0; 2],
            transparency: 1.0,
            specular_intensity: 0.0,
            highlight_size: 1.0,
            _pad: [0.0; 3],
        }
    }
}
