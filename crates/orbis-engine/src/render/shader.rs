//! Built-in shader programs.
//!
//! A program is a vertex + fragment WGSL pair, each stage prefixed with
//! `common.wgsl`. Sources are parsed and validated with naga before wgpu sees
//! them, so a broken program surfaces as a `ShaderError` instead of a device
//! panic.

use std::fmt;
use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use thiserror::Error;

use super::depth::DepthBuffer;
use super::mesh::GpuVertex;
use crate::paint::Color;

const COMMON: &str = include_str!("shaders/common.wgsl");
const STANDARD_VERT: &str = include_str!("shaders/standard.vert.wgsl");
const WAVE_VERT: &str = include_str!("shaders/wave.vert.wgsl");
const LAMBERT_FRAG: &str = include_str!("shaders/lambert.frag.wgsl");
const PERLIN_FRAG: &str = include_str!("shaders/perlin.frag.wgsl");
const WAVE_FRAG: &str = include_str!("shaders/wave.frag.wgsl");

const VS_ENTRY: &str = "vs_main";
const FS_ENTRY: &str = "fs_main";

/// The closed set of shader programs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ShaderKind {
    Lambert,
    #[default]
    Perlin,
    WaveDeform,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 3] = [ShaderKind::Lambert, ShaderKind::Perlin, ShaderKind::WaveDeform];

    pub fn label(self) -> &'static str {
        match self {
            ShaderKind::Lambert => "lambert",
            ShaderKind::Perlin => "perlin",
            ShaderKind::WaveDeform => "wave-deform",
        }
    }

    /// Whether the program reads the `time` uniform.
    pub fn uses_time(self) -> bool {
        match self {
            ShaderKind::Lambert | ShaderKind::Perlin => false,
            ShaderKind::WaveDeform => true,
        }
    }

    /// Next program in `ALL` order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ShaderKind::Lambert => ShaderKind::Perlin,
            ShaderKind::Perlin => ShaderKind::WaveDeform,
            ShaderKind::WaveDeform => ShaderKind::Lambert,
        }
    }

    fn stage_sources(self) -> (&'static str, &'static str) {
        match self {
            ShaderKind::Lambert => (STANDARD_VERT, LAMBERT_FRAG),
            ShaderKind::Perlin => (STANDARD_VERT, PERLIN_FRAG),
            ShaderKind::WaveDeform => (WAVE_VERT, WAVE_FRAG),
        }
    }

    /// Full WGSL for both stages, common prelude included.
    pub fn sources(self) -> ShaderSources {
        let (vertex, fragment) = self.stage_sources();
        ShaderSources {
            kind: self,
            vertex: format!("{COMMON}\n{vertex}"),
            fragment: format!("{COMMON}\n{fragment}"),
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => VS_ENTRY,
            ShaderStage::Fragment => FS_ENTRY,
        }
    }

    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{program} {stage} shader failed to parse:\n{message}")]
    Parse {
        program: ShaderKind,
        stage: ShaderStage,
        message: String,
    },

    #[error("{program} {stage} shader failed validation: {message}")]
    Validation {
        program: ShaderKind,
        stage: ShaderStage,
        message: String,
    },

    #[error("{program} {stage} shader has no `{entry}` entry point")]
    MissingEntryPoint {
        program: ShaderKind,
        stage: ShaderStage,
        entry: &'static str,
    },
}

/// Assembled WGSL for one program.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    kind: ShaderKind,
    vertex: String,
    fragment: String,
}

impl ShaderSources {
    /// Parses and validates both stages.
    pub fn validate(&self) -> Result<(), ShaderError> {
        validate_stage(self.kind, ShaderStage::Vertex, &self.vertex)?;
        validate_stage(self.kind, ShaderStage::Fragment, &self.fragment)
    }
}

fn validate_stage(program: ShaderKind, stage: ShaderStage, source: &str) -> Result<(), ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Parse {
        program,
        stage,
        message: e.emit_to_string(source),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| ShaderError::Validation {
        program,
        stage,
        message: e.to_string(),
    })?;

    let entry = stage.entry_point();
    if !module
        .entry_points
        .iter()
        .any(|ep| ep.name == entry && ep.stage == stage.to_naga())
    {
        return Err(ShaderError::MissingEntryPoint {
            program,
            stage,
            entry,
        });
    }

    Ok(())
}

/// CPU mirror of the `Frame` uniform in `common.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct FrameUniform {
    model: [[f32; 4]; 4],
    model_inv_transpose: [[f32; 4]; 4],
    view_proj: [[f32; 4]; 4],
    color: [f32; 4],
    time: f32,
    _pad: [f32; 3],
}

impl FrameUniform {
    /// Meshes are generated in world space, so the model transform is identity.
    pub(crate) fn new(view_proj: Mat4, color: Color, time: f32) -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            model_inv_transpose: Mat4::IDENTITY.to_cols_array_2d(),
            view_proj: view_proj.to_cols_array_2d(),
            color: color.to_array(),
            time,
            _pad: [0.0; 3],
        }
    }
}

/// CCW triangle lists drawn double-sided: the square is a single face
/// seen from both sides.
fn primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        ..Default::default()
    }
}

/// A compiled program: pipeline plus its own uniform buffer.
pub struct ShaderProgram {
    time: f32,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ShaderProgram {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        kind: ShaderKind,
    ) -> Result<Self, ShaderError> {
        let sources = kind.sources();
        sources.validate()?;

        let label = kind.label();

        let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(sources.vertex.into()),
        });
        let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(sources.fragment.into()),
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<FrameUniform>() as u64),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(VS_ENTRY),
                buffers: &[GpuVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(FS_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: primitive_state(),
            depth_stencil: Some(DepthBuffer::stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::debug!("compiled shader program '{label}'");

        Ok(Self {
            time: 0.0,
            pipeline,
            uniform_buffer,
            bind_group,
        })
    }

    /// Seconds fed to the `time` uniform on the next draw.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.time = seconds;
    }

    pub(crate) fn write_uniform(&self, queue: &wgpu::Queue, uniform: &FrameUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
    }

    pub(crate) fn bind<'p>(&self, pass: &mut wgpu::RenderPass<'p>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
    }
}

/// One compiled program per `ShaderKind`.
pub struct ShaderLibrary {
    lambert: ShaderProgram,
    perlin: ShaderProgram,
    wave_deform: ShaderProgram,
}

impl ShaderLibrary {
    /// Compiles every program. Any failure is returned as-is.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Result<Self, ShaderError> {
        let library = Self {
            lambert: ShaderProgram::new(device, surface_format, ShaderKind::Lambert)?,
            perlin: ShaderProgram::new(device, surface_format, ShaderKind::Perlin)?,
            wave_deform: ShaderProgram::new(device, surface_format, ShaderKind::WaveDeform)?,
        };
        log::info!("compiled {} shader programs", ShaderKind::ALL.len());
        Ok(library)
    }

    pub fn get(&self, kind: ShaderKind) -> &ShaderProgram {
        match kind {
            ShaderKind::Lambert => &self.lambert,
            ShaderKind::Perlin => &self.perlin,
            ShaderKind::WaveDeform => &self.wave_deform,
        }
    }

    pub fn get_mut(&mut self, kind: ShaderKind) -> &mut ShaderProgram {
        match kind {
            ShaderKind::Lambert => &mut self.lambert,
            ShaderKind::Perlin => &mut self.perlin,
            ShaderKind::WaveDeform => &mut self.wave_deform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_program_validates() {
        for kind in ShaderKind::ALL {
            if let Err(e) = kind.sources().validate() {
                panic!("{e}");
            }
        }
    }

    #[test]
    fn broken_source_reports_program_and_stage() {
        let err = validate_stage(ShaderKind::Lambert, ShaderStage::Fragment, "fn broken( {")
            .expect_err("must not parse");
        match err {
            ShaderError::Parse { program, stage, .. } => {
                assert_eq!(program, ShaderKind::Lambert);
                assert_eq!(stage, ShaderStage::Fragment);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrong_stage_entry_point_is_rejected() {
        let src = format!("{COMMON}\n{LAMBERT_FRAG}");
        let err = validate_stage(ShaderKind::Lambert, ShaderStage::Vertex, &src)
            .expect_err("fragment-only module");
        assert!(matches!(err, ShaderError::MissingEntryPoint { entry: "vs_main", .. }));
    }

    #[test]
    fn only_wave_deform_reads_time() {
        let timed: Vec<_> = ShaderKind::ALL.into_iter().filter(|k| k.uses_time()).collect();
        assert_eq!(timed, vec![ShaderKind::WaveDeform]);
    }

    #[test]
    fn next_cycles_through_all() {
        let mut k = ShaderKind::Lambert;
        for expected in [ShaderKind::Perlin, ShaderKind::WaveDeform, ShaderKind::Lambert] {
            k = k.next();
            assert_eq!(k, expected);
        }
    }

    #[test]
    fn uniform_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 224);
    }

    #[test]
    fn uniform_uses_identity_model() {
        let u = FrameUniform::new(Mat4::IDENTITY, Color::rgb(1.0, 0.5, 0.0), 2.5);
        assert_eq!(u.model, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(u.model_inv_transpose, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(u.color, [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(u.time, 2.5);
    }

    #[test]
    fn triangles_are_ccw_and_drawn_from_both_sides() {
        let p = primitive_state();
        assert_eq!(p.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(p.front_face, wgpu::FrontFace::Ccw);
        assert_eq!(p.cull_mode, None);
    }
}
