use anyhow::Context;
use orbis_engine::core::{App, AppControl, FrameCtx};
use orbis_engine::device::Gpu;
use orbis_engine::paint::Color;
use orbis_engine::render::{CameraConfig, GpuMesh, MeshRenderer, OrbitCamera, ShaderLibrary};
use orbis_engine::time::FrameStats;

use crate::bindings::{self, Action};
use crate::geometry::GeometryCache;
use crate::panel::{Applied, ControlPanel};
use crate::params::{GeometryKind, Params};
use crate::plan::{FramePlan, MeshUpload};

const CLEAR_COLOR: Color = Color::rgba(0.2, 0.2, 0.2, 1.0);

/// GPU-resident copy of every shape.
struct GpuMeshes {
    icosphere: GpuMesh,
    cube: GpuMesh,
    square: GpuMesh,
}

impl GpuMeshes {
    fn upload(device: &wgpu::Device, geometry: &GeometryCache) -> Self {
        Self {
            icosphere: GpuMesh::upload(device, geometry.get(GeometryKind::Icosphere)),
            cube: GpuMesh::upload(device, geometry.get(GeometryKind::Cube)),
            square: GpuMesh::upload(device, geometry.get(GeometryKind::Square)),
        }
    }

    fn get(&self, kind: GeometryKind) -> &GpuMesh {
        match kind {
            GeometryKind::Icosphere => &self.icosphere,
            GeometryKind::Cube => &self.cube,
            GeometryKind::Square => &self.square,
        }
    }
}

/// Everything that needs a device; created in `on_gpu_ready`.
struct GpuState {
    shaders: ShaderLibrary,
    meshes: GpuMeshes,
    renderer: MeshRenderer,
}

pub struct DemoApp {
    panel: ControlPanel,
    geometry: GeometryCache,
    camera: OrbitCamera,
    stats: FrameStats,
    gpu: Option<GpuState>,
}

impl DemoApp {
    pub fn new(params: Params, camera: CameraConfig) -> Self {
        log::info!("initial params: {params}");
        Self {
            geometry: GeometryCache::new(&params),
            panel: ControlPanel::new(params),
            camera: OrbitCamera::new(camera, 1.0),
            stats: FrameStats::default(),
            gpu: None,
        }
    }

    /// Applies this frame's key presses. Returns `(exit, reload)`.
    fn handle_keys(&mut self, ctx: &mut FrameCtx<'_, '_>) -> (bool, bool) {
        let mut reload = false;

        for &key in &ctx.input_frame.keys_pressed {
            let event = match bindings::event_for_key(key, ctx.input.modifiers) {
                Some(Action::Exit) => return (true, reload),
                Some(Action::Control(event)) => event,
                None => continue,
            };

            let applied = self.panel.apply(event);
            reload |= matches!(applied, Applied::Reload(_));
            if let Some(params) = applied.published() {
                ctx.runtime.set_title(window_title(&params));
            }
        }

        (false, reload)
    }

    /// One frame of the demo, reading a single parameter snapshot.
    fn tick(&mut self, ctx: &mut FrameCtx<'_, '_>, params: Params, reload: bool) -> AppControl {
        let Some(gpu) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };

        if let Some(aspect) = ctx.gpu.aspect() {
            self.camera.set_aspect(aspect);
        }
        self.camera.update(ctx.input, ctx.input_frame);

        let color = params.color();

        let plan = FramePlan::prepare(&mut self.geometry, &params, reload, ctx.time.elapsed);
        match plan.upload {
            MeshUpload::Nothing => {}
            MeshUpload::Icosphere => {
                gpu.meshes.icosphere =
                    GpuMesh::upload(ctx.gpu.device(), self.geometry.get(GeometryKind::Icosphere));
            }
            MeshUpload::All => gpu.meshes = GpuMeshes::upload(ctx.gpu.device(), &self.geometry),
        }
        if let Some(time) = plan.time {
            gpu.shaders.get_mut(params.shader).set_time(time);
        }

        let program = gpu.shaders.get(params.shader);
        let mesh = gpu.meshes.get(params.geometry);
        let renderer = &mut gpu.renderer;
        let camera = &self.camera;

        ctx.render(|rctx, target| {
            renderer.render(rctx, target, camera, program, &[mesh], color);
        })
    }
}

impl App for DemoApp {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()> {
        let shaders = ShaderLibrary::new(gpu.device(), gpu.surface_format())
            .context("failed to build shader programs")?;

        if let Some(aspect) = gpu.aspect() {
            self.camera.set_aspect(aspect);
        }

        self.gpu = Some(GpuState {
            shaders,
            meshes: GpuMeshes::upload(gpu.device(), &self.geometry),
            renderer: MeshRenderer::new(CLEAR_COLOR),
        });

        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Some(report) = self.stats.record(ctx.time.dt) {
            log::debug!(
                "{:.1} fps ({:.2} ms/frame over {} frames)",
                report.fps,
                report.avg_frame_ms,
                report.frames
            );
        }

        let (exit, reload) = self.handle_keys(ctx);
        if exit {
            log::info!("exit requested");
            return AppControl::Exit;
        }

        let params = self.panel.params();
        self.tick(ctx, params, reload)
    }
}

pub fn window_title(params: &Params) -> String {
    format!(
        "orbis - {} / {} (level {})",
        params.geometry, params.shader, params.subdivisions
    )
}
