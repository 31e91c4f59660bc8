use super::camera::OrbitCamera;
use super::ctx::{RenderCtx, RenderTarget};
use super::depth::DepthBuffer;
use super::mesh::GpuMesh;
use super::shader::{FrameUniform, ShaderProgram};
use crate::paint::Color;

/// Draws a list of meshes with one program and one color.
///
/// Owns the depth buffer and lazily (re)creates it to match the target size.
/// Every `render` call clears color and depth, so one call is one frame.
pub struct MeshRenderer {
    clear_color: Color,
    depth: Option<DepthBuffer>,
}

impl MeshRenderer {
    pub fn new(clear_color: Color) -> Self {
        Self {
            clear_color,
            depth: None,
        }
    }

    fn ensure_depth(&mut self, device: &wgpu::Device, width: u32, height: u32) -> &DepthBuffer {
        let depth = self
            .depth
            .get_or_insert_with(|| DepthBuffer::new(device, width, height));
        depth.ensure_size(device, width, height);
        depth
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &OrbitCamera,
        program: &ShaderProgram,
        meshes: &[&GpuMesh],
        color: Color,
    ) {
        let uniform = FrameUniform::new(camera.view_projection(), color.clamped(), program.time());
        program.write_uniform(ctx.queue, &uniform);

        let clear = self.clear_color.to_wgpu();
        let depth = self.ensure_depth(ctx.device, ctx.width, ctx.height);

        let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("orbis mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth.view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        program.bind(&mut pass);
        for mesh in meshes {
            mesh.draw(&mut pass);
        }
    }
}
