use bytemuck::{Pod, Zeroable};
use orbis_mesh::Drawable;
use wgpu::util::DeviceExt;

use crate::paint::Color;

/// Interleaved vertex as laid out in the vertex buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl GpuVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Interleaves a drawable's attributes. Meshes without colors get white.
pub fn interleave(drawable: &dyn Drawable) -> Vec<GpuVertex> {
    let colors = drawable.colors();
    drawable
        .positions()
        .iter()
        .zip(drawable.normals())
        .enumerate()
        .map(|(i, (p, n))| GpuVertex {
            position: p.to_array(),
            normal: n.to_array(),
            color: colors.map_or(Color::WHITE.to_array(), |c| c[i].to_array()),
        })
        .collect()
}

/// A mesh resident in GPU buffers.
///
/// Immutable: a changed shape is uploaded as a new `GpuMesh` and the old one
/// dropped.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, drawable: &dyn Drawable) -> Self {
        let label = drawable.label();
        let vertices = interleave(drawable);
        let indices = drawable.indices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "uploaded {label}: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    pub(crate) fn draw<'p>(&self, pass: &mut wgpu::RenderPass<'p>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};
    use orbis_mesh::{Cube, Mesh};

    use super::*;

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<GpuVertex>(), 40);
        let layout = GpuVertex::layout();
        assert_eq!(layout.array_stride, 40);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[2].offset, 24);
    }

    #[test]
    fn missing_colors_default_to_white() {
        let cube = Cube::new(Vec3::ZERO, 1.0);
        let v = interleave(&cube);
        assert_eq!(v.len(), 24);
        assert!(v.iter().all(|v| v.color == [1.0; 4]));
        assert_eq!(v[0].position, cube.positions()[0].to_array());
    }

    #[test]
    fn vertex_colors_are_carried() {
        let m = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![Vec3::Z; 3], vec![0, 1, 2])
            .with_colors(vec![Vec4::new(0.0, 1.0, 0.0, 1.0); 3]);
        let v = interleave(&m);
        assert!(v.iter().all(|v| v.color == [0.0, 1.0, 0.0, 1.0]));
    }
}
