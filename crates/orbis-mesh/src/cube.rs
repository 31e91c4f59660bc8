use glam::Vec3;

use crate::drawable::Drawable;
use crate::mesh::Mesh;

/// Axis-aligned cube with flat-shaded faces.
///
/// Each face owns four vertices so normals stay per-face: 24 vertices,
/// 12 triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    center: Vec3,
    half_extent: f32,
    mesh: Mesh,
}

/// `(normal, u, v)` with `u × v == normal`, so `0,1,2 / 0,2,3` winds outward.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

impl Cube {
    pub fn new(center: Vec3, half_extent: f32) -> Self {
        debug_assert!(half_extent > 0.0, "half extent must be positive");

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (n, u, v) in FACES {
            let base = positions.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push(center + (n + u * su + v * sv) * half_extent);
                normals.push(n);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            center,
            half_extent,
            mesh: Mesh::new(positions, normals, indices),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }
}

impl Drawable for Cube {
    fn label(&self) -> &'static str {
        "cube"
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let c = Cube::new(Vec3::ZERO, 1.0);
        assert_eq!(c.mesh().vertex_count(), 24);
        assert_eq!(c.mesh().triangle_count(), 12);
    }

    #[test]
    fn faces_wind_outward_and_match_normals() {
        let c = Cube::new(Vec3::new(2.0, 0.0, -1.0), 0.5);
        let m = c.mesh();
        for t in m.triangles() {
            let face = m.face_normal(t).normalize();
            let n = m.normals()[t[0] as usize];
            assert!(face.abs_diff_eq(n, 1e-6), "face {face} vs normal {n}");
        }
    }

    #[test]
    fn corners_span_half_extent() {
        let center = Vec3::new(2.0, 0.0, -1.0);
        let c = Cube::new(center, 0.5);
        for p in c.positions() {
            let d = (*p - center).abs();
            assert!(d.abs_diff_eq(Vec3::splat(0.5), 1e-6), "corner offset {d}");
        }
    }

    #[test]
    fn faces_split_along_shared_diagonal() {
        // Faces do not share vertices, so the full cube is not index-closed,
        // but each face's two triangles must share exactly one diagonal.
        let c = Cube::new(Vec3::ZERO, 1.0);
        for face in c.indices().chunks_exact(6) {
            assert_eq!(face[0], face[3]);
            assert_eq!(face[2], face[4]);
        }
    }
}
