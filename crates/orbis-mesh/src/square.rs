use glam::Vec3;

use crate::drawable::Drawable;
use crate::mesh::Mesh;

/// Flat square in the XY plane facing +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    center: Vec3,
    half_extent: f32,
    mesh: Mesh,
}

impl Square {
    pub fn new(center: Vec3, half_extent: f32) -> Self {
        debug_assert!(half_extent > 0.0, "half extent must be positive");

        let positions = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
            .into_iter()
            .map(|(x, y)| center + Vec3::new(x, y, 0.0) * half_extent)
            .collect();

        Self {
            center,
            half_extent,
            mesh: Mesh::new(positions, vec![Vec3::Z; 4], vec![0, 1, 2, 0, 2, 3]),
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

impl Drawable for Square {
    fn label(&self) -> &'static str {
        "square"
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_triangles_facing_z() {
        let s = Square::new(Vec3::ZERO, 1.0);
        let m = s.mesh();
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.triangle_count(), 2);
        for t in m.triangles() {
            assert!(m.face_normal(t).normalize().abs_diff_eq(Vec3::Z, 1e-6));
        }
    }

    #[test]
    fn is_an_open_surface() {
        assert!(!Square::new(Vec3::ZERO, 1.0).mesh().is_closed());
    }

    #[test]
    fn centered_on_request() {
        let center = Vec3::new(0.0, 3.0, -2.0);
        let s = Square::new(center, 2.0);
        let sum: Vec3 = s.positions().iter().copied().sum();
        assert!((sum / 4.0).abs_diff_eq(center, 1e-6));
    }
}
