use glam::{Vec3, Vec4};

use crate::mesh::Mesh;

/// Anything that can hand a triangle mesh to a renderer.
///
/// Implemented by each concrete shape so callers can treat "the current
/// geometry" uniformly without knowing which generator produced it.
pub trait Drawable {
    /// Short human-readable name, used for GPU labels and logs.
    fn label(&self) -> &'static str;

    /// Built mesh.
    fn mesh(&self) -> &Mesh;

    fn positions(&self) -> &[Vec3] {
        self.mesh().positions()
    }

    fn normals(&self) -> &[Vec3] {
        self.mesh().normals()
    }

    fn colors(&self) -> Option<&[Vec4]> {
        self.mesh().colors()
    }

    fn indices(&self) -> &[u32] {
        self.mesh().indices()
    }
}

impl Drawable for Mesh {
    fn label(&self) -> &'static str {
        "mesh"
    }

    fn mesh(&self) -> &Mesh {
        self
    }
}
