use std::collections::HashMap;

use glam::{Vec3, Vec4};

/// Owned triangle mesh.
///
/// Invariants:
/// - `positions.len() == normals.len()`
/// - `colors`, when present, has one entry per vertex
/// - `indices.len()` is a multiple of 3 and every index is `< positions.len()`
///
/// A mesh is immutable once built; generators produce a new one instead of
/// patching an old one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    colors: Option<Vec<Vec4>>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Builds a mesh from raw buffers.
    ///
    /// Panics if the buffers violate the invariants above. Generators in this
    /// crate construct them correctly by construction.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        assert_eq!(positions.len(), normals.len(), "one normal per position");
        assert_eq!(indices.len() % 3, 0, "indices must form whole triangles");
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < positions.len()),
            "index out of range"
        );

        Self {
            positions,
            normals,
            colors: None,
            indices,
        }
    }

    /// Attaches per-vertex RGBA colors.
    pub fn with_colors(mut self, colors: Vec<Vec4>) -> Self {
        assert_eq!(colors.len(), self.positions.len(), "one color per position");
        self.colors = Some(colors);
        self
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    #[inline]
    pub fn colors(&self) -> Option<&[Vec4]> {
        self.colors.as_deref()
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates triangles as index triples in buffer order.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_uses().len()
    }

    /// Returns `true` when every undirected edge is shared by exactly two
    /// triangles that traverse it in opposite directions.
    ///
    /// That is the closed, consistently wound surface condition: no cracks,
    /// no T-junctions from duplicated vertices, no flipped faces.
    pub fn is_closed(&self) -> bool {
        self.edge_uses()
            .values()
            .all(|&(forward, backward)| forward == 1 && backward == 1)
    }

    // (min, max) -> (uses as min→max, uses as max→min)
    fn edge_uses(&self) -> HashMap<(u32, u32), (u32, u32)> {
        let mut uses: HashMap<(u32, u32), (u32, u32)> = HashMap::new();
        for [a, b, c] in self.triangles() {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                let entry = uses.entry((from.min(to), from.max(to))).or_default();
                if from < to {
                    entry.0 += 1;
                } else {
                    entry.1 += 1;
                }
            }
        }
        uses
    }

    /// Face normal of triangle `t` (unnormalized cross product, CCW winding).
    pub fn face_normal(&self, t: [u32; 3]) -> Vec3 {
        let a = self.positions[t[0] as usize];
        let b = self.positions[t[1] as usize];
        let c = self.positions[t[2] as usize];
        (b - a).cross(c - a)
    }
}
