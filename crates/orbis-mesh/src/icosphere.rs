//! Icosphere generation.
//!
//! Starts from a regular icosahedron and splits every triangle into four,
//! pushing each new edge midpoint back onto the unit sphere. Midpoints are
//! shared between the two faces of an edge, so the result stays watertight.

use std::collections::HashMap;

use glam::Vec3;

use crate::drawable::Drawable;
use crate::mesh::Mesh;

/// Highest accepted subdivision level. Level 8 is ~1.3M triangles.
pub const MAX_SUBDIVISIONS: u32 = 8;

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    // around vertex 0
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    // adjacent band
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    // around vertex 3
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    // adjacent band
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Sphere approximated by a subdivided icosahedron.
#[derive(Debug, Clone, PartialEq)]
pub struct Icosphere {
    center: Vec3,
    radius: f32,
    subdivisions: u32,
    mesh: Mesh,
}

impl Icosphere {
    /// Generates an icosphere.
    ///
    /// `subdivisions` above [`MAX_SUBDIVISIONS`] is clamped. `radius` must be
    /// positive.
    pub fn new(center: Vec3, radius: f32, subdivisions: u32) -> Self {
        debug_assert!(radius > 0.0 && radius.is_finite(), "radius must be positive");

        let level = if subdivisions > MAX_SUBDIVISIONS {
            log::warn!(
                "icosphere subdivision level {subdivisions} clamped to {MAX_SUBDIVISIONS}"
            );
            MAX_SUBDIVISIONS
        } else {
            subdivisions
        };

        let (unit, indices) = unit_icosphere(level);

        // Normals come from the unit directions, before scale and translation.
        let positions = unit.iter().map(|&n| center + n * radius).collect();
        let mesh = Mesh::new(positions, unit, indices);

        log::debug!(
            "icosphere level {level}: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Self {
            center,
            radius,
            subdivisions: level,
            mesh,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Effective (clamped) subdivision level.
    #[inline]
    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    /// Expected triangle count for `level`: `20 * 4^level`.
    pub const fn triangle_count_for(level: u32) -> usize {
        20 * 4usize.pow(level)
    }

    /// Expected vertex count for `level`: `10 * 4^level + 2` (Euler, V - E + F = 2).
    pub const fn vertex_count_for(level: u32) -> usize {
        10 * 4usize.pow(level) + 2
    }
}

impl Drawable for Icosphere {
    fn label(&self) -> &'static str {
        "icosphere"
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

/// Unit-sphere vertices and triangle indices after `level` subdivisions.
fn unit_icosphere(level: u32) -> (Vec<Vec3>, Vec<u32>) {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let mut vertices: Vec<Vec3> = [
        (-1.0, phi, 0.0), (1.0, phi, 0.0), (-1.0, -phi, 0.0), (1.0, -phi, 0.0),
        (0.0, -1.0, phi), (0.0, 1.0, phi), (0.0, -1.0, -phi), (0.0, 1.0, -phi),
        (phi, 0.0, -1.0), (phi, 0.0, 1.0), (-phi, 0.0, -1.0), (-phi, 0.0, 1.0),
    ]
    .into_iter()
    .map(|(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    let mut faces: Vec<[u32; 3]> = ICOSAHEDRON_FACES.to_vec();

    let final_vertices = Icosphere::vertex_count_for(level);
    vertices.reserve(final_vertices - vertices.len());

    for _ in 0..level {
        faces = subdivide(&mut vertices, &faces);
    }

    debug_assert_eq!(vertices.len(), final_vertices);

    let indices = faces.into_iter().flatten().collect();
    (vertices, indices)
}

/// Splits each face into four and appends the shared, normalized midpoints.
fn subdivide(vertices: &mut Vec<Vec3>, faces: &[[u32; 3]]) -> Vec<[u32; 3]> {
    // Each edge belongs to two faces: 3F/2 midpoints in total.
    let mut cache: HashMap<(u32, u32), u32> = HashMap::with_capacity(faces.len() * 3 / 2);
    let mut out = Vec::with_capacity(faces.len() * 4);

    for &[a, b, c] in faces {
        let ab = midpoint(&mut cache, vertices, a, b);
        let bc = midpoint(&mut cache, vertices, b, c);
        let ca = midpoint(&mut cache, vertices, c, a);

        out.push([a, ab, ca]);
        out.push([b, bc, ab]);
        out.push([c, ca, bc]);
        out.push([ab, bc, ca]);
    }

    out
}

/// Index of the midpoint of edge `a`-`b`, created on first request.
fn midpoint(
    cache: &mut HashMap<(u32, u32), u32>,
    vertices: &mut Vec<Vec3>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    *cache.entry(key).or_insert_with(|| {
        let mid = (vertices[a as usize] + vertices[b as usize]) * 0.5;
        vertices.push(mid.normalize());
        (vertices.len() - 1) as u32
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    // ── counts ────────────────────────────────────────────────────────────

    #[test]
    fn level_zero_is_icosahedron() {
        let s = Icosphere::new(Vec3::ZERO, 1.0, 0);
        assert_eq!(s.mesh().vertex_count(), 12);
        assert_eq!(s.mesh().triangle_count(), 20);
    }

    #[test]
    fn level_one_and_two() {
        let s1 = Icosphere::new(Vec3::ZERO, 1.0, 1);
        assert_eq!(s1.mesh().vertex_count(), 42);
        assert_eq!(s1.mesh().triangle_count(), 80);

        let s2 = Icosphere::new(Vec3::ZERO, 1.0, 2);
        assert_eq!(s2.mesh().vertex_count(), 162);
        assert_eq!(s2.mesh().triangle_count(), 320);
    }

    #[test]
    fn counts_follow_euler_for_every_level() {
        for level in 0..=MAX_SUBDIVISIONS {
            let s = Icosphere::new(Vec3::ZERO, 1.0, level);
            let f = s.mesh().triangle_count();
            let v = s.mesh().vertex_count();
            assert_eq!(f, Icosphere::triangle_count_for(level), "level {level}");
            assert_eq!(v, f / 2 + 2, "level {level}");
        }
    }

    #[test]
    fn euler_characteristic_with_edges() {
        let m = Icosphere::new(Vec3::ZERO, 1.0, 3).mesh().clone();
        let v = m.vertex_count() as i64;
        let e = m.edge_count() as i64;
        let f = m.triangle_count() as i64;
        assert_eq!(v - e + f, 2);
    }

    #[test]
    fn level_above_max_is_clamped() {
        let s = Icosphere::new(Vec3::ZERO, 1.0, 42);
        assert_eq!(s.subdivisions(), MAX_SUBDIVISIONS);
        assert_eq!(
            s.mesh().triangle_count(),
            Icosphere::triangle_count_for(MAX_SUBDIVISIONS)
        );
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn vertices_lie_on_sphere() {
        let center = Vec3::new(1.5, -2.0, 0.25);
        let radius = 3.0;
        for level in 0..=4 {
            let s = Icosphere::new(center, radius, level);
            for p in s.positions() {
                let d = (*p - center).length();
                assert!((d - radius).abs() < radius * EPS, "distance {d} at level {level}");
            }
        }
    }

    #[test]
    fn normals_are_unit_outward_directions() {
        let center = Vec3::new(0.0, 4.0, -1.0);
        let s = Icosphere::new(center, 2.5, 3);
        for (p, n) in s.positions().iter().zip(s.normals()) {
            assert!((n.length() - 1.0).abs() < EPS);
            let dir = (*p - center).normalize();
            assert!(dir.abs_diff_eq(*n, 1e-4), "normal {n} vs direction {dir}");
        }
    }

    #[test]
    fn faces_wind_outward() {
        let s = Icosphere::new(Vec3::ZERO, 1.0, 2);
        let m = s.mesh();
        for t in m.triangles() {
            let centroid = (m.positions()[t[0] as usize]
                + m.positions()[t[1] as usize]
                + m.positions()[t[2] as usize])
                / 3.0;
            assert!(m.face_normal(t).dot(centroid) > 0.0, "inward face {t:?}");
        }
    }

    // ── topology ──────────────────────────────────────────────────────────

    #[test]
    fn watertight_at_each_level() {
        for level in 0..=4 {
            let s = Icosphere::new(Vec3::ZERO, 1.0, level);
            assert!(s.mesh().is_closed(), "level {level} has open or flipped edges");
        }
    }

    #[test]
    fn no_duplicate_vertices() {
        let s = Icosphere::new(Vec3::ZERO, 1.0, 3);
        let p = s.positions();
        let mut sorted: Vec<[u32; 3]> = p
            .iter()
            .map(|v| [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()])
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), p.len());
    }

    // ── determinism ───────────────────────────────────────────────────────

    #[test]
    fn output_is_bit_identical() {
        let a = Icosphere::new(Vec3::new(0.1, 0.2, 0.3), 1.7, 4);
        let b = Icosphere::new(Vec3::new(0.1, 0.2, 0.3), 1.7, 4);
        assert_eq!(a.indices(), b.indices());
        let bits = |s: &Icosphere| -> Vec<u32> {
            s.positions()
                .iter()
                .chain(s.normals())
                .flat_map(|v| v.to_array())
                .map(f32::to_bits)
                .collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }
}
