//! CPU-side shapes and the lazy icosphere rebuild.

use glam::Vec3;
use orbis_mesh::{Cube, Drawable, Icosphere, Square};

use crate::params::{GeometryKind, Params};

const CENTER: Vec3 = Vec3::ZERO;
const ICOSPHERE_RADIUS: f32 = 1.0;
const HALF_EXTENT: f32 = 1.0;

/// Holds one instance of every shape.
///
/// The icosphere is regenerated only while it is the selected geometry: a
/// level change made while another shape is shown stays pending until the
/// icosphere is selected again.
pub struct GeometryCache {
    icosphere: Icosphere,
    cube: Cube,
    square: Square,
    built_level: u32,
    rebuilds: u64,
}

impl GeometryCache {
    pub fn new(params: &Params) -> Self {
        Self {
            icosphere: Icosphere::new(CENTER, ICOSPHERE_RADIUS, params.subdivisions),
            cube: Cube::new(CENTER, HALF_EXTENT),
            square: Square::new(CENTER, HALF_EXTENT),
            built_level: params.subdivisions,
            rebuilds: 0,
        }
    }

    /// Rebuilds the icosphere if it is selected and out of date.
    ///
    /// Returns `true` when it was rebuilt.
    pub fn sync(&mut self, params: &Params) -> bool {
        if params.geometry != GeometryKind::Icosphere || params.subdivisions == self.built_level {
            return false;
        }

        log::info!(
            "rebuilding icosphere: level {} -> {}",
            self.built_level,
            params.subdivisions
        );
        self.icosphere = Icosphere::new(CENTER, ICOSPHERE_RADIUS, params.subdivisions);
        self.built_level = params.subdivisions;
        self.rebuilds += 1;
        true
    }

    /// Rebuilds every shape from `params`.
    pub fn reload(&mut self, params: &Params) {
        let rebuilds = self.rebuilds + 1;
        *self = Self::new(params);
        self.rebuilds = rebuilds;
    }

    /// Subdivision level of the current icosphere.
    pub fn built_level(&self) -> u32 {
        self.built_level
    }

    /// Number of rebuilds since creation.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    pub fn get(&self, kind: GeometryKind) -> &dyn Drawable {
        match kind {
            GeometryKind::Icosphere => &self.icosphere,
            GeometryKind::Cube => &self.cube,
            GeometryKind::Square => &self.square,
        }
    }
}
