//! Per-frame CPU decisions, made before any GPU work.

use crate::geometry::GeometryCache;
use crate::params::Params;

/// Which GPU meshes are stale after this frame's geometry update.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MeshUpload {
    Nothing,
    Icosphere,
    All,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FramePlan {
    pub upload: MeshUpload,
    /// Time to hand to the selected program, if it animates.
    pub time: Option<f32>,
}

impl FramePlan {
    /// Brings `geometry` up to date with `params` and reports what the GPU
    /// side has to follow up with.
    pub fn prepare(geometry: &mut GeometryCache, params: &Params, reload: bool, elapsed: f32) -> Self {
        let upload = if reload {
            geometry.reload(params);
            MeshUpload::All
        } else if geometry.sync(params) {
            MeshUpload::Icosphere
        } else {
            MeshUpload::Nothing
        };

        if upload != MeshUpload::Nothing {
            log::debug!("geometry rebuilds so far: {}", geometry.rebuilds());
        }

        Self {
            upload,
            time: params.shader.uses_time().then_some(elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use orbis_engine::render::ShaderKind;

    use super::*;
    use crate::params::GeometryKind;

    fn params(geometry: GeometryKind, subdivisions: u32, shader: ShaderKind) -> Params {
        Params {
            geometry,
            subdivisions,
            shader,
            ..Params::default()
        }
    }

    #[test]
    fn reload_uploads_everything() {
        let p = params(GeometryKind::Cube, 2, ShaderKind::Perlin);
        let mut cache = GeometryCache::new(&params(GeometryKind::Cube, 4, ShaderKind::Perlin));

        let plan = FramePlan::prepare(&mut cache, &p, true, 1.0);
        assert_eq!(plan.upload, MeshUpload::All);
        assert_eq!(cache.built_level(), 2);
    }

    #[test]
    fn selected_icosphere_level_change_uploads_icosphere() {
        let mut cache = GeometryCache::new(&params(GeometryKind::Icosphere, 1, ShaderKind::Lambert));
        let p = params(GeometryKind::Icosphere, 2, ShaderKind::Lambert);

        assert_eq!(FramePlan::prepare(&mut cache, &p, false, 0.0).upload, MeshUpload::Icosphere);
        assert_eq!(FramePlan::prepare(&mut cache, &p, false, 0.0).upload, MeshUpload::Nothing);
    }

    #[test]
    fn hidden_level_change_uploads_nothing() {
        let mut cache = GeometryCache::new(&params(GeometryKind::Square, 1, ShaderKind::Lambert));
        let p = params(GeometryKind::Square, 3, ShaderKind::Lambert);

        assert_eq!(FramePlan::prepare(&mut cache, &p, false, 0.0).upload, MeshUpload::Nothing);
        assert_eq!(cache.built_level(), 1);
    }

    #[test]
    fn only_wave_deform_gets_time() {
        let mut cache = GeometryCache::new(&Params::default());
        for (shader, expected) in [
            (ShaderKind::Lambert, None),
            (ShaderKind::Perlin, None),
            (ShaderKind::WaveDeform, Some(3.5)),
        ] {
            let p = params(GeometryKind::Cube, 5, shader);
            assert_eq!(FramePlan::prepare(&mut cache, &p, false, 3.5).time, expected);
        }
    }
}
