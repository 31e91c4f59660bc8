//! Control panel: the only writer of `Params`.
//!
//! Input is turned into `ControlEvent`s; each applied event either leaves the
//! parameters untouched or publishes a new snapshot for the next tick.

use orbis_engine::render::ShaderKind;
use orbis_mesh::MAX_SUBDIVISIONS;

use crate::params::{Channel, GeometryKind, Params};

/// A user edit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ControlEvent {
    SelectGeometry(GeometryKind),
    CycleGeometry { backwards: bool },
    /// Clamped to `0..=MAX_SUBDIVISIONS`.
    SetSubdivisions(i32),
    StepSubdivisions(i32),
    SelectShader(ShaderKind),
    CycleShader,
    /// Each channel clamped to `0..=255`.
    SetColor([i32; 3]),
    NudgeColor { channel: Channel, delta: i32 },
    /// Rebuild every shape from the current parameters.
    Reload,
}

/// Outcome of [`ControlPanel::apply`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Applied {
    Unchanged,
    Changed(Params),
    Reload(Params),
}

impl Applied {
    /// The published snapshot, if any.
    pub fn published(self) -> Option<Params> {
        match self {
            Applied::Unchanged => None,
            Applied::Changed(p) | Applied::Reload(p) => Some(p),
        }
    }
}

#[derive(Debug, Default)]
pub struct ControlPanel {
    params: Params,
}

impl ControlPanel {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> Params {
        self.params
    }

    pub fn apply(&mut self, event: ControlEvent) -> Applied {
        let mut next = self.params;
        match event {
            ControlEvent::Reload => {
                log::info!("reloading scene: {}", self.params);
                return Applied::Reload(self.params);
            }
            ControlEvent::SelectGeometry(kind) => next.geometry = kind,
            ControlEvent::CycleGeometry { backwards: false } => next.geometry = next.geometry.next(),
            ControlEvent::CycleGeometry { backwards: true } => next.geometry = next.geometry.prev(),
            ControlEvent::SetSubdivisions(level) => next.subdivisions = clamp_level(level as i64),
            ControlEvent::StepSubdivisions(delta) => {
                next.subdivisions = clamp_level(next.subdivisions as i64 + delta as i64)
            }
            ControlEvent::SelectShader(kind) => next.shader = kind,
            ControlEvent::CycleShader => next.shader = next.shader.next(),
            ControlEvent::SetColor(rgb) => next.color = rgb.map(clamp_channel),
            ControlEvent::NudgeColor { channel, delta } => {
                let c = &mut next.color[channel.index()];
                *c = clamp_channel(c.saturating_add(delta));
            }
        }

        if next == self.params {
            return Applied::Unchanged;
        }

        if next.subdivisions != self.params.subdivisions && !next.subdivisions_active() {
            log::info!(
                "subdivision level {} pending until the icosphere is selected",
                next.subdivisions
            );
        }

        self.params = next;
        log::info!("params: {next}");
        Applied::Changed(next)
    }
}

fn clamp_level(level: i64) -> u32 {
    level.clamp(0, MAX_SUBDIVISIONS as i64) as u32
}

fn clamp_channel(v: i32) -> i32 {
    v.clamp(0, 255)
}
