//! Scene parameters: the immutable snapshot each frame tick reads.

use std::fmt;

use orbis_engine::paint::Color;
use orbis_engine::render::ShaderKind;

/// Which shape is drawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GeometryKind {
    Icosphere,
    Cube,
    Square,
}

impl GeometryKind {
    #[cfg(test)]
    pub const ALL: [GeometryKind; 3] = [GeometryKind::Icosphere, GeometryKind::Cube, GeometryKind::Square];

    pub fn label(self) -> &'static str {
        match self {
            GeometryKind::Icosphere => "icosphere",
            GeometryKind::Cube => "cube",
            GeometryKind::Square => "square",
        }
    }

    pub fn next(self) -> Self {
        match self {
            GeometryKind::Icosphere => GeometryKind::Cube,
            GeometryKind::Cube => GeometryKind::Square,
            GeometryKind::Square => GeometryKind::Icosphere,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            GeometryKind::Icosphere => GeometryKind::Square,
            GeometryKind::Cube => GeometryKind::Icosphere,
            GeometryKind::Square => GeometryKind::Cube,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// RGB channel index into `Params::color`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Snapshot of everything the user can change.
///
/// `color` is stored as entered (0..=255 per channel after the control panel
/// clamps it); [`Params::color`] converts it for the GPU.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Params {
    pub geometry: GeometryKind,
    pub subdivisions: u32,
    pub shader: ShaderKind,
    pub color: [i32; 3],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            geometry: GeometryKind::Cube,
            subdivisions: 5,
            shader: ShaderKind::Perlin,
            color: [255, 0, 0],
        }
    }
}

impl Params {
    /// The subdivision level only affects the icosphere.
    pub fn subdivisions_active(&self) -> bool {
        self.geometry == GeometryKind::Icosphere
    }

    /// Uniform color: channels clamped to 0..=255, scaled to 0..=1, opaque.
    pub fn color(&self) -> Color {
        Color::from_rgb_clamped(self.color)
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.color;
        write!(
            f,
            "geometry={} subdivisions={} shader={} color=({r}, {g}, {b})",
            self.geometry, self.subdivisions, self.shader
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = Params::default();
        assert_eq!(p.geometry, GeometryKind::Cube);
        assert_eq!(p.subdivisions, 5);
        assert_eq!(p.shader, ShaderKind::Perlin);
        assert_eq!(p.color().to_array(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn color_is_clamped() {
        let p = Params {
            color: [300, -20, 51],
            ..Params::default()
        };
        assert_eq!(p.color().to_array(), [1.0, 0.0, 0.2, 1.0]);
    }

    #[test]
    fn geometry_cycles_both_ways() {
        for kind in GeometryKind::ALL {
            assert_eq!(kind.next().prev(), kind);
        }
        assert_eq!(GeometryKind::Square.next(), GeometryKind::Icosphere);
    }

    #[test]
    fn subdivisions_only_matter_for_icosphere() {
        let mut p = Params::default();
        assert!(!p.subdivisions_active());
        p.geometry = GeometryKind::Icosphere;
        assert!(p.subdivisions_active());
    }
}
