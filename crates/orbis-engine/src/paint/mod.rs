//! Paint model shared between the demo and renderers.
//!
//! Scope is a single straight-alpha RGBA color: the demo draws opaque meshes
//! only, so there is no blending model to encode here.

pub mod color;

pub use color::Color;
