//! Orbis engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demo:
//! window/event loop, wgpu device, input, frame timing, and the mesh renderer.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;
