//! Orbis mesh crate.
//!
//! CPU-side procedural geometry shared by the engine and the demo:
//! - `Mesh`: owned vertex/index buffers
//! - `Drawable`: capability trait implemented by every shape
//! - shape generators: `Icosphere`, `Cube`, `Square`
//!
//! Conventions:
//! - right-handed, +Y up
//! - triangles are counter-clockwise when viewed from the outside

pub mod cube;
pub mod drawable;
pub mod icosphere;
pub mod mesh;
pub mod square;

pub use cube::Cube;
pub use drawable::Drawable;
pub use icosphere::{Icosphere, MAX_SUBDIVISIONS};
pub use mesh::Mesh;
pub use square::Square;
