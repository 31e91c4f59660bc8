//! GPU rendering subsystem.
//!
//! - `mesh`: uploads CPU meshes (`orbis_mesh::Drawable`) into vertex/index buffers
//! - `shader`: the closed set of shader programs, validated before compilation
//! - `camera`: orbit camera producing view/projection matrices
//! - `renderer`: draws a mesh list with one program, one color and depth testing
//!
//! Convention: right-handed world space, +Y up, wgpu clip space (depth 0..1).

pub mod camera;
mod ctx;
mod depth;
pub mod mesh;
pub mod renderer;
pub mod shader;

pub use camera::{CameraConfig, OrbitCamera};
pub use ctx::{RenderCtx, RenderTarget};
pub use depth::DepthBuffer;
pub use mesh::{GpuMesh, GpuVertex};
pub use renderer::MeshRenderer;
pub use shader::{ShaderError, ShaderKind, ShaderLibrary, ShaderProgram, ShaderStage};
