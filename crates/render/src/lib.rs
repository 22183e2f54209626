//! Rendering adapter: walks the scene graph and drives a [`GpuBackend`].
//!
//! # Invariants
//! - The renderer never mutates the scene; it reads orientations and the camera only.
//! - The transform stack depth after drawing a node equals the depth before it.
//! - A uniform is uploaded only when the bound program declares it.
//!
//! The GPU itself sits behind the [`GpuBackend`] trait. [`RecordingBackend`] is the
//! in-memory implementation used for headless runs and tests.

pub mod backend;
pub mod error;
pub mod material;
pub mod recording;
pub mod renderer;
pub mod shader;

pub use backend::{
    GpuBackend, ProgramHandle, ShaderSource, ShaderStage, TextureHandle, UniformValue,
};
pub use error::RenderError;
pub use material::Material;
pub use recording::{Command, RecordingBackend};
pub use renderer::{SceneRenderer, uniforms};
pub use shader::{ShaderProgram, scan_uniforms};

pub fn crate_info() -> &'static str {
    "orrery-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
