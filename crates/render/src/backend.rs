use glam::{Mat4, Vec3};
use orrery_math::matrix::to_row_major;
use orrery_scene::MeshHandle;

use crate::error::RenderError;

/// Linked GPU program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u64);

/// Texture already uploaded by the host's texture loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

/// One stage's source text, already loaded by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub text: String,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }
}

/// Value of a single uniform. Matrices travel as 16 row-major floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Mat4([f32; 16]),
}

impl UniformValue {
    pub fn matrix(m: &Mat4) -> Self {
        UniformValue::Mat4(to_row_major(m))
    }

    /// The matrix back in glam's layout, if this is a matrix.
    pub fn as_mat4(&self) -> Option<Mat4> {
        match self {
            UniformValue::Mat4(rows) => Some(Mat4::from_cols_array(rows).transpose()),
            _ => None,
        }
    }
}

/// The slice of a GPU API the renderer needs.
///
/// Implementations own program linking, texture and buffer binding. Compilation and
/// file loading happen on the host side before anything reaches this trait.
pub trait GpuBackend {
    fn link_program(&mut self, sources: &[ShaderSource]) -> Result<ProgramHandle, RenderError>;
    /// Bind a program, or unbind with `None`.
    fn use_program(&mut self, program: Option<ProgramHandle>);
    fn upload_uniform(&mut self, program: ProgramHandle, name: &str, value: &UniformValue);
    fn bind_texture(&mut self, texture: TextureHandle, unit: u32);
    fn bind_mesh(&mut self, mesh: MeshHandle);
    fn draw_indexed(&mut self, mesh: MeshHandle);
}
