use orrery_scene::MeshHandle;

use crate::backend::{
    GpuBackend, ProgramHandle, ShaderSource, ShaderStage, TextureHandle, UniformValue,
};
use crate::error::RenderError;

/// One call made against a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LinkProgram {
        program: ProgramHandle,
        stages: Vec<ShaderStage>,
    },
    UseProgram(Option<ProgramHandle>),
    Uniform {
        program: ProgramHandle,
        name: String,
        value: UniformValue,
    },
    BindTexture {
        texture: TextureHandle,
        unit: u32,
    },
    BindMesh(MeshHandle),
    Draw(MeshHandle),
}

/// Backend that keeps every command in memory instead of talking to a GPU.
///
/// Linking fails when a stage has no `main` function, standing in for a compile error.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<Command>,
    next_program: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Forget recorded commands. Program handles keep counting.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Draw(_)))
            .count()
    }

    /// Every value uploaded to `name`, in upload order.
    pub fn uniform_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a UniformValue> {
        self.commands.iter().filter_map(move |c| match c {
            Command::Uniform { name: n, value, .. } if n == name => Some(value),
            _ => None,
        })
    }
}

impl GpuBackend for RecordingBackend {
    fn link_program(&mut self, sources: &[ShaderSource]) -> Result<ProgramHandle, RenderError> {
        if let Some(bad) = sources.iter().find(|s| !s.text.contains("main")) {
            return Err(RenderError::LinkFailed {
                name: String::new(),
                reason: format!("{:?} stage has no main function", bad.stage),
            });
        }
        self.next_program += 1;
        let program = ProgramHandle(self.next_program);
        self.commands.push(Command::LinkProgram {
            program,
            stages: sources.iter().map(|s| s.stage).collect(),
        });
        Ok(program)
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.commands.push(Command::UseProgram(program));
    }

    fn upload_uniform(&mut self, program: ProgramHandle, name: &str, value: &UniformValue) {
        self.commands.push(Command::Uniform {
            program,
            name: name.to_string(),
            value: *value,
        });
    }

    fn bind_texture(&mut self, texture: TextureHandle, unit: u32) {
        self.commands.push(Command::BindTexture { texture, unit });
    }

    fn bind_mesh(&mut self, mesh: MeshHandle) {
        self.commands.push(Command::BindMesh(mesh));
    }

    fn draw_indexed(&mut self, mesh: MeshHandle) {
        self.commands.push(Command::Draw(mesh));
    }
}
