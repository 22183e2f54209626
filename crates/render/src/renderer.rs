use std::collections::HashMap;

use orrery_common::RenderConfig;
use orrery_math::TransformStack;
use orrery_scene::{Camera, Node, ProjectedOrientation};

use crate::backend::{GpuBackend, ShaderSource, UniformValue};
use crate::error::RenderError;
use crate::material::Material;
use crate::shader::ShaderProgram;

/// Uniform names the renderer fills in when a program declares them.
pub mod uniforms {
    pub const PROJECTED_CAMERA_MATRIX: &str = "projectedCameraMatrix";
    pub const MODEL_MATRIX: &str = "modelMatrix";
    pub const NORMAL_MATRIX: &str = "normalMatrix";
    pub const SAMPLER: &str = "sampler";
    pub const COLOR: &str = "color";
}

/// Draws scene trees through a [`GpuBackend`].
///
/// Owns the transform stack, the registered shader programs and materials, and which
/// of them are currently bound.
#[derive(Debug)]
pub struct SceneRenderer {
    stack: TransformStack,
    texture_unit: u32,
    shaders: HashMap<String, ShaderProgram>,
    materials: HashMap<String, Material>,
    current_shader: Option<String>,
    current_material: Option<String>,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl SceneRenderer {
    pub fn new(stack_depth: usize, texture_unit: u32) -> Self {
        Self {
            stack: TransformStack::new(stack_depth),
            texture_unit,
            shaders: HashMap::new(),
            materials: HashMap::new(),
            current_shader: None,
            current_material: None,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.stack_depth, config.texture_unit)
    }

    pub fn stack(&self) -> &TransformStack {
        &self.stack
    }

    /// Link a program and register it under `name`, replacing any previous one.
    pub fn add_shader<B: GpuBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        name: &str,
        sources: &[ShaderSource],
    ) -> Result<(), RenderError> {
        let program = ShaderProgram::link(backend, name, sources)?;
        self.shaders.insert(name.to_string(), program);
        Ok(())
    }

    pub fn shader(&self, name: &str) -> Option<&ShaderProgram> {
        self.shaders.get(name)
    }

    /// Bind the program registered as `name`. An unknown name unbinds the current program
    /// and returns `false`.
    pub fn use_shader<B: GpuBackend + ?Sized>(&mut self, backend: &mut B, name: &str) -> bool {
        // Material uniforms belong to the previous program.
        self.current_material = None;
        match self.shaders.get(name) {
            Some(program) => {
                backend.use_program(Some(program.handle()));
                self.current_shader = Some(name.to_string());
                true
            }
            None => {
                tracing::warn!(shader = name, "unknown shader, unbinding program");
                backend.use_program(None);
                self.current_shader = None;
                false
            }
        }
    }

    pub fn current_shader(&self) -> Option<&ShaderProgram> {
        self.current_shader
            .as_deref()
            .and_then(|name| self.shaders.get(name))
    }

    /// Upload a game-specific uniform to the bound program. Returns `false` when no program
    /// is bound or the program does not declare `name`.
    pub fn set_uniform<B: GpuBackend + ?Sized>(
        &self,
        backend: &mut B,
        name: &str,
        value: UniformValue,
    ) -> bool {
        match self.current_shader() {
            Some(program) if program.declares(name) => {
                backend.upload_uniform(program.handle(), name, &value);
                true
            }
            _ => false,
        }
    }

    pub fn add_material(&mut self, name: &str, material: Material) {
        tracing::debug!(material = name, "registered material");
        self.materials.insert(name.to_string(), material);
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Draw every root in order with the bound program. Returns the number of draws issued.
    ///
    /// Per-pass uniforms are uploaded first, then each tree is walked depth first. On error
    /// the transform stack is emptied so the next pass starts clean.
    pub fn render_models<B: GpuBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        roots: &[Node],
        world: &ProjectedOrientation,
        camera: &Camera,
    ) -> Result<usize, RenderError> {
        let program = self
            .current_shader()
            .cloned()
            .ok_or(RenderError::NoProgramBound)?;

        let capacity = self.stack.capacity() - self.stack.depth();
        let depth = roots.iter().map(Node::depth).max().unwrap_or(0);
        if depth > capacity {
            return Err(RenderError::SceneTooDeep { depth, capacity });
        }

        upload_if_declared(
            backend,
            &program,
            uniforms::PROJECTED_CAMERA_MATRIX,
            || UniformValue::matrix(&world.camera_projected_transformation_matrix(camera)),
        );
        upload_if_declared(backend, &program, uniforms::SAMPLER, || {
            UniformValue::Int(self.texture_unit as i32)
        });
        let current = self.current_material.as_deref();
        if let Some(material) = current.and_then(|name| self.materials.get(name)) {
            let color = material.color;
            upload_if_declared(backend, &program, uniforms::COLOR, || {
                UniformValue::Vec3(color)
            });
        }

        let mut draws = 0;
        for root in roots {
            if let Err(err) = self.render_node(backend, &program, root, &mut draws) {
                self.stack.clear();
                return Err(err);
            }
        }
        Ok(draws)
    }

    fn render_node<B: GpuBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        program: &ShaderProgram,
        node: &Node,
        draws: &mut usize,
    ) -> Result<(), RenderError> {
        let depth = self.stack.depth();
        self.stack.push(node.orientation().transformation_matrix())?;

        match node {
            Node::Group { children, .. } => {
                for child in children {
                    self.render_node(backend, program, child, draws)?;
                }
            }
            Node::Leaf { material, mesh, .. } => {
                self.use_material(backend, program, material)?;
                backend.bind_mesh(*mesh);
                self.upload_model_data(backend, program);
                backend.draw_indexed(*mesh);
                *draws += 1;
            }
        }

        self.stack.pop()?;
        debug_assert_eq!(self.stack.depth(), depth);
        Ok(())
    }

    fn use_material<B: GpuBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        program: &ShaderProgram,
        name: &str,
    ) -> Result<(), RenderError> {
        if self.current_material.as_deref() == Some(name) {
            return Ok(());
        }
        let material = *self
            .materials
            .get(name)
            .ok_or_else(|| RenderError::UnknownMaterial(name.to_string()))?;
        backend.bind_texture(material.texture, self.texture_unit);
        upload_if_declared(backend, program, uniforms::COLOR, || {
            UniformValue::Vec3(material.color)
        });
        self.current_material = Some(name.to_string());
        Ok(())
    }

    fn upload_model_data<B: GpuBackend + ?Sized>(&self, backend: &mut B, program: &ShaderProgram) {
        if let Some(model) = self.stack.current_transform() {
            upload_if_declared(backend, program, uniforms::MODEL_MATRIX, || {
                UniformValue::matrix(&model)
            });
        }
        if let Some(normal) = self.stack.current_rotation() {
            upload_if_declared(backend, program, uniforms::NORMAL_MATRIX, || {
                UniformValue::matrix(&normal)
            });
        }
    }
}

fn upload_if_declared<B: GpuBackend + ?Sized>(
    backend: &mut B,
    program: &ShaderProgram,
    name: &str,
    value: impl FnOnce() -> UniformValue,
) {
    if program.declares(name) {
        backend.upload_uniform(program.handle(), name, &value());
    } else {
        tracing::trace!(shader = program.name(), uniform = name, "uniform not declared, skipped");
    }
}
