use std::collections::BTreeSet;

use crate::backend::{GpuBackend, ProgramHandle, ShaderSource};
use crate::error::RenderError;

/// Uniform names declared in GLSL source.
///
/// A declaration is a line whose first token is `uniform`; the name is its third
/// whitespace-separated token with any `;` and array suffix removed.
pub fn scan_uniforms(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            (tokens.next() == Some("uniform")).then(|| tokens.nth(1)).flatten()
        })
        .map(|token| {
            let name = token.trim_end_matches(';');
            name.split('[').next().unwrap_or(name).to_string()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// A linked program and the uniform names its stages declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderProgram {
    name: String,
    handle: ProgramHandle,
    uniforms: BTreeSet<String>,
}

impl ShaderProgram {
    /// Link `sources` on the backend and record their uniforms.
    pub fn link<B: GpuBackend + ?Sized>(
        backend: &mut B,
        name: impl Into<String>,
        sources: &[ShaderSource],
    ) -> Result<Self, RenderError> {
        let name = name.into();
        if sources.is_empty() {
            return Err(RenderError::EmptyProgram(name));
        }
        // Backends don't know program names; attach ours to link failures.
        let handle = backend.link_program(sources).map_err(|err| match err {
            RenderError::LinkFailed { reason, .. } => RenderError::LinkFailed {
                name: name.clone(),
                reason,
            },
            other => other,
        })?;
        let uniforms: BTreeSet<String> = sources
            .iter()
            .flat_map(|s| scan_uniforms(&s.text))
            .collect();
        tracing::debug!(shader = %name, ?handle, uniforms = uniforms.len(), "linked shader");
        Ok(Self {
            name,
            handle,
            uniforms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    pub fn declares(&self, uniform: &str) -> bool {
        self.uniforms.contains(uniform)
    }

    pub fn uniforms(&self) -> impl Iterator<Item = &str> {
        self.uniforms.iter().map(String::as_str)
    }
}
