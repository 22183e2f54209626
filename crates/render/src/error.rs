use orrery_math::StackError;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("transform stack: {0}")]
    Stack(#[from] StackError),
    #[error("shader '{0}' has no stages")]
    EmptyProgram(String),
    #[error("shader '{name}' failed to link: {reason}")]
    LinkFailed { name: String, reason: String },
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),
    #[error("no shader program is bound")]
    NoProgramBound,
    #[error("scene is {depth} levels deep but the transform stack holds {capacity}")]
    SceneTooDeep { depth: usize, capacity: usize },
}
