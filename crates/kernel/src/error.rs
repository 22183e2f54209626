use orrery_common::ConfigError;
use orrery_math::StackError;
use orrery_render::RenderError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("render: {0}")]
    Render(#[from] RenderError),
    #[error("transform stack: {0}")]
    Stack(#[from] StackError),
    #[error("cleanup requested while the loop is still running")]
    CleanupWhileRunning,
}
