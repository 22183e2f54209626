use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Errors from loading or validating an engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Window size and title handed to the window provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Fixed-timestep scheduler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Simulation ticks per second. The fixed step is `1 / ticks_per_second`.
    pub ticks_per_second: f64,
    /// How long the loop sleeps when no tick is due.
    pub idle_sleep_ms: u64,
    /// Number of render durations kept for frame statistics.
    pub stats_window: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 640.0,
            idle_sleep_ms: 1,
            stats_window: 120,
        }
    }
}

impl TimingConfig {
    /// Length of one fixed step in seconds.
    pub fn fixed_frame_time(&self) -> f64 {
        1.0 / self.ticks_per_second
    }

    pub fn idle_sleep(&self) -> Duration {
        Duration::from_millis(self.idle_sleep_ms)
    }
}

/// Rendering limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum nesting depth of the scene graph (transform stack capacity).
    pub stack_depth: usize,
    /// Texture unit materials are bound to; also the value of the `sampler` uniform.
    pub texture_unit: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stack_depth: 15,
            texture_unit: 1,
        }
    }
}

/// Initial camera frame and speeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// World units per second.
    pub move_speed: f32,
    /// Degrees per second.
    pub turn_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
            up: Vec3::Y,
            move_speed: 10.0,
            turn_speed: 100.0,
        }
    }
}

/// Perspective projection parameters. The viewport comes from [`WindowConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 70.0,
            near: 0.005,
            far: 1000.0,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub timing: TimingConfig,
    pub render: RenderConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(self.timing.ticks_per_second > 0.0) || !self.timing.ticks_per_second.is_finite() {
            return invalid("timing.ticks_per_second must be a positive number");
        }
        if self.timing.stats_window == 0 {
            return invalid("timing.stats_window must be at least 1");
        }
        if self.render.stack_depth == 0 {
            return invalid("render.stack_depth must be at least 1");
        }
        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window.width and window.height must be non-zero");
        }
        let p = &self.projection;
        if !(p.near > 0.0) {
            return invalid("projection.near must be positive");
        }
        if !(p.far > p.near) {
            return invalid("projection.far must be greater than projection.near");
        }
        if !(p.fov_degrees > 0.0 && p.fov_degrees < 180.0) {
            return invalid("projection.fov_degrees must be in (0, 180)");
        }
        let c = &self.camera;
        if c.forward.length_squared() == 0.0 || c.up.length_squared() == 0.0 {
            return invalid("camera.forward and camera.up must be non-zero");
        }
        if c.forward.cross(c.up).length_squared() == 0.0 {
            return invalid("camera.forward and camera.up must not be parallel");
        }
        Ok(())
    }
}
