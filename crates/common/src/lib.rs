//! Shared configuration for the orrery engine.
//!
//! # Invariants
//! - A validated config never yields a non-positive tick rate or an empty transform stack.
//! - Every section has defaults; a partial file only overrides what it names.

pub mod config;

pub use config::{
    CameraConfig, ConfigError, EngineConfig, ProjectionConfig, RenderConfig, TimingConfig,
    WindowConfig,
};

pub fn crate_info() -> &'static str {
    "orrery-common v0.1.0"
}
