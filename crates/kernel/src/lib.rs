//! Engine kernel: the fixed-timestep loop and the context it hands to the game.
//!
//! # Invariants
//! - Simulation advances only in whole fixed steps; render rate never changes the step.
//! - Within one iteration every tick (close check, input, update) finishes before the render.
//! - Cleanup runs exactly once, and only after the loop has stopped.

pub mod clock;
pub mod context;
pub mod error;
pub mod scheduler;
pub mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use context::{EngineContext, Window};
pub use error::EngineError;
pub use scheduler::{Game, Iteration, LoopHost, LoopSummary, RunState, Scheduler};
pub use stats::{FrameCounter, FrameTimer, LoopRates};

pub fn crate_info() -> &'static str {
    "orrery-kernel v0.1.0"
}
