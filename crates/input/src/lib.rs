//! Polled input: a per-button latch that derives press/release edges, and key bindings
//! that turn the latch into high-level actions.
//!
//! # Invariants
//! - Edges are derived only in [`Input::update`]; queries between polls are stable.
//! - Codes outside the device's range read as released, never panic.
//! - A button already held at the first poll never reports a press edge.

pub mod action;
pub mod latch;

pub use action::{Action, Bindings};
pub use latch::{ButtonState, Input, InputDevice, KeyCode, MouseButton};

pub fn crate_info() -> &'static str {
    "orrery-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
