//! Transform math: quaternion rotation, row-major matrix initializers, transform stack.
//!
//! # Invariants
//! - Every function here is pure; the stack is the only stateful type.
//! - Euler rotations compose as `Rz * (Ry * Rx)`; camera and orientation code rely on it.
//! - `a * b` means "apply `b`, then `a`".

pub mod algebra;
pub mod matrix;
pub mod stack;

#[cfg(test)]
mod test_util;

pub use algebra::{MathError, rotate, try_unit};
pub use stack::{DEFAULT_STACK_DEPTH, StackError, TransformStack};

pub fn crate_info() -> &'static str {
    "orrery-math v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("math"));
    }
}
