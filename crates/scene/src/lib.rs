//! Scene description: per-node orientations, the camera, and the leaf/group graph.
//!
//! # Invariants
//! - Matrices are recomputed from the current fields on every call; nothing is cached.
//! - Camera `forward` and `up` stay unit length and perpendicular after any move or turn.
//! - Scene nodes exclusively own their children, so the graph is always a tree.

pub mod camera;
pub mod node;
pub mod orientation;

pub use camera::Camera;
pub use node::{MeshHandle, Node};
pub use orientation::{Orientation, ProjectedOrientation, Projection};

pub fn crate_info() -> &'static str {
    "orrery-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
