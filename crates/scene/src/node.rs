use serde::{Deserialize, Serialize};

use crate::orientation::Orientation;

/// Opaque handle to mesh buffers owned by the GPU backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// A node in the scene tree.
///
/// Leaves draw one mesh with a named material; groups only position their children.
/// Both carry an [`Orientation`] relative to the parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        material: String,
        mesh: MeshHandle,
        #[serde(default)]
        orientation: Orientation,
    },
    Group {
        #[serde(default)]
        orientation: Orientation,
        #[serde(default)]
        children: Vec<Node>,
    },
}

impl Node {
    pub fn leaf(material: impl Into<String>, mesh: MeshHandle, orientation: Orientation) -> Self {
        Node::Leaf {
            material: material.into(),
            mesh,
            orientation,
        }
    }

    pub fn group(orientation: Orientation, children: Vec<Node>) -> Self {
        Node::Group {
            orientation,
            children,
        }
    }

    pub fn orientation(&self) -> &Orientation {
        match self {
            Node::Leaf { orientation, .. } | Node::Group { orientation, .. } => orientation,
        }
    }

    pub fn orientation_mut(&mut self) -> &mut Orientation {
        match self {
            Node::Leaf { orientation, .. } | Node::Group { orientation, .. } => orientation,
        }
    }

    /// Children in draw order; empty for a leaf.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Group { children, .. } => children,
        }
    }

    /// Append a child to a group. A leaf cannot hold children and hands the node back.
    pub fn add_child(&mut self, child: Node) -> Result<(), Node> {
        match self {
            Node::Leaf { .. } => Err(child),
            Node::Group { children, .. } => {
                children.push(child);
                Ok(())
            }
        }
    }

    /// Transform stack slots needed to draw this subtree: 1 for a leaf or empty group.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Node::depth).max().unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Group { children, .. } => children.iter().map(Node::leaf_count).sum(),
        }
    }
}
