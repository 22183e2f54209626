use glam::Mat4;

use crate::matrix::strip_translation;

/// Default maximum nesting depth of the scene graph.
pub const DEFAULT_STACK_DEPTH: usize = 15;

/// Misuse of the transform stack. Both variants are caller bugs, not data errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    #[error("transform stack overflow: all {capacity} slots in use")]
    Overflow { capacity: usize },
    #[error("pop on an empty transform stack")]
    Underflow,
}

/// Bounded stack of local transforms for depth-first scene traversal.
///
/// Slots `0..depth` hold the matrices pushed so far, bottom first. The product of those
/// slots in push order is the local-to-world transform of the node currently rendering.
#[derive(Debug, Clone)]
pub struct TransformStack {
    slots: Box<[Mat4]>,
    depth: usize,
}

impl TransformStack {
    /// Create an empty stack holding at most `capacity` matrices.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Mat4::IDENTITY; capacity].into_boxed_slice(),
            depth: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of matrices currently pushed.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Push a local transform. Fails when every slot is in use.
    pub fn push(&mut self, matrix: Mat4) -> Result<(), StackError> {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get_mut(self.depth)
            .ok_or(StackError::Overflow { capacity })?;
        *slot = matrix;
        self.depth += 1;
        Ok(())
    }

    /// Remove and return the top transform. Fails on an empty stack.
    pub fn pop(&mut self) -> Result<Mat4, StackError> {
        if self.depth == 0 {
            return Err(StackError::Underflow);
        }
        self.depth -= 1;
        Ok(std::mem::replace(
            &mut self.slots[self.depth],
            Mat4::IDENTITY,
        ))
    }

    /// The most recently pushed transform.
    pub fn top(&self) -> Option<&Mat4> {
        self.depth.checked_sub(1).map(|i| &self.slots[i])
    }

    /// Drop every pushed transform.
    pub fn clear(&mut self) {
        while self.pop().is_ok() {}
    }

    /// Product of all pushed transforms in push order, or `None` when empty.
    pub fn current_transform(&self) -> Option<Mat4> {
        self.live().iter().copied().reduce(|acc, m| acc * m)
    }

    /// Like [`current_transform`](Self::current_transform), but each matrix has its
    /// translation stripped first. The result transforms normals without moving them.
    pub fn current_rotation(&self) -> Option<Mat4> {
        self.live()
            .iter()
            .copied()
            .map(strip_translation)
            .reduce(|acc, m| acc * m)
    }

    fn live(&self) -> &[Mat4] {
        &self.slots[..self.depth]
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_DEPTH)
    }
}
