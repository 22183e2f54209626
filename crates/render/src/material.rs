use glam::Vec3;

use crate::backend::TextureHandle;

/// Surface appearance of a leaf: a texture plus a flat colour multiplied into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub texture: TextureHandle,
    pub color: Vec3,
}

impl Material {
    pub fn new(texture: TextureHandle, color: Vec3) -> Self {
        Self { texture, color }
    }
}
