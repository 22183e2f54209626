use glam::{Mat4, Vec3};
use orrery_common::EngineConfig;
use orrery_math::matrix;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Translation, Euler rotation (radians) and scale of one node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orientation {
    translate: Vec3,
    rotate: Vec3,
    scale: Vec3,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            translate: Vec3::ZERO,
            rotate: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Orientation {
    /// Identity: no translation or rotation, unit scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure translation.
    pub fn from_translation(translate: Vec3) -> Self {
        Self {
            translate,
            ..Self::default()
        }
    }

    /// Offset from the parent origin.
    pub fn translation(&self) -> Vec3 {
        self.translate
    }

    /// Euler angles in radians, applied x, then y, then z.
    pub fn rotation(&self) -> Vec3 {
        self.rotate
    }

    /// Per-axis scale factors.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Replace the translation.
    pub fn set_translation(&mut self, v: Vec3) {
        self.translate = v;
    }

    /// Replace the translation component-wise.
    pub fn set_translation_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.translate = Vec3::new(x, y, z);
    }

    /// Replace the Euler angles (radians).
    pub fn set_rotation(&mut self, v: Vec3) {
        self.rotate = v;
    }

    /// Replace the Euler angles component-wise (radians).
    pub fn set_rotation_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.rotate = Vec3::new(x, y, z);
    }

    /// Replace the scale.
    pub fn set_scale(&mut self, v: Vec3) {
        self.scale = v;
    }

    /// Replace the scale component-wise.
    pub fn set_scale_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.scale = Vec3::new(x, y, z);
    }

    /// Local transform `T * R * S`.
    pub fn transformation_matrix(&self) -> Mat4 {
        matrix::translation(self.translate)
            * (matrix::rotation(self.rotate) * matrix::scale(self.scale))
    }

    /// Rotation part only, for transforming normals.
    pub fn rotation_matrix(&self) -> Mat4 {
        matrix::rotation(self.rotate)
    }

    /// This transform seen from `camera`: camera rotation, then the inverse camera
    /// translation, applied after the local transform.
    pub fn camera_transformation_matrix(&self, camera: &Camera) -> Mat4 {
        let view_rotation = matrix::camera(camera.forward(), camera.up());
        let view_translation = matrix::translation(-camera.pos());
        view_rotation * (view_translation * self.transformation_matrix())
    }
}

/// Perspective parameters. `fov` is the vertical field of view in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub fov: f32,
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Projection {
    /// Viewport from the window section, field of view converted from degrees.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            fov: config.projection.fov_degrees.to_radians(),
            width: config.window.width as f32,
            height: config.window.height as f32,
            near: config.projection.near,
            far: config.projection.far,
        }
    }

    /// Perspective matrix for the current viewport.
    pub fn matrix(&self) -> Mat4 {
        matrix::projection(self.fov, self.width, self.height, self.near, self.far)
    }
}

/// An [`Orientation`] followed by a perspective projection; the root "world" transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectedOrientation {
    pub orientation: Orientation,
    pub projection: Projection,
}

impl ProjectedOrientation {
    /// Identity orientation under `projection`.
    pub fn new(projection: Projection) -> Self {
        Self {
            orientation: Orientation::default(),
            projection,
        }
    }

    /// Identity orientation under the configured projection.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(Projection::from_config(config))
    }

    /// Update the aspect ratio after a window resize.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.projection.width = width;
        self.projection.height = height;
    }

    /// Projection applied after the orientation.
    pub fn projected_transformation_matrix(&self) -> Mat4 {
        self.projection.matrix() * self.orientation.transformation_matrix()
    }

    /// Projection applied after the camera view of the orientation.
    pub fn camera_projected_transformation_matrix(&self, camera: &Camera) -> Mat4 {
        self.projection.matrix() * self.orientation.camera_transformation_matrix(camera)
    }
}
