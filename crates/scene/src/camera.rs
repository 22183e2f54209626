use glam::Vec3;
use orrery_common::CameraConfig;
use orrery_math::rotate;

/// World up. Yaw turns around it; pitch turns around the horizontal axis derived from it.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Free-flying camera with a position, a unit `forward` and a unit `up`.
///
/// The frame given at construction is kept so [`Camera::reset`] can restore it.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pos: Vec3,
    forward: Vec3,
    up: Vec3,
    /// World units per second.
    pub move_speed: f32,
    /// Degrees per second.
    pub turn_speed: f32,
    initial: (Vec3, Vec3, Vec3),
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z, WORLD_UP)
    }
}

impl Camera {
    /// Create a camera. `forward` and `up` are normalized; they must be non-zero and not
    /// parallel (validated configs guarantee this).
    pub fn new(pos: Vec3, forward: Vec3, up: Vec3) -> Self {
        let defaults = CameraConfig::default();
        let forward = forward.normalize_or(Vec3::Z);
        let up = up.normalize_or(WORLD_UP);
        Self {
            pos,
            forward,
            up,
            move_speed: defaults.move_speed,
            turn_speed: defaults.turn_speed,
            initial: (pos, forward, up),
        }
    }

    /// Camera at the configured position and frame, with the configured speeds.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            turn_speed: config.turn_speed,
            ..Self::new(config.position, config.forward, config.up)
        }
    }

    /// World-space position.
    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit up vector, perpendicular to `forward`.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Teleport without touching the frame.
    pub fn set_pos(&mut self, pos: Vec3) {
        self.pos = pos;
    }

    /// Unit vector `forward × up`.
    pub fn left(&self) -> Vec3 {
        self.forward.cross(self.up).normalize()
    }

    /// Unit vector `up × forward`.
    pub fn right(&self) -> Vec3 {
        self.up.cross(self.forward).normalize()
    }

    /// Opposite of `forward`.
    pub fn backward(&self) -> Vec3 {
        -self.forward
    }

    /// Translate by `dir * amount`.
    pub fn move_by(&mut self, dir: Vec3, amount: f32) {
        self.pos += dir * amount;
    }

    /// Move along `forward` by `move_speed * dt`.
    pub fn move_forward(&mut self, dt: f32) {
        self.move_by(self.forward, self.move_speed * dt);
    }

    /// Move against `forward` by `move_speed * dt`.
    pub fn move_backward(&mut self, dt: f32) {
        self.move_by(self.backward(), self.move_speed * dt);
    }

    /// Strafe left by `move_speed * dt`.
    pub fn move_left(&mut self, dt: f32) {
        self.move_by(self.left(), self.move_speed * dt);
    }

    /// Strafe right by `move_speed * dt`.
    pub fn move_right(&mut self, dt: f32) {
        self.move_by(self.right(), self.move_speed * dt);
    }

    /// Pitch up by `turn_speed * dt` degrees.
    pub fn turn_up(&mut self, dt: f32) {
        self.rotate_x(-self.turn_angle(dt));
    }

    /// Pitch down by `turn_speed * dt` degrees.
    pub fn turn_down(&mut self, dt: f32) {
        self.rotate_x(self.turn_angle(dt));
    }

    /// Yaw left by `turn_speed * dt` degrees.
    pub fn turn_left(&mut self, dt: f32) {
        self.rotate_y(-self.turn_angle(dt));
    }

    /// Yaw right by `turn_speed * dt` degrees.
    pub fn turn_right(&mut self, dt: f32) {
        self.rotate_y(self.turn_angle(dt));
    }

    /// Yaw by `angle` radians around [`WORLD_UP`].
    pub fn rotate_y(&mut self, angle: f32) {
        self.forward = rotate(self.forward, angle, WORLD_UP).normalize();
        let horizontal = self.horizontal_axis();
        self.up = self.forward.cross(horizontal).normalize();
    }

    /// Pitch by `angle` radians around the horizontal axis.
    pub fn rotate_x(&mut self, angle: f32) {
        let horizontal = self.horizontal_axis();
        self.forward = rotate(self.forward, angle, horizontal).normalize();
        self.up = self.forward.cross(horizontal).normalize();
    }

    /// Restore the position and frame the camera was constructed with.
    pub fn reset(&mut self) {
        (self.pos, self.forward, self.up) = self.initial;
        tracing::debug!(pos = ?self.pos, "camera reset");
    }

    fn turn_angle(&self, dt: f32) -> f32 {
        (self.turn_speed * dt).to_radians()
    }

    // Unit vector perpendicular to world up and forward. Looking straight up or down
    // leaves it undefined, so fall back to the camera's own up.
    fn horizontal_axis(&self) -> Vec3 {
        WORLD_UP
            .cross(self.forward)
            .try_normalize()
            .unwrap_or_else(|| self.up.cross(self.forward).normalize())
    }
}
