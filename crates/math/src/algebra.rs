use glam::{Quat, Vec3};

/// Errors from checked vector operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
}

/// Normalize `v`, reporting a zero-length (or non-finite) input instead of producing NaN.
pub fn try_unit(v: Vec3) -> Result<Vec3, MathError> {
    v.try_normalize().ok_or(MathError::ZeroLength)
}

/// Hamilton product of two quaternions. Neither side has to be unit length.
pub fn mul_quat(a: Quat, b: Quat) -> Quat {
    Quat::from_xyzw(
        a.x * b.w + a.w * b.x + a.y * b.z - a.z * b.y,
        a.y * b.w + a.w * b.y + a.z * b.x - a.x * b.z,
        a.z * b.w + a.w * b.z + a.x * b.y - a.y * b.x,
        a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
    )
}

/// Product of `q` with the pure quaternion `(v, 0)`.
pub fn mul_vector(q: Quat, v: Vec3) -> Quat {
    Quat::from_xyzw(
        q.w * v.x + q.y * v.z - q.z * v.y,
        q.w * v.y + q.z * v.x - q.x * v.z,
        q.w * v.z + q.x * v.y - q.y * v.x,
        -q.x * v.x - q.y * v.y - q.z * v.z,
    )
}

/// Half-angle quaternion `(axis * sin(angle / 2), cos(angle / 2))`.
pub fn axis_angle(angle: f32, axis: Vec3) -> Quat {
    let (sin_half, cos_half) = (angle / 2.0).sin_cos();
    Quat::from_xyzw(
        axis.x * sin_half,
        axis.y * sin_half,
        axis.z * sin_half,
        cos_half,
    )
}

/// Rotate `v` by `angle` radians around `axis` using `q * v * conjugate(q)`.
///
/// `axis` must already be unit length; a non-unit axis scales the result.
pub fn rotate(v: Vec3, angle: f32, axis: Vec3) -> Vec3 {
    let q = axis_angle(angle, axis);
    let r = mul_quat(mul_vector(q, v), q.conjugate());
    Vec3::new(r.x, r.y, r.z)
}
