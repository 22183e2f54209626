//! Named matrix initializers.
//!
//! Matrices are written here the way they are read on paper: row-major, with the
//! translation in the last column. [`from_rows`] converts to glam's column storage,
//! [`to_row_major`] converts back for uniform upload.

use glam::{Mat4, Vec3, Vec4};

/// Build a matrix from rows.
pub fn from_rows(rows: [[f32; 4]; 4]) -> Mat4 {
    Mat4::from_cols_array_2d(&rows).transpose()
}

/// Rows of `m`, the inverse of [`from_rows`].
pub fn to_rows(m: &Mat4) -> [[f32; 4]; 4] {
    m.transpose().to_cols_array_2d()
}

/// The 16 elements of `m` in row-major order.
pub fn to_row_major(m: &Mat4) -> [f32; 16] {
    m.transpose().to_cols_array()
}

pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

pub fn translation(v: Vec3) -> Mat4 {
    from_rows([
        [1.0, 0.0, 0.0, v.x],
        [0.0, 1.0, 0.0, v.y],
        [0.0, 0.0, 1.0, v.z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn scale(v: Vec3) -> Mat4 {
    from_rows([
        [v.x, 0.0, 0.0, 0.0],
        [0.0, v.y, 0.0, 0.0],
        [0.0, 0.0, v.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Rotation from per-axis Euler angles in radians, composed as `Rz * (Ry * Rx)`.
///
/// The Y matrix carries `-sin` in row 0, so positive yaw turns +Z toward -X.
pub fn rotation(euler: Vec3) -> Mat4 {
    let (sx, cx) = euler.x.sin_cos();
    let (sy, cy) = euler.y.sin_cos();
    let (sz, cz) = euler.z.sin_cos();

    let rx = from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, cx, -sx, 0.0],
        [0.0, sx, cx, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let ry = from_rows([
        [cy, 0.0, -sy, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [sy, 0.0, cy, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let rz = from_rows([
        [cz, -sz, 0.0, 0.0],
        [sz, cz, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    rz * (ry * rx)
}

/// Perspective projection. `fov` is the vertical field of view in radians.
///
/// Maps view-space `z = near` to NDC -1 and `z = far` to +1; `w` carries view-space `z`.
pub fn projection(fov: f32, width: f32, height: f32, near: f32, far: f32) -> Mat4 {
    let tan_half_fov = (fov / 2.0).tan();
    let aspect = width / height;
    let z_range = near - far;

    from_rows([
        [1.0 / (tan_half_fov * aspect), 0.0, 0.0, 0.0],
        [0.0, 1.0 / tan_half_fov, 0.0, 0.0],
        [0.0, 0.0, (-near - far) / z_range, 2.0 * far * near / z_range],
        [0.0, 0.0, 1.0, 0.0],
    ])
}

/// Camera rotation: rows are right, up and forward of the view frame.
pub fn camera(forward: Vec3, up: Vec3) -> Mat4 {
    let f = forward.normalize();
    let r = up.normalize().cross(f);
    let u = f.cross(r);

    from_rows([
        [r.x, r.y, r.z, 0.0],
        [u.x, u.y, u.z, 0.0],
        [f.x, f.y, f.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Zero the translation column and the projective row, keeping `[3][3] = 1`.
pub fn strip_translation(mut m: Mat4) -> Mat4 {
    m.w_axis = Vec4::W;
    m.x_axis.w = 0.0;
    m.y_axis.w = 0.0;
    m.z_axis.w = 0.0;
    m
}

/// Largest absolute element-wise difference between two matrices.
pub fn max_abs_diff(a: &Mat4, b: &Mat4) -> f32 {
    (*a - *b)
        .to_cols_array()
        .iter()
        .fold(0.0_f32, |acc, d| acc.max(d.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{Rng, random_affine};
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn rows_round_trip() {
        let rows = [
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ];
        let m = from_rows(rows);
        assert_eq!(to_rows(&m), rows);
        assert_eq!(to_row_major(&m)[3], 4.0);
        assert_eq!(m.w_axis.x, 4.0);
    }

    #[test]
    fn translation_moves_origin() {
        let m = translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_vector3(Vec3::X), Vec3::X);
    }

    #[test]
    fn scale_is_per_axis() {
        let m = scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m.transform_point3(Vec3::ONE), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn zero_rotation_is_identity() {
        assert!(max_abs_diff(&rotation(Vec3::ZERO), &Mat4::IDENTITY) < 1e-6);
    }

    #[test]
    fn single_axis_rotations() {
        let rx = rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        assert!(approx(rx.transform_point3(Vec3::Y), Vec3::Z));

        let ry = rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert!(approx(ry.transform_point3(Vec3::Z), -Vec3::X));

        let rz = rotation(Vec3::new(0.0, 0.0, FRAC_PI_2));
        assert!(approx(rz.transform_point3(Vec3::X), Vec3::Y));
    }

    #[test]
    fn euler_order_is_z_y_x() {
        let (a, b, c) = (0.3, -1.1, 2.2);
        let combined = rotation(Vec3::new(a, b, c));
        let rx = rotation(Vec3::new(a, 0.0, 0.0));
        let ry = rotation(Vec3::new(0.0, b, 0.0));
        let rz = rotation(Vec3::new(0.0, 0.0, c));
        assert!(max_abs_diff(&combined, &(rz * (ry * rx))) < 1e-6);
        // Any other order differs for these angles.
        assert!(max_abs_diff(&combined, &(rx * (ry * rz))) > 1e-3);
    }

    #[test]
    fn camera_looking_down_z_is_identity() {
        assert!(max_abs_diff(&camera(Vec3::Z, Vec3::Y), &Mat4::IDENTITY) < 1e-6);
    }

    #[test]
    fn camera_brings_forward_onto_view_z() {
        let m = camera(Vec3::new(3.0, 0.0, 0.0), Vec3::Y);
        assert!(approx(m.transform_point3(Vec3::X), Vec3::Z));
        assert!(approx(m.transform_point3(Vec3::Y), Vec3::Y));
    }

    #[test]
    fn projection_maps_clip_planes_to_ndc() {
        let (near, far) = (0.5, 100.0);
        let p = projection(70f32.to_radians(), 1280.0, 720.0, near, far);
        let ndc_z = |z: f32| {
            let clip = p * Vec4::new(0.0, 0.0, z, 1.0);
            clip.z / clip.w
        };
        assert!((ndc_z(near) + 1.0).abs() < 1e-4);
        assert!((ndc_z(far) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn projection_scales_by_aspect() {
        let p = projection(FRAC_PI_2, 200.0, 100.0, 0.1, 10.0);
        let rows = to_rows(&p);
        assert!((rows[1][1] - 1.0).abs() < 1e-6);
        assert!((rows[0][0] - 0.5).abs() < 1e-6);
        assert_eq!(rows[3], [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn strip_translation_clears_last_row_and_column() {
        let m = from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(
            to_rows(&strip_translation(m)),
            [
                [1.0, 2.0, 3.0, 0.0],
                [5.0, 6.0, 7.0, 0.0],
                [9.0, 10.0, 11.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]
        );
    }

    #[test]
    fn multiplication_is_associative() {
        let mut rng = Rng::new(0x5eed);
        for _ in 0..200 {
            let (a, b, c) = (
                random_affine(&mut rng),
                random_affine(&mut rng),
                random_affine(&mut rng),
            );
            let left = (a * b) * c;
            let right = a * (b * c);
            let magnitude = left.to_cols_array().iter().fold(1.0_f32, |m, v| m.max(v.abs()));
            assert!(max_abs_diff(&left, &right) <= 1e-5 * magnitude);
        }
    }

    #[test]
    fn multiplication_is_not_commutative() {
        let t = translation(Vec3::new(1.0, 0.0, 0.0));
        let r = rotation(Vec3::new(0.0, 0.0, FRAC_PI_2));
        assert!(max_abs_diff(&(t * r), &(r * t)) > 0.5);
    }
}
