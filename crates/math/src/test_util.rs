use glam::{Mat4, Vec3};

use crate::matrix;

/// Splitmix64 stream for reproducible test inputs.
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform float in `[lo, hi)`.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        let unit = (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32;
        lo + (hi - lo) * unit
    }

    pub fn vec3(&mut self, lo: f32, hi: f32) -> Vec3 {
        Vec3::new(self.range(lo, hi), self.range(lo, hi), self.range(lo, hi))
    }
}

/// Random translation * rotation * scale with moderate magnitudes.
pub fn random_affine(rng: &mut Rng) -> Mat4 {
    let t = rng.vec3(-10.0, 10.0);
    let r = rng.vec3(-3.2, 3.2);
    let s = rng.vec3(0.5, 2.0);
    matrix::translation(t) * (matrix::rotation(r) * matrix::scale(s))
}
