//! Seeded value noise used to drive monster wandering.
//!
//! The field assigns a pseudo-random value in `[0, 1)` to every integer
//! lattice point by hashing its coordinates together with the seed, then
//! blends the four surrounding lattice values with smoothstep weights. The
//! result is continuous everywhere and fully reproducible for a given seed,
//! which keeps wandering smooth from frame to frame and makes tests
//! deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D value-noise field parameterised by a seed.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use wildlands::noise::ValueNoise;
///
/// let noise = ValueNoise::new(7);
/// let a = noise.sample(Vec2::new(1.25, 3.5));
/// assert!((0.0..1.0).contains(&a));
/// assert_eq!(a, ValueNoise::new(7).sample(Vec2::new(1.25, 3.5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueNoise {
    seed: u32,
}

impl ValueNoise {
    /// Creates a noise field for `seed`.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// The seed this field was built from.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Samples the field at `at`, returning a value in `[0, 1)`.
    ///
    /// Non-finite coordinates sample the lattice origin.
    #[must_use]
    pub fn sample(&self, at: Vec2) -> f32 {
        let point = if at.is_finite() { at } else { Vec2::ZERO };
        let xi = lattice_cell(point.x);
        let yi = lattice_cell(point.y);
        let xf = point.x - point.x.floor();
        let yf = point.y - point.y.floor();

        let n00 = self.lattice_value(xi, yi);
        let n10 = self.lattice_value(xi.wrapping_add(1), yi);
        let n01 = self.lattice_value(xi, yi.wrapping_add(1));
        let n11 = self.lattice_value(xi.wrapping_add(1), yi.wrapping_add(1));

        let u = smoothstep(xf);
        let v = smoothstep(yf);
        let nx0 = lerp(n00, n10, u);
        let nx1 = lerp(n01, n11, u);
        // Interpolation can round up to exactly 1.0 between two values just
        // below it; keep the half-open range.
        lerp(nx0, nx1, v).min(MAX_BELOW_ONE)
    }

    /// Pseudo-random value attached to the lattice point `(x, y)`.
    #[must_use]
    pub const fn lattice_value(&self, x: i32, y: i32) -> f32 {
        let hashed = hash(x, y, self.seed);
        // The top 24 bits convert to f32 exactly.
        #[expect(
            clippy::cast_precision_loss,
            reason = "The value is shifted to 24 bits, which f32 represents exactly."
        )]
        let mantissa = (hashed >> 8) as f32;
        mantissa / 16_777_216.0
    }
}

impl Default for ValueNoise {
    fn default() -> Self {
        Self::new(crate::DEFAULT_NOISE_SEED)
    }
}

const MAX_BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Floor `value` into the `i32` lattice domain, saturating at the bounds.
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
fn lattice_cell(value: f32) -> i32 {
    let floored = f64::from(value.floor());
    floored.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[expect(
    clippy::cast_sign_loss,
    reason = "Lattice coordinates are reinterpreted as bit patterns for hashing."
)]
const fn hash(x: i32, y: i32, seed: u32) -> u32 {
    let mut h = (x as u32).wrapping_mul(0x27d4_eb2d)
        ^ (y as u32).wrapping_mul(0x1656_67b1)
        ^ seed.wrapping_mul(0x9e37_79b9);
    h ^= h >> 15;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

const fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

const fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
