//! Coherent-noise primitives shared by the generator modules.
//!
//! Lattice gradient noise and integer value noise over 3D space, hashed
//! from integer coordinates and a seed. The fractal generators
//! (Perlin, Billow, RidgedMulti) sum octaves of [`gradient_coherent_noise_3d`];
//! Voronoi jitters its cell seeds with [`value_noise_3d`].

// ============================================================================
// Hashing constants
// ============================================================================

const X_NOISE_GEN: i32 = 1619;
const Y_NOISE_GEN: i32 = 31337;
const Z_NOISE_GEN: i32 = 6971;
const SEED_NOISE_GEN: i32 = 1013;
const SHIFT_NOISE_GEN: u32 = 8;

/// Largest magnitude kept by [`make_int32_range`].
const INT32_RANGE: f64 = 1_073_741_824.0;

/// The twelve cube-edge gradient directions.
const GRADIENTS: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

// ============================================================================
// Quality
// ============================================================================

/// Interpolation used between lattice points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseQuality {
    /// Linear interpolation. Visible creases at cell boundaries.
    Fast,
    /// Cubic s-curve. Continuous first derivative.
    Standard,
    /// Quintic s-curve. Continuous second derivative.
    Best,
}

impl NoiseQuality {
    /// Labels in parameter order.
    pub const LABELS: [&'static str; 3] = ["Fast", "Standard", "Best"];

    /// Maps a choice-parameter index to a quality, defaulting to `Standard`.
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => NoiseQuality::Fast,
            2 => NoiseQuality::Best,
            _ => NoiseQuality::Standard,
        }
    }

    fn ease(&self, t: f64) -> f64 {
        match self {
            NoiseQuality::Fast => t,
            NoiseQuality::Standard => s_curve3(t),
            NoiseQuality::Best => s_curve5(t),
        }
    }
}

// ============================================================================
// Interpolation helpers
// ============================================================================

/// Cubic s-curve `3t² - 2t³`.
pub fn s_curve3(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Quintic s-curve `6t⁵ - 15t⁴ + 10t³`.
pub fn s_curve5(t: f64) -> f64 {
    let t3 = t * t * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    6.0 * t5 - 15.0 * t4 + 10.0 * t3
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Wraps a coordinate into a range where lattice indices fit in an `i32`.
///
/// Noise is periodic at that scale anyway, so high-octave samples far from
/// the origin stay well defined.
pub fn make_int32_range(n: f64) -> f64 {
    if n >= INT32_RANGE {
        2.0 * (n % INT32_RANGE) - INT32_RANGE
    } else if n <= -INT32_RANGE {
        2.0 * (n % INT32_RANGE) + INT32_RANGE
    } else {
        n
    }
}

// ============================================================================
// Gradient noise
// ============================================================================

fn lattice_hash(ix: i32, iy: i32, iz: i32, seed: i32) -> i32 {
    X_NOISE_GEN
        .wrapping_mul(ix)
        .wrapping_add(Y_NOISE_GEN.wrapping_mul(iy))
        .wrapping_add(Z_NOISE_GEN.wrapping_mul(iz))
        .wrapping_add(SEED_NOISE_GEN.wrapping_mul(seed))
}

/// Contribution of the gradient at lattice point `(ix, iy, iz)` to the
/// sample at `(fx, fy, fz)`.
fn gradient_noise_3d(fx: f64, fy: f64, fz: f64, ix: i32, iy: i32, iz: i32, seed: i32) -> f64 {
    let mut index = lattice_hash(ix, iy, iz, seed) as u32;
    index ^= index >> SHIFT_NOISE_GEN;
    let gradient = GRADIENTS[(index & 0xff) as usize % GRADIENTS.len()];

    let dx = fx - ix as f64;
    let dy = fy - iy as f64;
    let dz = fz - iz as f64;
    gradient[0] * dx + gradient[1] * dy + gradient[2] * dz
}

/// Coherent gradient noise at `(x, y, z)`.
///
/// Zero at every lattice point, roughly within `[-1, 1]` elsewhere.
pub fn gradient_coherent_noise_3d(x: f64, y: f64, z: f64, seed: i32, quality: NoiseQuality) -> f64 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let z0 = z.floor() as i32;
    let x1 = x0.wrapping_add(1);
    let y1 = y0.wrapping_add(1);
    let z1 = z0.wrapping_add(1);

    let xs = quality.ease(x - x0 as f64);
    let ys = quality.ease(y - y0 as f64);
    let zs = quality.ease(z - z0 as f64);

    let corner = |ix, iy, iz| gradient_noise_3d(x, y, z, ix, iy, iz, seed);

    let ix0 = lerp(corner(x0, y0, z0), corner(x1, y0, z0), xs);
    let ix1 = lerp(corner(x0, y1, z0), corner(x1, y1, z0), xs);
    let iy0 = lerp(ix0, ix1, ys);

    let ix0 = lerp(corner(x0, y0, z1), corner(x1, y0, z1), xs);
    let ix1 = lerp(corner(x0, y1, z1), corner(x1, y1, z1), xs);
    let iy1 = lerp(ix0, ix1, ys);

    lerp(iy0, iy1, zs)
}

// ============================================================================
// Value noise
// ============================================================================

/// Integer value noise in `[0, 2³¹)` for a lattice point.
pub fn int_value_noise_3d(x: i32, y: i32, z: i32, seed: i32) -> i32 {
    let mut n = lattice_hash(x, y, z, seed) & 0x7fff_ffff;
    n ^= n >> 13;
    n.wrapping_mul(
        n.wrapping_mul(n)
            .wrapping_mul(60493)
            .wrapping_add(19_990_303),
    )
    .wrapping_add(1_376_312_589)
        & 0x7fff_ffff
}

/// Value noise in `(-1, 1]` for a lattice point.
pub fn value_noise_3d(x: i32, y: i32, z: i32, seed: i32) -> f64 {
    1.0 - int_value_noise_3d(x, y, z, seed) as f64 / INT32_RANGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s_curves_fix_endpoints() {
        for curve in [s_curve3, s_curve5] {
            assert_eq!(curve(0.0), 0.0);
            assert_eq!(curve(1.0), 1.0);
            assert!((curve(0.5) - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_quality_from_index() {
        assert_eq!(NoiseQuality::from_index(0), NoiseQuality::Fast);
        assert_eq!(NoiseQuality::from_index(1), NoiseQuality::Standard);
        assert_eq!(NoiseQuality::from_index(2), NoiseQuality::Best);
        assert_eq!(NoiseQuality::from_index(7), NoiseQuality::Standard);
    }

    #[test]
    fn test_gradient_noise_zero_on_lattice() {
        for quality in [NoiseQuality::Fast, NoiseQuality::Standard, NoiseQuality::Best] {
            assert_eq!(gradient_coherent_noise_3d(3.0, 0.0, -2.0, 0, quality), 0.0);
            assert_eq!(gradient_coherent_noise_3d(0.0, 0.0, 0.0, 42, quality), 0.0);
        }
    }

    #[test]
    fn test_gradient_noise_is_deterministic_and_bounded() {
        let mut any_nonzero = false;
        for i in 0..200 {
            let x = i as f64 * 0.173 - 11.0;
            let z = i as f64 * 0.311 + 2.0;
            let a = gradient_coherent_noise_3d(x, 0.0, z, 5, NoiseQuality::Standard);
            let b = gradient_coherent_noise_3d(x, 0.0, z, 5, NoiseQuality::Standard);
            assert_eq!(a, b);
            assert!(a.abs() <= 1.5, "sample {} out of range: {}", i, a);
            any_nonzero |= a != 0.0;
        }
        assert!(any_nonzero);
    }

    #[test]
    fn test_seed_changes_noise() {
        let differs = (0..50).any(|i| {
            let x = i as f64 * 0.37 + 0.5;
            gradient_coherent_noise_3d(x, 0.0, 1.5, 0, NoiseQuality::Best)
                != gradient_coherent_noise_3d(x, 0.0, 1.5, 1, NoiseQuality::Best)
        });
        assert!(differs);
    }

    #[test]
    fn test_value_noise_range() {
        for x in -20..20 {
            for z in -5..5 {
                let v = value_noise_3d(x, 0, z, 3);
                assert!(v > -1.0 && v <= 1.0);
            }
        }
    }

    #[test]
    fn test_make_int32_range() {
        assert_eq!(make_int32_range(12.5), 12.5);
        assert_eq!(make_int32_range(-12.5), -12.5);
        let wrapped = make_int32_range(3.0 * INT32_RANGE + 1.0);
        assert!(wrapped.abs() < INT32_RANGE);
    }
}
