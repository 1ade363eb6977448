//! Fractal gradient-noise generators.
//!
//! Perlin, Billow and RidgedMulti all sum several octaves of coherent
//! gradient noise, each octave at a higher frequency and (for Perlin and
//! Billow) a lower amplitude. They differ in how each octave's signal is
//! shaped before it is accumulated.

use crate::noise::{
    module_trait::{ModuleInfo, NoiseModule},
    parameter::{as_int, ParameterDefinition},
    primitives::{gradient_coherent_noise_3d, make_int32_range, NoiseQuality},
    NodeKind, NoiseMap, SampleWindow,
};

/// Upper bound on the octave count of every fractal generator.
pub const MAX_OCTAVES: i64 = 30;

// ============================================================================
// Shared octave settings
// ============================================================================

/// Octave settings read from a fractal generator's parameter values.
#[derive(Clone, Copy, Debug)]
struct OctaveSettings {
    frequency: f64,
    lacunarity: f64,
    persistence: f64,
    octaves: usize,
    quality: NoiseQuality,
    seed: i32,
}

impl OctaveSettings {
    /// Reads settings laid out as frequency, lacunarity, octaves,
    /// [persistence,] quality, seed.
    fn read(params: &[f64], with_persistence: bool) -> Self {
        let offset = usize::from(with_persistence);
        Self {
            frequency: params.first().copied().unwrap_or(1.0),
            lacunarity: params.get(1).copied().unwrap_or(2.0),
            octaves: as_int(params, 2).clamp(1, MAX_OCTAVES as i32) as usize,
            persistence: if with_persistence {
                params.get(3).copied().unwrap_or(0.5)
            } else {
                1.0
            },
            quality: NoiseQuality::from_index(as_int(params, 3 + offset)),
            seed: as_int(params, 4 + offset),
        }
    }

    /// Sums `octaves` layers of shaped noise.
    ///
    /// `shape` receives the raw signal and the octave index and returns the
    /// value to accumulate; amplitude scaling by persistence happens here.
    fn accumulate(&self, x: f64, y: f64, z: f64, shape: impl Fn(f64, usize) -> f64) -> f64 {
        let mut x = x * self.frequency;
        let mut y = y * self.frequency;
        let mut z = z * self.frequency;
        let mut amplitude = 1.0;
        let mut value = 0.0;

        for octave in 0..self.octaves {
            let seed = self.seed.wrapping_add(octave as i32);
            let signal = gradient_coherent_noise_3d(
                make_int32_range(x),
                make_int32_range(y),
                make_int32_range(z),
                seed,
                self.quality,
            );
            value += shape(signal, octave) * amplitude;

            x *= self.lacunarity;
            y *= self.lacunarity;
            z *= self.lacunarity;
            amplitude *= self.persistence;
        }

        value
    }
}

/// Parameters shared by the fractal generators, in index order.
fn fractal_parameters(with_persistence: bool) -> Vec<ParameterDefinition> {
    let mut parameters = vec![
        ParameterDefinition::linear("frequency", "Frequency", 0.01, 16.0, 1.0),
        ParameterDefinition::linear("lacunarity", "Lacunarity", 1.0, 4.0, 2.0),
        ParameterDefinition::integer("octaves", "Octaves", 1, MAX_OCTAVES, 6),
    ];
    if with_persistence {
        parameters.push(ParameterDefinition::linear(
            "persistence",
            "Persistence",
            0.0,
            1.0,
            0.5,
        ));
    }
    parameters.push(ParameterDefinition::choice(
        "quality",
        "Quality",
        &NoiseQuality::LABELS,
        1,
    ));
    parameters.push(ParameterDefinition::integer("seed", "Seed", 0, 65535, 0));
    parameters
}

// ============================================================================
// Perlin
// ============================================================================

/// Fractal Brownian motion over gradient noise.
///
/// # Parameters
///
/// - **Frequency**: Frequency of the first octave.
/// - **Lacunarity**: Frequency multiplier between successive octaves.
/// - **Octaves**: Number of octaves summed.
/// - **Persistence**: Amplitude multiplier between successive octaves.
/// - **Quality**: Interpolation quality (Fast, Standard, Best).
/// - **Seed**: Offset applied to the lattice hash; octave `i` uses `seed + i`.
pub struct Perlin {
    parameters: Vec<ParameterDefinition>,
}

impl Perlin {
    /// Creates a Perlin generator with its default parameters.
    pub fn new() -> Self {
        Self {
            parameters: fractal_parameters(true),
        }
    }

    pub const PARAM_FREQUENCY: usize = 0;
    pub const PARAM_LACUNARITY: usize = 1;
    pub const PARAM_OCTAVES: usize = 2;
    pub const PARAM_PERSISTENCE: usize = 3;
    pub const PARAM_QUALITY: usize = 4;
    pub const PARAM_SEED: usize = 5;
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Perlin {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo =
            ModuleInfo::new(NodeKind::Perlin, "Fractal sum of gradient noise octaves");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, _inputs: &[&NoiseMap], params: &[f64], window: &SampleWindow) -> NoiseMap {
        let settings = OctaveSettings::read(params, true);
        NoiseMap::generate(window, |x, y, z| {
            settings.accumulate(x, y, z, |signal, _| signal)
        })
    }
}

// ============================================================================
// Billow
// ============================================================================

/// Perlin variant built from the absolute value of each octave, giving
/// puffy, cloud-like shapes.
///
/// Takes the same parameters as [`Perlin`].
pub struct Billow {
    parameters: Vec<ParameterDefinition>,
}

impl Billow {
    /// Creates a Billow generator with its default parameters.
    pub fn new() -> Self {
        Self {
            parameters: fractal_parameters(true),
        }
    }
}

impl Default for Billow {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Billow {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo =
            ModuleInfo::new(NodeKind::Billow, "Fractal sum of folded gradient noise");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, _inputs: &[&NoiseMap], params: &[f64], window: &SampleWindow) -> NoiseMap {
        let settings = OctaveSettings::read(params, true);
        NoiseMap::generate(window, |x, y, z| {
            settings.accumulate(x, y, z, |signal, _| 2.0 * signal.abs() - 1.0) + 0.5
        })
    }
}

// ============================================================================
// RidgedMulti
// ============================================================================

/// Ridged multifractal noise: sharp ridges where the underlying gradient
/// noise crosses zero, with higher octaves weighted by the previous octave.
///
/// # Parameters
///
/// Frequency, Lacunarity, Octaves, Quality and Seed as for [`Perlin`].
/// There is no persistence; octave amplitudes follow the spectral weights
/// `frequency^-1`.
pub struct RidgedMulti {
    parameters: Vec<ParameterDefinition>,
}

impl RidgedMulti {
    const OFFSET: f64 = 1.0;
    const GAIN: f64 = 2.0;
    const SPECTRAL_EXPONENT: f64 = 1.0;

    /// Creates a RidgedMulti generator with its default parameters.
    pub fn new() -> Self {
        Self {
            parameters: fractal_parameters(false),
        }
    }

    fn spectral_weights(lacunarity: f64, octaves: usize) -> Vec<f64> {
        let mut frequency = 1.0_f64;
        (0..octaves)
            .map(|_| {
                let weight = frequency.powf(-Self::SPECTRAL_EXPONENT);
                frequency *= lacunarity;
                weight
            })
            .collect()
    }
}

impl Default for RidgedMulti {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for RidgedMulti {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo =
            ModuleInfo::new(NodeKind::RidgedMulti, "Ridged multifractal gradient noise");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, _inputs: &[&NoiseMap], params: &[f64], window: &SampleWindow) -> NoiseMap {
        let settings = OctaveSettings::read(params, false);
        let weights = Self::spectral_weights(settings.lacunarity, settings.octaves);

        NoiseMap::generate(window, |x, y, z| {
            // Each octave's signal scales the next one, so the running
            // weight is carried through the accumulator.
            let weight = std::cell::Cell::new(1.0_f64);
            let value = settings.accumulate(x, y, z, |signal, octave| {
                let mut signal = Self::OFFSET - signal.abs();
                signal *= signal;
                signal *= weight.get();
                weight.set((signal * Self::GAIN).clamp(0.0, 1.0));
                signal * weights[octave]
            });
            value * 1.25 - 1.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> SampleWindow {
        SampleWindow::default().with_size(32, 32)
    }

    fn defaults(module: &dyn NoiseModule) -> Vec<f64> {
        module.default_parameters()
    }

    #[test]
    fn test_perlin_defaults() {
        let perlin = Perlin::new();
        let params = defaults(&perlin);
        assert_eq!(params[Perlin::PARAM_FREQUENCY], 1.0);
        assert_eq!(params[Perlin::PARAM_LACUNARITY], 2.0);
        assert_eq!(params[Perlin::PARAM_OCTAVES], 6.0);
        assert_eq!(params[Perlin::PARAM_PERSISTENCE], 0.5);
        assert_eq!(params[Perlin::PARAM_QUALITY], 1.0);
        assert_eq!(params[Perlin::PARAM_SEED], 0.0);
    }

    #[test]
    fn test_perlin_is_deterministic_and_varied() {
        let perlin = Perlin::new();
        let params = defaults(&perlin);
        let a = perlin.evaluate(&[], &params, &window());
        let b = perlin.evaluate(&[], &params, &window());
        assert_eq!(a, b);

        let (lo, hi) = a.min_max().unwrap();
        assert!(hi > lo);
        assert!(lo > -2.0 && hi < 2.0);
    }

    #[test]
    fn test_single_octave_perlin_matches_primitive() {
        let perlin = Perlin::new();
        let mut params = defaults(&perlin);
        params[Perlin::PARAM_OCTAVES] = 1.0;
        params[Perlin::PARAM_FREQUENCY] = 1.5;
        let w = window();
        let map = perlin.evaluate(&[], &params, &w);

        let (x, y) = w.point(5, 7);
        let expected =
            gradient_coherent_noise_3d(x * 1.5, 0.0, y * 1.5, 0, NoiseQuality::Standard);
        assert!((map.get(5, 7).unwrap() as f64 - expected).abs() < 1e-5);
    }

    #[test]
    fn test_seed_changes_perlin() {
        let perlin = Perlin::new();
        let mut params = defaults(&perlin);
        let a = perlin.evaluate(&[], &params, &window());
        params[Perlin::PARAM_SEED] = 7.0;
        let b = perlin.evaluate(&[], &params, &window());
        assert_ne!(a, b);
    }

    #[test]
    fn test_single_octave_billow_folds_signal() {
        let billow = Billow::new();
        let mut params = defaults(&billow);
        params[2] = 1.0;
        let w = window();
        let map = billow.evaluate(&[], &params, &w);

        let (x, y) = w.point(3, 11);
        let n = gradient_coherent_noise_3d(x, 0.0, y, 0, NoiseQuality::Standard);
        let expected = 2.0 * n.abs() - 1.0 + 0.5;
        assert!((map.get(3, 11).unwrap() as f64 - expected).abs() < 1e-5);
    }

    #[test]
    fn test_ridged_has_no_persistence() {
        let ridged = RidgedMulti::new();
        let ids: Vec<_> = ridged.parameters().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["frequency", "lacunarity", "octaves", "quality", "seed"]);
    }

    #[test]
    fn test_ridged_output_range() {
        let ridged = RidgedMulti::new();
        let params = defaults(&ridged);
        let map = ridged.evaluate(&[], &params, &window());
        let (lo, hi) = map.min_max().unwrap();
        assert!(lo >= -1.0 - 1e-6);
        assert!(hi <= 2.5);
        assert!(hi > lo);
    }

    #[test]
    fn test_spectral_weights() {
        let weights = RidgedMulti::spectral_weights(2.0, 4);
        assert_eq!(weights, vec![1.0, 0.5, 0.25, 0.125]);
    }
}
