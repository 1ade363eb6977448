//! Voronoi cell generator.
//!
//! Space is divided into unit cubes, each holding one seed point jittered by
//! value noise. Every sample takes the value assigned to the nearest seed,
//! producing flat-shaded cells.

use crate::noise::{
    module_trait::{ModuleInfo, NoiseModule},
    parameter::{as_flag, as_int, ParameterDefinition},
    primitives::{make_int32_range, value_noise_3d},
    NodeKind, NoiseMap, SampleWindow,
};

/// Voronoi cells with an optional distance gradient.
///
/// # Parameters
///
/// - **Frequency**: Number of cells per unit length.
/// - **Displacement**: Scale of the per-cell value.
/// - **Distance**: When on, adds the distance to the nearest seed so cells
///   brighten toward their edges.
/// - **Seed**: Offset applied to the seed-point hash.
pub struct Voronoi {
    parameters: Vec<ParameterDefinition>,
}

impl Voronoi {
    /// Creates a Voronoi generator with its default parameters.
    pub fn new() -> Self {
        Self {
            parameters: vec![
                ParameterDefinition::linear("frequency", "Frequency", 0.01, 16.0, 1.0),
                ParameterDefinition::linear("displacement", "Displacement", 0.0, 4.0, 1.0),
                ParameterDefinition::toggle("distance", "Distance", false),
                ParameterDefinition::integer("seed", "Seed", 0, 65535, 0),
            ],
        }
    }

    pub const PARAM_FREQUENCY: usize = 0;
    pub const PARAM_DISPLACEMENT: usize = 1;
    pub const PARAM_DISTANCE: usize = 2;
    pub const PARAM_SEED: usize = 3;

    /// Finds the seed point nearest to `(x, y, z)` in the 5×5×5 block of
    /// cubes around it.
    fn nearest_seed(x: f64, y: f64, z: f64, seed: i32) -> (f64, f64, f64) {
        let xi = x.floor() as i32;
        let yi = y.floor() as i32;
        let zi = z.floor() as i32;

        let mut min_dist = f64::MAX;
        let mut candidate = (0.0, 0.0, 0.0);

        for zc in (zi - 2)..=(zi + 2) {
            for yc in (yi - 2)..=(yi + 2) {
                for xc in (xi - 2)..=(xi + 2) {
                    let px = xc as f64 + value_noise_3d(xc, yc, zc, seed);
                    let py = yc as f64 + value_noise_3d(xc, yc, zc, seed.wrapping_add(1));
                    let pz = zc as f64 + value_noise_3d(xc, yc, zc, seed.wrapping_add(2));

                    let (dx, dy, dz) = (px - x, py - y, pz - z);
                    let dist = dx * dx + dy * dy + dz * dz;
                    if dist < min_dist {
                        min_dist = dist;
                        candidate = (px, py, pz);
                    }
                }
            }
        }

        candidate
    }

    fn value_at(x: f64, y: f64, z: f64, displacement: f64, distance: bool, seed: i32) -> f64 {
        let (cx, cy, cz) = Self::nearest_seed(x, y, z, seed);

        let distance_term = if distance {
            let (dx, dy, dz) = (cx - x, cy - y, cz - z);
            (dx * dx + dy * dy + dz * dz).sqrt() * 3.0_f64.sqrt() - 1.0
        } else {
            0.0
        };

        distance_term
            + displacement
                * value_noise_3d(cx.floor() as i32, cy.floor() as i32, cz.floor() as i32, 0)
    }
}

impl Default for Voronoi {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Voronoi {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo = ModuleInfo::new(NodeKind::Voronoi, "Jittered Voronoi cells");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, _inputs: &[&NoiseMap], params: &[f64], window: &SampleWindow) -> NoiseMap {
        let frequency = params.get(Self::PARAM_FREQUENCY).copied().unwrap_or(1.0);
        let displacement = params.get(Self::PARAM_DISPLACEMENT).copied().unwrap_or(1.0);
        let distance = as_flag(params, Self::PARAM_DISTANCE);
        let seed = as_int(params, Self::PARAM_SEED);

        NoiseMap::generate(window, |x, y, z| {
            Self::value_at(
                make_int32_range(x * frequency),
                make_int32_range(y * frequency),
                make_int32_range(z * frequency),
                displacement,
                distance,
                seed,
            )
        })
    }
}
