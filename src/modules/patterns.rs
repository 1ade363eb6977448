//! Simple geometric generators.
//!
//! These produce regular patterns rather than noise: a checkerboard, a
//! constant, and concentric cylinder or sphere shells. They are mostly used
//! as control fields for [`Select`](super::Select) or as building blocks for
//! combiners.

use crate::noise::{
    module_trait::{ModuleInfo, NoiseModule},
    parameter::ParameterDefinition,
    primitives::make_int32_range,
    NodeKind, NoiseMap, SampleWindow,
};

/// Value of concentric shells at distance `dist` from the center, peaking at
/// 1.0 on every integer radius and falling to -1.0 halfway between.
fn shell_value(dist: f64) -> f64 {
    let dist_from_smaller = dist - dist.floor();
    let dist_from_larger = 1.0 - dist_from_smaller;
    let nearest = dist_from_smaller.min(dist_from_larger);
    1.0 - nearest * 4.0
}

// ============================================================================
// Checkerboard
// ============================================================================

/// Alternating unit cubes of +1 and -1.
pub struct Checkerboard {
    parameters: Vec<ParameterDefinition>,
}

impl Checkerboard {
    /// Creates a Checkerboard generator.
    pub fn new() -> Self {
        Self { parameters: vec![] }
    }
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Checkerboard {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo =
            ModuleInfo::new(NodeKind::Checkerboard, "Alternating unit cubes of +1 and -1");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, _inputs: &[&NoiseMap], _params: &[f64], window: &SampleWindow) -> NoiseMap {
        NoiseMap::generate(window, |x, y, z| {
            let ix = make_int32_range(x).floor() as i32;
            let iy = make_int32_range(y).floor() as i32;
            let iz = make_int32_range(z).floor() as i32;
            if (ix & 1) ^ (iy & 1) ^ (iz & 1) != 0 {
                -1.0
            } else {
                1.0
            }
        })
    }
}

// ============================================================================
// Const
// ============================================================================

/// A field with the same value everywhere.
///
/// # Parameters
///
/// - **Value** (-4 to +4): The constant.
pub struct Const {
    parameters: Vec<ParameterDefinition>,
}

impl Const {
    /// Creates a Const generator, defaulting to zero.
    pub fn new() -> Self {
        Self {
            parameters: vec![ParameterDefinition::linear("value", "Value", -4.0, 4.0, 0.0)],
        }
    }

    pub const PARAM_VALUE: usize = 0;
}

impl Default for Const {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Const {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo = ModuleInfo::new(NodeKind::Const, "Constant value");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, _inputs: &[&NoiseMap], params: &[f64], window: &SampleWindow) -> NoiseMap {
        let value = params.get(Self::PARAM_VALUE).copied().unwrap_or(0.0);
        NoiseMap::filled(window, value as f32)
    }
}

// ============================================================================
// Cylinders
// ============================================================================

/// Concentric cylinders around the y axis.
///
/// On the preview plane this shows as rings centered on the origin.
///
/// # Parameters
///
/// - **Frequency**: Number of shells per unit length.
pub struct Cylinders {
    parameters: Vec<ParameterDefinition>,
}

impl Cylinders {
    /// Creates a Cylinders generator with unit frequency.
    pub fn new() -> Self {
        Self {
            parameters: vec![ParameterDefinition::linear(
                "frequency",
                "Frequency",
                0.01,
                16.0,
                1.0,
            )],
        }
    }

    pub const PARAM_FREQUENCY: usize = 0;
}

impl Default for Cylinders {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Cylinders {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo =
            ModuleInfo::new(NodeKind::Cylinders, "Concentric cylinders around the y axis");
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
        NoiseMap::generate(window, |x, _y, z| {
            let (x, z) = (x * frequency, z * frequency);
            shell_value((x * x + z * z).sqrt())
        })
    }
}

// ============================================================================
// Spheres
// ============================================================================

/// Concentric spheres around the origin.
///
/// # Parameters
///
/// - **Frequency**: Number of shells per unit length.
pub struct Spheres {
    parameters: Vec<ParameterDefinition>,
}

impl Spheres {
    /// Creates a Spheres generator with unit frequency.
    pub fn new() -> Self {
        Self {
            parameters: vec![ParameterDefinition::linear(
                "frequency",
                "Frequency",
                0.01,
                16.0,
                1.0,
            )],
        }
    }

    pub const PARAM_FREQUENCY: usize = 0;
}

impl Default for Spheres {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Spheres {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo =
            ModuleInfo::new(NodeKind::Spheres, "Concentric spheres around the origin");
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
        NoiseMap::generate(window, |x, y, z| {
            let (x, y, z) = (x * frequency, y * frequency, z * frequency);
            shell_value((x * x + y * y + z * z).sqrt())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_value() {
        assert_eq!(shell_value(0.0), 1.0);
        assert_eq!(shell_value(2.0), 1.0);
        assert_eq!(shell_value(0.5), -1.0);
        assert_eq!(shell_value(1.25), 0.0);
    }

    #[test]
    fn test_checkerboard_alternates() {
        let window = SampleWindow::new([0.0, 4.0], [0.0, 4.0], 4, 4);
        let map = Checkerboard::new().evaluate(&[], &[], &window);
        assert_eq!(map.get(0, 0), Some(1.0));
        assert_eq!(map.get(1, 0), Some(-1.0));
        assert_eq!(map.get(0, 1), Some(-1.0));
        assert_eq!(map.get(1, 1), Some(1.0));
        assert!(map.values().iter().all(|&v| v == 1.0 || v == -1.0));
    }

    #[test]
    fn test_const_fills_value() {
        let module = Const::new();
        let window = SampleWindow::default().with_size(8, 8);
        assert!(module
            .evaluate(&[], &module.default_parameters(), &window)
            .values()
            .iter()
            .all(|&v| v == 0.0));
        let map = module.evaluate(&[], &[0.75], &window);
        assert!(map.values().iter().all(|&v| v == 0.75));
    }

    #[test]
    fn test_cylinders_ignore_y_and_peak_on_integer_radii() {
        let window = SampleWindow::new([0.0, 4.0], [0.0, 4.0], 8, 8);
        let map = Cylinders::new().evaluate(&[], &[1.0], &window);
        // (0, 0), (1, 0) and (0, 2) lie on integer radii.
        assert_eq!(map.get(0, 0), Some(1.0));
        assert_eq!(map.get(2, 0), Some(1.0));
        assert_eq!(map.get(0, 4), Some(1.0));
        // (0.5, 0) is halfway between shells.
        assert_eq!(map.get(1, 0), Some(-1.0));
    }

    #[test]
    fn test_spheres_match_cylinders_on_preview_plane() {
        // The preview plane is y = 0, where sphere and cylinder distances agree.
        let window = SampleWindow::default().with_size(16, 16);
        let spheres = Spheres::new().evaluate(&[], &[2.0], &window);
        let cylinders = Cylinders::new().evaluate(&[], &[2.0], &window);
        assert_eq!(spheres, cylinders);
    }
}
