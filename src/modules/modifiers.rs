//! Unary modifiers.
//!
//! Each modifier maps its single source field sample by sample.

use crate::noise::{
    module_trait::{ModuleInfo, NoiseModule},
    parameter::ParameterDefinition,
    NodeKind, NoiseMap, SampleWindow,
};

const SOURCE: &[&str] = &["Source"];

// ============================================================================
// Abs
// ============================================================================

/// Absolute value of the source.
pub struct Abs {
    parameters: Vec<ParameterDefinition>,
}

impl Abs {
    pub fn new() -> Self {
        Self { parameters: vec![] }
    }
}

impl Default for Abs {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Abs {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo = ModuleInfo::new(NodeKind::Abs, "Absolute value of the source");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        SOURCE
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, inputs: &[&NoiseMap], _params: &[f64], _window: &SampleWindow) -> NoiseMap {
        inputs[0].map(f64::abs)
    }
}

// ============================================================================
// Clamp
// ============================================================================

/// Limits the source to `[lower, upper]`.
///
/// # Parameters
///
/// - **Lower** (-4 to +4): Lower bound, default -1.
/// - **Upper** (-4 to +4): Upper bound, default +1.
///
/// If the bounds cross, every sample collapses to the upper bound.
pub struct Clamp {
    parameters: Vec<ParameterDefinition>,
}

impl Clamp {
    pub fn new() -> Self {
        Self {
            parameters: vec![
                ParameterDefinition::linear("lower", "Lower", -4.0, 4.0, -1.0),
                ParameterDefinition::linear("upper", "Upper", -4.0, 4.0, 1.0),
            ],
        }
    }

    pub const PARAM_LOWER: usize = 0;
    pub const PARAM_UPPER: usize = 1;
}

impl Default for Clamp {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Clamp {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo = ModuleInfo::new(NodeKind::Clamp, "Limits the source to a range");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        SOURCE
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, inputs: &[&NoiseMap], params: &[f64], _window: &SampleWindow) -> NoiseMap {
        let lower = params.get(Self::PARAM_LOWER).copied().unwrap_or(-1.0);
        let upper = params.get(Self::PARAM_UPPER).copied().unwrap_or(1.0);
        inputs[0].map(|v| v.max(lower).min(upper))
    }
}

// ============================================================================
// Exponent
// ============================================================================

/// Applies an exponential curve to the source.
///
/// The source is remapped from `[-1, 1]` to `[0, 1]`, raised to the
/// exponent, and mapped back.
///
/// # Parameters
///
/// - **Exponent** (0.1 to 8): Default 1 (identity on `[-1, 1]`).
pub struct Exponent {
    parameters: Vec<ParameterDefinition>,
}

impl Exponent {
    pub fn new() -> Self {
        Self {
            parameters: vec![ParameterDefinition::linear(
                "exponent", "Exponent", 0.1, 8.0, 1.0,
            )],
        }
    }

    pub const PARAM_EXPONENT: usize = 0;
}

impl Default for Exponent {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Exponent {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo =
            ModuleInfo::new(NodeKind::Exponent, "Exponential curve over the source");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        SOURCE
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, inputs: &[&NoiseMap], params: &[f64], _window: &SampleWindow) -> NoiseMap {
        let exponent = params.get(Self::PARAM_EXPONENT).copied().unwrap_or(1.0);
        inputs[0].map(|v| ((v + 1.0) / 2.0).abs().powf(exponent) * 2.0 - 1.0)
    }
}

// ============================================================================
// Invert
// ============================================================================

/// Negates the source.
pub struct Invert {
    parameters: Vec<ParameterDefinition>,
}

impl Invert {
    pub fn new() -> Self {
        Self { parameters: vec![] }
    }
}

impl Default for Invert {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Invert {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo = ModuleInfo::new(NodeKind::Invert, "Negates the source");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        SOURCE
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, inputs: &[&NoiseMap], _params: &[f64], _window: &SampleWindow) -> NoiseMap {
        inputs[0].map(|v| -v)
    }
}

// ============================================================================
// ScaleBias
// ============================================================================

/// Computes `source * scale + bias`.
///
/// # Parameters
///
/// - **Scale** (-4 to +4): Default 1.
/// - **Bias** (-4 to +4): Default 0.
pub struct ScaleBias {
    parameters: Vec<ParameterDefinition>,
}

impl ScaleBias {
    pub fn new() -> Self {
        Self {
            parameters: vec![
                ParameterDefinition::linear("scale", "Scale", -4.0, 4.0, 1.0),
                ParameterDefinition::linear("bias", "Bias", -4.0, 4.0, 0.0),
            ],
        }
    }

    pub const PARAM_SCALE: usize = 0;
    pub const PARAM_BIAS: usize = 1;
}

impl Default for ScaleBias {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for ScaleBias {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo =
            ModuleInfo::new(NodeKind::ScaleBias, "Scales the source and adds a bias");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        SOURCE
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, inputs: &[&NoiseMap], params: &[f64], _window: &SampleWindow) -> NoiseMap {
        let scale = params.get(Self::PARAM_SCALE).copied().unwrap_or(1.0);
        let bias = params.get(Self::PARAM_BIAS).copied().unwrap_or(0.0);
        inputs[0].map(|v| v * scale + bias)
    }
}
