//! Selector module.
//!
//! Chooses between two source fields according to a control field.

use crate::noise::{
    module_trait::{ModuleInfo, NoiseModule},
    parameter::ParameterDefinition,
    primitives::{lerp, s_curve3},
    NodeKind, NoiseMap, SampleWindow,
};

/// Picks source B where the control lies inside `[lower, upper]` and source
/// A outside it.
///
/// # Inputs
///
/// - **Source A**: Used where the control is outside the selection range.
/// - **Source B**: Used where the control is inside the selection range.
/// - **Control**: Decides which source each sample comes from.
///
/// # Parameters
///
/// - **Lower** (-4 to +4): Lower bound of the selection range, default -1.
/// - **Upper** (-4 to +4): Upper bound of the selection range, default +1.
/// - **Edge Falloff** (0 to 4): Width of the s-curve blend around each
///   bound, default 0 (hard edges). Limited to half the range width.
pub struct Select {
    parameters: Vec<ParameterDefinition>,
}

impl Select {
    pub fn new() -> Self {
        Self {
            parameters: vec![
                ParameterDefinition::linear("lower", "Lower", -4.0, 4.0, -1.0),
                ParameterDefinition::linear("upper", "Upper", -4.0, 4.0, 1.0),
                ParameterDefinition::linear("edge_falloff", "Edge Falloff", 0.0, 4.0, 0.0),
            ],
        }
    }

    pub const INPUT_SOURCE_A: usize = 0;
    pub const INPUT_SOURCE_B: usize = 1;
    pub const INPUT_CONTROL: usize = 2;

    pub const PARAM_LOWER: usize = 0;
    pub const PARAM_UPPER: usize = 1;
    pub const PARAM_EDGE_FALLOFF: usize = 2;

    /// Selects one sample.
    fn select(a: f64, b: f64, control: f64, lower: f64, upper: f64, falloff: f64) -> f64 {
        if falloff <= 0.0 {
            return if control < lower || control > upper {
                a
            } else {
                b
            };
        }

        if control < lower - falloff {
            a
        } else if control < lower + falloff {
            let (start, end) = (lower - falloff, lower + falloff);
            lerp(a, b, s_curve3((control - start) / (end - start)))
        } else if control < upper - falloff {
            b
        } else if control < upper + falloff {
            let (start, end) = (upper - falloff, upper + falloff);
            lerp(b, a, s_curve3((control - start) / (end - start)))
        } else {
            a
        }
    }
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Select {
    fn info(&self) -> &ModuleInfo {
        static INFO: ModuleInfo =
            ModuleInfo::new(NodeKind::Select, "Chooses between two sources by a control");
        &INFO
    }

    fn input_names(&self) -> &'static [&'static str] {
        &["Source A", "Source B", "Control"]
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    fn evaluate(&self, inputs: &[&NoiseMap], params: &[f64], _window: &SampleWindow) -> NoiseMap {
        let lower = params.get(Self::PARAM_LOWER).copied().unwrap_or(-1.0);
        let upper = params.get(Self::PARAM_UPPER).copied().unwrap_or(1.0);
        let falloff = params
            .get(Self::PARAM_EDGE_FALLOFF)
            .copied()
            .unwrap_or(0.0)
            .min(((upper - lower) / 2.0).max(0.0));

        inputs[Self::INPUT_SOURCE_A].zip3(
            inputs[Self::INPUT_SOURCE_B],
            inputs[Self::INPUT_CONTROL],
            |a, b, control| Self::select(a, b, control, lower, upper, falloff),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (SampleWindow, NoiseMap, NoiseMap, NoiseMap) {
        // Control ramps -2.0, -1.0, 0.0, 1.0, 2.0
        let window = SampleWindow::new([-2.0, 3.0], [0.0, 1.0], 5, 1);
        let a = NoiseMap::filled(&window, -1.0);
        let b = NoiseMap::filled(&window, 1.0);
        let control = NoiseMap::generate(&window, |x, _, _| x);
        (window, a, b, control)
    }

    #[test]
    fn test_hard_select() {
        let (window, a, b, control) = setup();
        let select = Select::new();
        let out = select.evaluate(&[&a, &b, &control], &select.default_parameters(), &window);
        assert_eq!(out.values(), &[-1.0, 1.0, 1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_narrow_range() {
        let (window, a, b, control) = setup();
        let out = Select::new().evaluate(&[&a, &b, &control], &[-0.5, 0.5, 0.0], &window);
        assert_eq!(out.values(), &[-1.0, -1.0, 1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_falloff_blends_at_bounds() {
        let (window, a, b, control) = setup();
        let out = Select::new().evaluate(&[&a, &b, &control], &[-1.0, 1.0, 0.5], &window);
        // Exactly on a bound the s-curve is at its midpoint.
        assert_eq!(out.get(1, 0), Some(0.0));
        assert_eq!(out.get(3, 0), Some(0.0));
        assert_eq!(out.get(2, 0), Some(1.0));
        assert_eq!(out.get(0, 0), Some(-1.0));
    }

    #[test]
    fn test_falloff_limited_to_half_range() {
        let (window, a, b, control) = setup();
        let wide = Select::new().evaluate(&[&a, &b, &control], &[-1.0, 1.0, 4.0], &window);
        let capped = Select::new().evaluate(&[&a, &b, &control], &[-1.0, 1.0, 1.0], &window);
        assert_eq!(wide, capped);
    }

    #[test]
    fn test_unconnected_control_selects_b() {
        let window = SampleWindow::default().with_size(4, 4);
        let a = NoiseMap::filled(&window, 0.3);
        let b = NoiseMap::filled(&window, 0.7);
        let zeros = NoiseMap::zeros(&window);
        let select = Select::new();
        let out = select.evaluate(&[&a, &b, &zeros], &select.default_parameters(), &window);
        assert!(out.values().iter().all(|&v| v == 0.7));
    }
}
