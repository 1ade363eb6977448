//! The core NoiseModule trait and supporting types.
//!
//! This module defines the interface every node kind implements: a pure
//! function from input fields and parameter values to an output field.

use super::field::{NoiseMap, SampleWindow};
use super::kind::{NodeKind, NodeRole};
use super::parameter::ParameterDefinition;

/// Static information about a noise module.
///
/// This describes the module's identity and classification,
/// used for display in the UI and the module registry.
#[derive(Clone, Debug)]
pub struct ModuleInfo {
    /// The node kind this module implements.
    pub kind: NodeKind,
    /// A brief description of what the module does.
    pub description: &'static str,
}

impl ModuleInfo {
    /// Creates a new module info.
    pub const fn new(kind: NodeKind, description: &'static str) -> Self {
        Self { kind, description }
    }

    /// Unique identifier for the module type (e.g., "gen.perlin").
    pub fn id(&self) -> &'static str {
        self.kind.module_id()
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The role this module belongs to.
    pub fn role(&self) -> NodeRole {
        self.kind.role()
    }
}

/// The core trait that all noise modules must implement.
///
/// A module is a stateless strategy object: it describes its inputs and
/// parameters, and computes an output field from already-evaluated input
/// fields. Evaluation must be referentially transparent; the evaluator
/// caches results and only calls `evaluate` again after something upstream
/// changed.
///
/// # Example
///
/// ```ignore
/// struct Negate {
///     parameters: Vec<ParameterDefinition>,
/// }
///
/// impl NoiseModule for Negate {
///     fn info(&self) -> &ModuleInfo { &NEGATE_INFO }
///     fn input_names(&self) -> &'static [&'static str] { &["Source"] }
///     fn parameters(&self) -> &[ParameterDefinition] { &self.parameters }
///
///     fn evaluate(
///         &self,
///         inputs: &[&NoiseMap],
///         _params: &[f64],
///         _window: &SampleWindow,
///     ) -> NoiseMap {
///         inputs[0].map(|v| -v)
///     }
/// }
/// ```
pub trait NoiseModule: Send + 'static {
    /// Returns static information about this module.
    fn info(&self) -> &ModuleInfo;

    /// Returns the labels of the input pins, in slot order.
    ///
    /// The length must equal the arity of the module's kind.
    fn input_names(&self) -> &'static [&'static str];

    /// Returns the parameter definitions for this module.
    ///
    /// The order of parameters determines their indices in the `params` slice
    /// passed to the `evaluate` method.
    fn parameters(&self) -> &[ParameterDefinition];

    /// Computes the output field.
    ///
    /// # Arguments
    ///
    /// * `inputs` - One field per input pin, in slot order. Unconnected
    ///   inputs are a constant-zero field.
    /// * `params` - Current parameter values, indexed by parameter order
    /// * `window` - The sample window every field in the graph shares
    fn evaluate(&self, inputs: &[&NoiseMap], params: &[f64], window: &SampleWindow) -> NoiseMap;

    /// The node kind this module implements.
    fn kind(&self) -> NodeKind {
        self.info().kind
    }

    /// Default values for every parameter, in definition order.
    fn default_parameters(&self) -> Vec<f64> {
        self.parameters().iter().map(|p| p.default).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static NEGATE_INFO: ModuleInfo = ModuleInfo::new(NodeKind::Invert, "Negates its source");

    struct Negate {
        parameters: Vec<ParameterDefinition>,
    }

    impl NoiseModule for Negate {
        fn info(&self) -> &ModuleInfo {
            &NEGATE_INFO
        }

        fn input_names(&self) -> &'static [&'static str] {
            &["Source"]
        }

        fn parameters(&self) -> &[ParameterDefinition] {
            &self.parameters
        }

        fn evaluate(
            &self,
            inputs: &[&NoiseMap],
            _params: &[f64],
            _window: &SampleWindow,
        ) -> NoiseMap {
            inputs[0].map(|v| -v)
        }
    }

    #[test]
    fn test_module_info_derives_from_kind() {
        assert_eq!(NEGATE_INFO.id(), "mod.invert");
        assert_eq!(NEGATE_INFO.name(), "Invert");
        assert_eq!(NEGATE_INFO.role(), NodeRole::Modifier);
    }

    #[test]
    fn test_default_parameters() {
        let module = Negate {
            parameters: vec![
                ParameterDefinition::linear("a", "A", 0.0, 1.0, 0.25),
                ParameterDefinition::integer("b", "B", 0, 4, 3),
            ],
        };
        assert_eq!(module.default_parameters(), vec![0.25, 3.0]);
        assert_eq!(module.kind(), NodeKind::Invert);
    }

    #[test]
    fn test_evaluate_through_trait_object() {
        let module: Box<dyn NoiseModule> = Box::new(Negate { parameters: vec![] });
        let window = SampleWindow::new([0.0, 1.0], [0.0, 1.0], 2, 2);
        let input = NoiseMap::filled(&window, 0.5);
        let out = module.evaluate(&[&input], &[], &window);
        assert!(out.values().iter().all(|&v| v == -0.5));
    }
}
