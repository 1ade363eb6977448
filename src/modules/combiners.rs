//! Binary combiners: Add, Max, Min.

use crate::noise::{
    module_trait::{ModuleInfo, NoiseModule},
    parameter::ParameterDefinition,
    NodeKind, NoiseMap, SampleWindow,
};

const SOURCES: &[&str] = &["Source A", "Source B"];

/// Declares a parameterless combiner applying `$op` to both sources.
macro_rules! combiner {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $description:literal, $op:expr) => {
        $(#[$doc])*
        pub struct $name {
            parameters: Vec<ParameterDefinition>,
        }

        impl $name {
            pub fn new() -> Self {
                Self { parameters: vec![] }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl NoiseModule for $name {
            fn info(&self) -> &ModuleInfo {
                static INFO: ModuleInfo = ModuleInfo::new($kind, $description);
                &INFO
            }

            fn input_names(&self) -> &'static [&'static str] {
                SOURCES
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
                inputs[0].zip(inputs[1], $op)
            }
        }
    };
}

combiner!(
    /// Sum of both sources.
    Add,
    NodeKind::Add,
    "Sum of two sources",
    |a, b| a + b
);

combiner!(
    /// Larger of both sources at each sample.
    Max,
    NodeKind::Max,
    "Larger of two sources",
    f64::max
);

combiner!(
    /// Smaller of both sources at each sample.
    Min,
    NodeKind::Min,
    "Smaller of two sources",
    f64::min
);

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> (SampleWindow, NoiseMap, NoiseMap) {
        let window = SampleWindow::new([0.0, 3.0], [0.0, 1.0], 3, 1);
        let a = NoiseMap::generate(&window, |x, _, _| x - 1.0); // -1, 0, 1
        let b = NoiseMap::filled(&window, 0.5);
        (window, a, b)
    }

    #[test]
    fn test_add() {
        let (window, a, b) = inputs();
        let out = Add::new().evaluate(&[&a, &b], &[], &window);
        assert_eq!(out.values(), &[-0.5, 0.5, 1.5]);
    }

    #[test]
    fn test_max() {
        let (window, a, b) = inputs();
        let out = Max::new().evaluate(&[&a, &b], &[], &window);
        assert_eq!(out.values(), &[0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_min() {
        let (window, a, b) = inputs();
        let out = Min::new().evaluate(&[&a, &b], &[], &window);
        assert_eq!(out.values(), &[-1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_combiners_declare_two_inputs() {
        assert_eq!(Add::new().input_names().len(), NodeKind::Add.arity());
        assert_eq!(Max::new().info().kind, NodeKind::Max);
        assert_eq!(Min::new().info().id(), "comb.min");
    }
}
