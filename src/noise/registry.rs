//! Module registry for managing noise module types.
//!
//! The registry maps each [`NodeKind`] to a factory for the module that
//! implements it, so the graph can instantiate a node's evaluation strategy
//! from its kind tag.

use std::collections::HashMap;

use super::kind::{NodeKind, NodeRole};
use super::module_trait::{ModuleInfo, NoiseModule};
use crate::modules;

/// Factory function type for creating module instances.
///
/// Returns a boxed trait object for type erasure.
pub type ModuleFactory = fn() -> Box<dyn NoiseModule>;

/// Central registry of available noise module types.
///
/// # Example
///
/// ```ignore
/// let registry = ModuleRegistry::builtin();
/// let perlin = registry.create(NodeKind::Perlin).unwrap();
/// assert_eq!(perlin.input_names().len(), 0);
/// ```
pub struct ModuleRegistry {
    /// Map of node kind to factory function.
    factories: HashMap<NodeKind, ModuleFactory>,
    /// Cached module information for listing.
    infos: Vec<ModuleInfo>,
}

impl ModuleRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            infos: Vec::new(),
        }
    }

    /// Creates a registry with every built-in module registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        // Generators
        registry.register::<modules::Perlin>();
        registry.register::<modules::Billow>();
        registry.register::<modules::RidgedMulti>();
        registry.register::<modules::Voronoi>();
        registry.register::<modules::Checkerboard>();
        registry.register::<modules::Const>();
        registry.register::<modules::Cylinders>();
        registry.register::<modules::Spheres>();

        // Modifiers
        registry.register::<modules::Abs>();
        registry.register::<modules::Clamp>();
        registry.register::<modules::Exponent>();
        registry.register::<modules::Invert>();
        registry.register::<modules::ScaleBias>();

        // Combiners
        registry.register::<modules::Add>();
        registry.register::<modules::Max>();
        registry.register::<modules::Min>();

        // Selector
        registry.register::<modules::Select>();

        registry
    }

    /// Registers a module type with the registry.
    ///
    /// A temporary instance is created to extract the module's info,
    /// which is then stored along with a factory function.
    ///
    /// # Panics
    ///
    /// Panics if a module for the same kind is already registered, or if the
    /// module's input pins do not match the arity of its kind.
    pub fn register<M: NoiseModule + Default + 'static>(&mut self) {
        let temp = M::default();
        let info = temp.info().clone();
        let kind = info.kind;

        if self.factories.contains_key(&kind) {
            panic!("Module '{}' is already registered", kind.module_id());
        }
        if temp.input_names().len() != kind.arity() {
            panic!(
                "Module '{}' declares {} inputs but its kind has arity {}",
                kind.module_id(),
                temp.input_names().len(),
                kind.arity()
            );
        }

        self.factories.insert(kind, create_module::<M>);
        self.infos.push(info);
    }

    /// Creates a new instance of the module for `kind`.
    ///
    /// Returns `None` if no module for the kind is registered.
    pub fn create(&self, kind: NodeKind) -> Option<Box<dyn NoiseModule>> {
        self.factories.get(&kind).map(|factory| factory())
    }

    /// Returns a list of all registered module types, in registration order.
    pub fn list_modules(&self) -> &[ModuleInfo] {
        &self.infos
    }

    /// Registered kinds grouped by role, in menu display order.
    pub fn catalog(&self) -> Vec<(NodeRole, Vec<NodeKind>)> {
        NodeKind::by_role()
            .into_iter()
            .map(|(role, kinds)| {
                let kinds = kinds
                    .into_iter()
                    .filter(|kind| self.contains(*kind))
                    .collect::<Vec<_>>();
                (role, kinds)
            })
            .filter(|(_, kinds)| !kinds.is_empty())
            .collect()
    }

    /// Returns the number of registered modules.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Checks if a module for the given kind is registered.
    pub fn contains(&self, kind: NodeKind) -> bool {
        self.factories.contains_key(&kind)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal factory function for creating module instances.
fn create_module<M: NoiseModule + Default + 'static>() -> Box<dyn NoiseModule> {
    Box::new(M::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{NoiseMap, ParameterDefinition, SampleWindow};

    /// A modifier that declares the wrong number of inputs.
    #[derive(Default)]
    struct BrokenModifier {
        parameters: Vec<ParameterDefinition>,
    }

    impl NoiseModule for BrokenModifier {
        fn info(&self) -> &ModuleInfo {
            static INFO: ModuleInfo = ModuleInfo::new(NodeKind::Abs, "Declares two inputs");
            &INFO
        }

        fn input_names(&self) -> &'static [&'static str] {
            &["A", "B"]
        }

        fn parameters(&self) -> &[ParameterDefinition] {
            &self.parameters
        }

        fn evaluate(&self, inputs: &[&NoiseMap], _: &[f64], _: &SampleWindow) -> NoiseMap {
            inputs[0].clone()
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = ModuleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.catalog().is_empty());
    }

    #[test]
    fn test_builtin_registers_every_kind() {
        let registry = ModuleRegistry::builtin();
        assert_eq!(registry.len(), NodeKind::ALL.len());
        for kind in NodeKind::ALL {
            let module = registry.create(kind).unwrap();
            assert_eq!(module.kind(), kind);
            assert_eq!(module.input_names().len(), kind.arity());
        }
    }

    #[test]
    fn test_builtin_catalog_matches_roles() {
        let registry = ModuleRegistry::builtin();
        assert_eq!(registry.catalog(), NodeKind::by_role());
    }

    #[test]
    fn test_register_single_module() {
        let mut registry = ModuleRegistry::new();
        registry.register::<modules::Add>();
        assert!(registry.contains(NodeKind::Add));
        assert!(registry.create(NodeKind::Min).is_none());
        assert_eq!(registry.catalog(), vec![(NodeRole::Combiner, vec![NodeKind::Add])]);
        assert_eq!(registry.list_modules()[0].id(), "comb.add");
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_registration_panics() {
        let mut registry = ModuleRegistry::new();
        registry.register::<modules::Perlin>();
        registry.register::<modules::Perlin>();
    }

    #[test]
    #[should_panic(expected = "arity")]
    fn test_arity_mismatch_panics() {
        let mut registry = ModuleRegistry::new();
        registry.register::<BrokenModifier>();
    }
}
