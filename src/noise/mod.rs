//! Noise module
//!
//! Core field-computation traits and types.
//! Defines the NoiseModule trait, node kinds, parameters, sampled fields
//! and the coherent-noise primitives the generators are built on.

pub mod field;
pub mod kind;
pub mod module_trait;
pub mod parameter;
pub mod primitives;
pub mod registry;

pub use field::{NoiseMap, SampleWindow};
pub use kind::{NodeKind, NodeRole};
pub use module_trait::{ModuleInfo, NoiseModule};
pub use parameter::{ParameterDefinition, ParameterDisplay};
pub use primitives::NoiseQuality;
pub use registry::ModuleRegistry;
