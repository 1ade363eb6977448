//! Graph module
//!
//! Node graph storage and evaluation.
//! Handles identity, structural validation, dirty propagation and lazy
//! evaluation of node fields.

mod evaluator;
mod ids;
mod node;
mod storage;
mod validation;

pub use evaluator::EvaluationStats;
pub use ids::{Link, LinkId, NodeId, PinId, PinRole};
pub use node::{Node, PreviewSlot};
pub use storage::NoiseGraph;
pub use validation::{LinkRejection, ValidationResult};
