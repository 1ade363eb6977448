//! Editor module
//!
//! The controller that connects a noise graph to an interactive canvas and
//! a texture service.

pub mod canvas;
pub mod controller;

pub use canvas::{EditorContext, GraphCanvas, NodeEdit, NodeView};
pub use controller::NodeEditor;
