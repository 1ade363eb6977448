//! Graph widget state for the noise editor.
//!
//! Contains the user state passed to egui_node_graph2 callbacks.

use std::time::Instant;

use egui_node_graph2::{Graph, GraphEditorState, NodeId as GraphNodeId};

use super::{FieldInput, FieldType, NoiseNodeData, NoiseNodeTemplate};

/// Duration to show a rejected link's reason before auto-clearing.
const VALIDATION_MESSAGE_DURATION_SECS: f32 = 3.0;

/// User state for the graph widget.
#[derive(Debug, Default)]
pub struct NoiseGraphState {
    /// Widget node picked by the last click, if any.
    pub selected_node: Option<GraphNodeId>,

    /// Reason the last proposed link was rejected.
    validation_message: Option<String>,

    /// When the validation message was set (for auto-clear).
    validation_message_time: Option<Instant>,
}

impl NoiseGraphState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a validation error message to display.
    pub fn set_validation_error(&mut self, message: impl Into<String>) {
        self.validation_message = Some(message.into());
        self.validation_message_time = Some(Instant::now());
    }

    pub fn clear_validation_message(&mut self) {
        self.validation_message = None;
        self.validation_message_time = None;
    }

    /// Get the current validation message if it hasn't expired.
    pub fn validation_message(&mut self) -> Option<&str> {
        if let Some(time) = self.validation_message_time {
            if time.elapsed().as_secs_f32() > VALIDATION_MESSAGE_DURATION_SECS {
                self.clear_validation_message();
            }
        }
        self.validation_message.as_deref()
    }
}

/// The widget-side copy of the noise graph.
pub type NoiseGraphModel = Graph<NoiseNodeData, FieldType, FieldInput>;

/// Type alias for the complete graph editor state with our custom types.
/// Order: NodeData, DataType, ValueType, NodeTemplate, UserState
pub type NoiseGraphEditorState =
    GraphEditorState<NoiseNodeData, FieldType, FieldInput, NoiseNodeTemplate, NoiseGraphState>;

/// Create a new graph editor state with default configuration.
pub fn create_editor_state() -> NoiseGraphEditorState {
    GraphEditorState::new(1.0)
}
