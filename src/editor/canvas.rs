//! Trait definitions for decoupling the editor controller from the canvas
//! that draws the graph and reports user gestures.
//!
//! Each frame the controller drives the canvas through a fixed sequence:
//! `begin`, node and link drawing, the create phase, the delete phase, the
//! background context menu, the node creation menu, and `end`. Within the
//! create and delete phases the canvas proposes edits and the controller
//! answers with accept or reject after validating them.

use egui::Pos2;

use crate::error::PreviewError;
use crate::graph::{Link, LinkId, NodeId, PinId};
use crate::noise::{NodeKind, NodeRole, ParameterDefinition};

/// Per-editor state handed to the canvas every frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorContext {
    /// Name of the editor, used to identify its canvas state.
    pub name: String,
    /// Canvas position where the next node from the creation menu is placed.
    ///
    /// Recorded when the background context menu opens.
    pub pending_placement: Option<Pos2>,
}

impl EditorContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pending_placement: None,
        }
    }
}

/// Everything the canvas needs to draw one node.
pub struct NodeView<'a, H> {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Pos2,
    /// Labels of the input pins, in slot order.
    pub input_names: &'static [&'static str],
    pub parameters: &'a [ParameterDefinition],
    /// Current value of each parameter.
    pub values: &'a [f64],
    /// Last successfully uploaded preview texture.
    pub preview: Option<&'a H>,
    pub preview_visible: bool,
    /// Sticky error from the last failed preview upload.
    pub preview_error: Option<&'a PreviewError>,
    /// True if the node's field is out of date.
    pub dirty: bool,
}

impl<H> NodeView<'_, H> {
    /// Pin id of input `slot`.
    pub fn input_pin(&self, slot: usize) -> PinId {
        PinId::input(self.id, slot)
    }

    pub fn output_pin(&self) -> PinId {
        PinId::output(self.id)
    }
}

/// Edits reported by the canvas while drawing a node.
///
/// They are applied after the frame is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeEdit {
    /// A parameter widget changed.
    Parameter {
        node: NodeId,
        index: usize,
        value: f64,
    },
    /// The preview toggle was clicked.
    TogglePreview { node: NodeId },
    /// The node was dragged to a new position.
    Moved { node: NodeId, position: Pos2 },
}

/// Interactive graph canvas.
///
/// `H` is the texture handle type used for node previews.
pub trait GraphCanvas<H> {
    /// Starts a frame.
    fn begin(&mut self, context: &EditorContext);

    /// Draws a node and returns the edits the user made on it this frame.
    fn draw_node(&mut self, view: NodeView<'_, H>) -> Vec<NodeEdit>;

    /// Draws a link between two already drawn pins.
    fn draw_link(&mut self, link: &Link);

    // ------------------------------------------------------------------
    // Create phase
    // ------------------------------------------------------------------

    /// Starts the create phase. Returns false if nothing is being created.
    fn begin_create(&mut self) -> bool;

    /// The pin pair the user is currently dragging between, in drag order.
    fn query_new_link(&mut self) -> Option<(PinId, PinId)>;

    /// Returns true once the user confirms the proposed link.
    ///
    /// Only called after the proposal passed validation.
    fn accept_new_item(&mut self) -> bool;

    /// Marks the proposed link as invalid, with a reason for display.
    fn reject_new_item(&mut self, reason: &str);

    fn end_create(&mut self);

    // ------------------------------------------------------------------
    // Delete phase
    // ------------------------------------------------------------------

    /// Starts the delete phase. Returns false if nothing is being deleted.
    fn begin_delete(&mut self) -> bool;

    /// Next link the user asked to delete, if any.
    fn query_deleted_link(&mut self) -> Option<LinkId>;

    /// Next node the user asked to delete, if any.
    fn query_deleted_node(&mut self) -> Option<NodeId>;

    /// Returns true if the queried item should be deleted.
    fn accept_deleted_item(&mut self) -> bool;

    /// Keeps the queried item.
    fn reject_deleted_item(&mut self);

    fn end_delete(&mut self);

    // ------------------------------------------------------------------
    // Menus
    // ------------------------------------------------------------------

    /// Returns true on the frame the user opens the background context menu.
    fn show_background_context_menu(&mut self) -> bool;

    /// Current pointer position in canvas coordinates.
    fn pointer_position(&self) -> Pos2;

    /// Shows the node creation menu if it is open and returns the chosen
    /// kind, if any.
    fn node_creation_menu(&mut self, catalog: &[(NodeRole, Vec<NodeKind>)]) -> Option<NodeKind>;

    /// Finishes the frame.
    fn end(&mut self);
}
