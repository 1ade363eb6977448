//! Interactive canvas for the noise graph, built on egui_node_graph2.
//!
//! The widget keeps its own copy of the graph. Every frame the copy is
//! brought in line with the editor's graph, drawn, and the widget's
//! responses are turned into the create and delete phases of
//! [`GraphCanvas`]. The editor's graph stays authoritative: a connection
//! the editor rejects disappears from the widget on the next frame.

mod data_types;
mod node_data;
mod state;
mod templates;

use std::collections::{HashMap, HashSet, VecDeque};

use eframe::egui::{Align2, FontId, Pos2, Rect, TextureHandle, Ui, Vec2};
use egui_node_graph2::{InputId, NodeId as GraphNodeId, NodeResponse, OutputId};
use log::debug;

pub use data_types::{FieldInput, FieldType};
pub use node_data::{NoiseNodeData, NoiseResponse};
pub use state::{create_editor_state, NoiseGraphEditorState, NoiseGraphModel, NoiseGraphState};
pub use templates::{AllNoiseTemplates, NoiseNodeTemplate};

use super::theme;
use crate::editor::{EditorContext, GraphCanvas, NodeEdit, NodeView};
use crate::graph::{Link, LinkId, NodeId, PinId};
use crate::noise::{NodeKind, NodeRole};

type NoiseNodeResponse = NodeResponse<NoiseResponse, NoiseNodeData>;

fn edit_target(edit: &NodeEdit) -> NodeId {
    match edit {
        NodeEdit::Parameter { node, .. }
        | NodeEdit::TogglePreview { node }
        | NodeEdit::Moved { node, .. } => *node,
    }
}

// ============================================================================
// State
// ============================================================================

/// Canvas state that survives between frames.
pub struct CanvasState {
    editor_state: NoiseGraphEditorState,
    user_state: NoiseGraphState,
    /// Widget node standing in for each graph node.
    mirrors: HashMap<NodeId, GraphNodeId>,
    owners: HashMap<GraphNodeId, NodeId>,
    /// Links dropped on an input, oldest first.
    proposals: VecDeque<(PinId, PinId)>,
    deleted_links: VecDeque<LinkId>,
    deleted_nodes: VecDeque<NodeId>,
    /// Node edits waiting to be handed out by the next `draw_node`.
    edits: Vec<NodeEdit>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            editor_state: create_editor_state(),
            user_state: NoiseGraphState::new(),
            mirrors: HashMap::new(),
            owners: HashMap::new(),
            proposals: VecDeque::new(),
            deleted_links: VecDeque::new(),
            deleted_nodes: VecDeque::new(),
            edits: Vec::new(),
        }
    }
}

impl CanvasState {
    pub fn selected_node(&self) -> Option<NodeId> {
        self.user_state
            .selected_node
            .and_then(|mirror| self.owners.get(&mirror).copied())
    }

    /// True while the user drags a new link.
    pub fn is_connecting(&self) -> bool {
        self.editor_state.connection_in_progress.is_some()
    }

    fn graph(&self) -> &NoiseGraphModel {
        &self.editor_state.graph
    }

    fn input_pin(&self, input: InputId) -> Option<PinId> {
        let mirror = self.graph().inputs.get(input)?.node;
        let node = *self.owners.get(&mirror)?;
        let slot = self
            .graph()
            .nodes
            .get(mirror)?
            .inputs
            .iter()
            .position(|(_, id)| *id == input)?;
        Some(PinId::input(node, slot))
    }

    fn output_pin(&self, output: OutputId) -> Option<PinId> {
        let mirror = self.graph().outputs.get(output)?.node;
        self.owners.get(&mirror).map(|node| PinId::output(*node))
    }

    fn mirror_input(&self, pin: PinId) -> Option<InputId> {
        let mirror = self.mirrors.get(&pin.node)?;
        let node = self.graph().nodes.get(*mirror)?;
        node.inputs.get(pin.slot).map(|(_, id)| *id)
    }

    fn mirror_output(&self, node: NodeId) -> Option<OutputId> {
        let mirror = self.mirrors.get(&node)?;
        let node = self.graph().nodes.get(*mirror)?;
        node.outputs.first().map(|(_, id)| *id)
    }

    /// Adds a widget node for `view`, placed where the graph node is.
    fn add_mirror(&mut self, view: &NodeView<'_, TextureHandle>) -> GraphNodeId {
        let input_names = view.input_names;
        let mirror = self.editor_state.graph.add_node(
            view.kind.name().to_string(),
            NoiseNodeData::new(view.kind),
            |graph, id| templates::add_pins(graph, id, input_names),
        );
        self.editor_state.node_order.push(mirror);
        self.editor_state.node_positions.insert(mirror, view.position);
        self.mirrors.insert(view.id, mirror);
        self.owners.insert(mirror, view.id);
        mirror
    }

    /// Drops a widget node and everything the widget remembers about it.
    fn remove_mirror(&mut self, mirror: GraphNodeId) {
        let editor_state = &mut self.editor_state;
        if editor_state.graph.nodes.contains_key(mirror) {
            editor_state.graph.remove_node(mirror);
        }
        editor_state.node_order.retain(|id| *id != mirror);
        editor_state.node_positions.remove(mirror);
        editor_state.selected_nodes.retain(|id| *id != mirror);
        if self.user_state.selected_node == Some(mirror) {
            self.user_state.selected_node = None;
        }
        if let Some(node) = self.owners.remove(&mirror) {
            self.mirrors.remove(&node);
        }
    }

    /// Removes widget nodes whose graph node was not drawn this frame and
    /// makes the widget's connections match `links`.
    fn sync(&mut self, drawn: &HashSet<NodeId>, links: &[Link]) {
        let stale: Vec<GraphNodeId> = self
            .mirrors
            .iter()
            .filter(|(node, _)| !drawn.contains(*node))
            .map(|(_, mirror)| *mirror)
            .collect();
        for mirror in stale {
            self.remove_mirror(mirror);
        }
        self.edits.retain(|edit| drawn.contains(&edit_target(edit)));

        let wanted: HashSet<(InputId, OutputId)> = links
            .iter()
            .filter_map(|link| {
                Some((
                    self.mirror_input(link.dest)?,
                    self.mirror_output(link.source.node)?,
                ))
            })
            .collect();
        let present: HashSet<(InputId, OutputId)> = self.graph().iter_connections().collect();

        let graph = &mut self.editor_state.graph;
        for (input, output) in present.difference(&wanted) {
            graph.remove_connection(*input, *output);
        }
        for (input, output) in wanted.difference(&present) {
            graph.add_connection(*output, *input, 0);
        }
    }

    /// Turns widget responses into pending gestures.
    ///
    /// Returns the kind picked in the node finder, if any. The widget node
    /// it created is discarded; the editor adds the real one.
    fn record_responses(
        &mut self,
        responses: Vec<NoiseNodeResponse>,
        links: &[Link],
    ) -> Option<NodeKind> {
        let mut created = None;

        for response in responses {
            match response {
                NodeResponse::ConnectEventEnded { output, input, .. } => {
                    if let (Some(source), Some(dest)) =
                        (self.output_pin(output), self.input_pin(input))
                    {
                        self.proposals.push_back((source, dest));
                    }
                }
                NodeResponse::DisconnectEvent { input, .. } => {
                    let Some(dest) = self.input_pin(input) else {
                        continue;
                    };
                    if let Some(link) = links.iter().find(|link| link.dest == dest) {
                        self.deleted_links.push_back(link.id);
                    }
                }
                NodeResponse::DeleteNodeFull { node_id, .. } => {
                    if let Some(node) = self.owners.get(&node_id).copied() {
                        self.deleted_nodes.push_back(node);
                    }
                }
                NodeResponse::CreatedNode(mirror) => {
                    created = self.graph().nodes.get(mirror).map(|n| n.user_data.kind);
                    self.remove_mirror(mirror);
                }
                NodeResponse::SelectNode(mirror) => {
                    self.user_state.selected_node = Some(mirror);
                }
                NodeResponse::User(NoiseResponse::ParameterChanged {
                    node_id,
                    index,
                    value,
                }) => {
                    if let Some(node) = self.owners.get(&node_id).copied() {
                        self.edits.push(NodeEdit::Parameter { node, index, value });
                    }
                }
                NodeResponse::User(NoiseResponse::TogglePreview(node_id)) => {
                    if let Some(node) = self.owners.get(&node_id).copied() {
                        self.edits.push(NodeEdit::TogglePreview { node });
                    }
                }
                _ => {}
            }
        }

        created
    }

    /// Reports widget nodes the user dragged away from their graph position.
    fn record_moves(&mut self, positions: &HashMap<NodeId, Pos2>) {
        for (node, position) in positions {
            let Some(mirror) = self.mirrors.get(node) else {
                continue;
            };
            if let Some(moved) = self.editor_state.node_positions.get(*mirror) {
                if moved != position {
                    self.edits.push(NodeEdit::Moved {
                        node: *node,
                        position: *moved,
                    });
                }
            }
        }
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// One frame of the canvas, borrowing the panel it draws into.
pub struct EguiCanvas<'a> {
    ui: &'a mut Ui,
    state: &'a mut CanvasState,
    rect: Rect,
    /// Graph nodes drawn this frame, with their stored positions.
    drawn: HashMap<NodeId, Pos2>,
    links: Vec<Link>,
    shown: bool,
    finder_opened: bool,
    pointer: Option<Pos2>,
    created: Option<NodeKind>,
}

impl<'a> EguiCanvas<'a> {
    /// Prepares a canvas filling the remaining space of `ui`.
    pub fn new(ui: &'a mut Ui, state: &'a mut CanvasState) -> Self {
        let rect = ui.available_rect_before_wrap();
        Self {
            ui,
            state,
            rect,
            drawn: HashMap::new(),
            links: Vec::new(),
            shown: false,
            finder_opened: false,
            pointer: None,
            created: None,
        }
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.rect.min - self.state.editor_state.pan_zoom.pan).to_pos2()
    }

    /// Syncs and draws the widget once per frame, after all nodes and links
    /// were handed over.
    fn show_graph(&mut self) {
        if self.shown {
            return;
        }
        self.shown = true;

        let drawn: HashSet<NodeId> = self.drawn.keys().copied().collect();
        self.state.sync(&drawn, &self.links);

        let finder_was_open = self.state.editor_state.node_finder.is_some();
        let state = &mut *self.state;
        let response = state.editor_state.draw_graph_editor(
            self.ui,
            AllNoiseTemplates,
            &mut state.user_state,
            Vec::new(),
        );

        self.finder_opened = !finder_was_open && state.editor_state.node_finder.is_some();
        if self.finder_opened {
            self.pointer = self.ui.input(|i| i.pointer.interact_pos());
        }

        self.created = self
            .state
            .record_responses(response.node_responses, &self.links);
        self.state.record_moves(&self.drawn);
    }
}

impl GraphCanvas<TextureHandle> for EguiCanvas<'_> {
    fn begin(&mut self, _context: &EditorContext) {
        self.pointer = self.ui.input(|i| i.pointer.hover_pos());
        theme::draw_grid_background(
            self.ui.painter(),
            self.rect,
            self.state.editor_state.pan_zoom.pan,
        );
    }

    fn draw_node(&mut self, view: NodeView<'_, TextureHandle>) -> Vec<NodeEdit> {
        let mirror = match self.state.mirrors.get(&view.id) {
            Some(mirror) => *mirror,
            None => self.state.add_mirror(&view),
        };
        if let Some(node) = self.state.editor_state.graph.nodes.get_mut(mirror) {
            let data = &mut node.user_data;
            data.parameters = view.parameters.to_vec();
            data.values = view.values.to_vec();
            data.preview = view.preview.map(TextureHandle::id);
            data.preview_visible = view.preview_visible;
            data.preview_error = view.preview_error.map(ToString::to_string);
            data.dirty = view.dirty;
        }
        self.drawn.insert(view.id, view.position);

        let (mine, rest): (Vec<NodeEdit>, Vec<NodeEdit>) = std::mem::take(&mut self.state.edits)
            .into_iter()
            .partition(|edit| edit_target(edit) == view.id);
        self.state.edits = rest;
        mine
    }

    fn draw_link(&mut self, link: &Link) {
        self.links.push(*link);
    }

    fn begin_create(&mut self) -> bool {
        self.show_graph();
        !self.state.proposals.is_empty()
    }

    fn query_new_link(&mut self) -> Option<(PinId, PinId)> {
        self.state.proposals.pop_front()
    }

    fn accept_new_item(&mut self) -> bool {
        // The link was already dropped on its pin
        self.state.user_state.clear_validation_message();
        true
    }

    fn reject_new_item(&mut self, reason: &str) {
        debug!("Link rejected: {}", reason);
        self.state.user_state.set_validation_error(reason);
    }

    fn end_create(&mut self) {}

    fn begin_delete(&mut self) -> bool {
        self.show_graph();
        !self.state.deleted_links.is_empty() || !self.state.deleted_nodes.is_empty()
    }

    fn query_deleted_link(&mut self) -> Option<LinkId> {
        self.state.deleted_links.pop_front()
    }

    fn query_deleted_node(&mut self) -> Option<NodeId> {
        self.state.deleted_nodes.pop_front()
    }

    fn accept_deleted_item(&mut self) -> bool {
        true
    }

    // A kept link or node reappears on the next sync
    fn reject_deleted_item(&mut self) {}

    fn end_delete(&mut self) {}

    fn show_background_context_menu(&mut self) -> bool {
        self.show_graph();
        self.finder_opened
    }

    fn pointer_position(&self) -> Pos2 {
        self.to_canvas(self.pointer.unwrap_or_else(|| self.rect.center()))
    }

    fn node_creation_menu(&mut self, catalog: &[(NodeRole, Vec<NodeKind>)]) -> Option<NodeKind> {
        self.show_graph();
        let kind = self.created.take()?;
        catalog
            .iter()
            .any(|(_, kinds)| kinds.contains(&kind))
            .then_some(kind)
    }

    fn end(&mut self) {
        self.show_graph();
        let anchor = self.rect.left_bottom() + Vec2::new(12.0, -12.0);
        if let Some(message) = self.state.user_state.validation_message() {
            self.ui.painter().text(
                anchor,
                Align2::LEFT_BOTTOM,
                message,
                FontId::proportional(12.0),
                theme::accent::ERROR,
            );
        }
    }
}
