//! The node editor controller.
//!
//! The controller owns the graph and the texture service, drives the canvas
//! once per frame and turns the gestures it reports into validated graph
//! edits.

use egui::Pos2;
use log::{debug, warn};

use super::canvas::{EditorContext, GraphCanvas, NodeEdit, NodeView};
use crate::error::PreviewError;
use crate::graph::{LinkId, Node, NodeId, NoiseGraph, PinId};
use crate::noise::{NodeKind, NodeRole, SampleWindow};
use crate::preview::{ColorGradient, TextureService};

/// Interactive editor for one noise graph.
pub struct NodeEditor<S: TextureService> {
    graph: NoiseGraph<S::Handle>,
    textures: S,
    gradient: ColorGradient,
    context: EditorContext,
    /// Creation menu entries, grouped by role.
    catalog: Vec<(NodeRole, Vec<NodeKind>)>,
}

impl<S: TextureService> NodeEditor<S> {
    /// Creates an empty editor with the default sample window and terrain
    /// gradient.
    pub fn new(name: impl Into<String>, textures: S) -> Self {
        Self::with_settings(
            name,
            textures,
            SampleWindow::default(),
            ColorGradient::default(),
        )
    }

    /// Creates an empty editor with an explicit sample window and gradient.
    pub fn with_settings(
        name: impl Into<String>,
        textures: S,
        window: SampleWindow,
        gradient: ColorGradient,
    ) -> Self {
        let graph = NoiseGraph::new(window);
        let catalog = graph.registry().catalog();
        Self {
            graph,
            textures,
            gradient,
            context: EditorContext::new(name),
            catalog,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn graph(&self) -> &NoiseGraph<S::Handle> {
        &self.graph
    }

    pub fn textures(&self) -> &S {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut S {
        &mut self.textures
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn gradient(&self) -> &ColorGradient {
        &self.gradient
    }

    /// Node kinds offered by the creation menu.
    pub fn catalog(&self) -> &[(NodeRole, Vec<NodeKind>)] {
        &self.catalog
    }

    /// Replaces the preview gradient. Every preview is re-rendered on its
    /// next request.
    pub fn set_gradient(&mut self, gradient: ColorGradient) {
        self.gradient = gradient;
        let ids: Vec<NodeId> = self.graph.nodes().map(Node::id).collect();
        for id in ids {
            self.graph.node_mut_or_panic(id).preview.attempted = None;
        }
    }

    /// Changes the bounds or resolution every field is sampled at.
    pub fn set_sample_window(&mut self, window: SampleWindow) {
        self.graph.set_sample_window(window);
    }

    // ========================================================================
    // Graph edits
    // ========================================================================

    pub fn add_node(&mut self, kind: NodeKind, position: Pos2) -> NodeId {
        self.graph.add_node(kind, position)
    }

    /// Removes a node, its links and its preview texture.
    pub fn remove_node(&mut self, id: NodeId) {
        self.graph.remove_node(id);
    }

    /// See [`NoiseGraph::query_link`].
    pub fn query_link(&mut self, source: PinId, dest: PinId, check_only: bool) -> bool {
        self.graph.query_link(source, dest, check_only)
    }

    /// See [`NoiseGraph::delete_link`].
    pub fn delete_link(&mut self, id: LinkId, check_only: bool) -> bool {
        self.graph.delete_link(id, check_only)
    }

    pub fn set_parameter(&mut self, id: NodeId, index: usize, value: f64) -> bool {
        self.graph.set_parameter(id, index, value)
    }

    // ========================================================================
    // Previews
    // ========================================================================

    /// Error from the last failed preview upload of `id`, if it has not
    /// succeeded since.
    pub fn preview_error(&self, id: NodeId) -> Option<&PreviewError> {
        self.graph.node(id).and_then(|node| node.preview().error())
    }

    /// Returns the preview texture of node `id`, evaluating the node and
    /// uploading a new image first if its field changed.
    ///
    /// A new texture is created when the node has none or the image size
    /// changed; otherwise the existing one is updated in place. When the
    /// texture service fails, the error is kept on the node, logged, and
    /// the previous texture (if any) stays in use.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a live node.
    pub fn get_preview(&mut self, id: NodeId) -> Option<&S::Handle> {
        let field = self.graph.evaluate(id);
        let revision = self.graph.node_or_panic(id).revision();
        let size = field.size();

        if self.graph.node_or_panic(id).preview.needs_upload(revision, size) {
            let image = self.gradient.render(&field);
            let name = format!("{}/{}", self.context.name, id);
            let slot = &mut self.graph.node_mut_or_panic(id).preview;

            let result = match slot.handle.take() {
                Some(mut handle) if slot.handle_size == Some(size) => {
                    let result = self
                        .textures
                        .update(&mut handle, image)
                        .map_err(PreviewError::Update);
                    slot.handle = Some(handle);
                    result
                }
                previous => match self.textures.create(&name, image) {
                    Ok(handle) => {
                        slot.handle = Some(handle);
                        slot.handle_size = Some(size);
                        Ok(())
                    }
                    Err(err) => {
                        slot.handle = previous;
                        Err(PreviewError::Create(err))
                    }
                },
            };

            slot.attempted = Some((revision, size));
            match result {
                Ok(()) => slot.error = None,
                Err(err) => {
                    warn!("Preview of {} not updated: {}", id, err);
                    slot.error = Some(err);
                }
            }
        }

        self.graph.node(id).and_then(|node| node.preview().handle())
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Draws the graph on `canvas` and applies the edits the user made.
    pub fn draw<C: GraphCanvas<S::Handle>>(&mut self, canvas: &mut C) {
        canvas.begin(&self.context);

        let mut edits = Vec::new();
        let ids: Vec<NodeId> = self.graph.nodes().map(Node::id).collect();
        for id in ids {
            if self.graph.node_or_panic(id).preview().is_visible() {
                self.get_preview(id);
            }

            let node = self.graph.node_or_panic(id);
            let preview = node.preview();
            edits.extend(canvas.draw_node(NodeView {
                id,
                kind: node.kind(),
                position: node.position(),
                input_names: node.input_names(),
                parameters: node.parameter_definitions(),
                values: node.parameters(),
                preview: preview.handle(),
                preview_visible: preview.is_visible(),
                preview_error: preview.error(),
                dirty: node.is_dirty(),
            }));
        }

        for link in self.graph.links() {
            canvas.draw_link(link);
        }

        self.handle_create(canvas);
        self.handle_delete(canvas);

        if canvas.show_background_context_menu() {
            self.context.pending_placement = Some(canvas.pointer_position());
        }
        if let Some(kind) = canvas.node_creation_menu(&self.catalog) {
            let position = self
                .context
                .pending_placement
                .take()
                .unwrap_or_else(|| canvas.pointer_position());
            self.add_node(kind, position);
        }

        canvas.end();

        self.apply_edits(edits);
    }

    /// Validates the link the user is dragging and commits it once accepted.
    fn handle_create<C: GraphCanvas<S::Handle>>(&mut self, canvas: &mut C) {
        if !canvas.begin_create() {
            return;
        }

        if let Some((first, second)) = canvas.query_new_link() {
            // Dragging may start from either end
            let (source, dest) = if first.is_input() && second.is_output() {
                (second, first)
            } else {
                (first, second)
            };

            if !self.graph.contains_node(source.node) || !self.graph.contains_node(dest.node) {
                debug!("Ignoring link proposal on a removed node");
                canvas.reject_new_item("Pin no longer exists");
            } else if !self.graph.query_link(source, dest, true) {
                let reason = self
                    .graph
                    .validate_link(source, dest)
                    .error_message()
                    .unwrap_or_default();
                canvas.reject_new_item(reason);
            } else if canvas.accept_new_item() {
                self.graph.query_link(source, dest, false);
            }
        }

        canvas.end_create();
    }

    /// Deletes the links and nodes the user asked to delete.
    fn handle_delete<C: GraphCanvas<S::Handle>>(&mut self, canvas: &mut C) {
        if !canvas.begin_delete() {
            return;
        }

        while let Some(link) = canvas.query_deleted_link() {
            if !self.graph.delete_link(link, true) {
                canvas.reject_deleted_item();
            } else if canvas.accept_deleted_item() {
                self.graph.delete_link(link, false);
            }
        }

        while let Some(node) = canvas.query_deleted_node() {
            if !self.graph.contains_node(node) {
                canvas.reject_deleted_item();
            } else if canvas.accept_deleted_item() {
                self.remove_node(node);
            }
        }

        canvas.end_delete();
    }

    fn apply_edits(&mut self, edits: Vec<NodeEdit>) {
        for edit in edits {
            match edit {
                NodeEdit::Parameter { node, index, value } => {
                    if self.graph.contains_node(node) {
                        self.graph.set_parameter(node, index, value);
                    }
                }
                NodeEdit::TogglePreview { node } => {
                    if let Some(visible) = self.graph.node(node).map(|n| n.preview().is_visible())
                    {
                        self.graph.set_preview_visible(node, !visible);
                    }
                }
                NodeEdit::Moved { node, position } => {
                    if self.graph.contains_node(node) {
                        self.graph.set_position(node, position);
                    }
                }
            }
        }
    }
}
