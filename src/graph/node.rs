//! Nodes stored in the graph.

use std::sync::Arc;

use egui::Pos2;

use super::ids::{NodeId, PinId, PinRole};
use crate::error::PreviewError;
use crate::noise::{NodeKind, NoiseMap, NoiseModule, ParameterDefinition};

/// Preview state of a node.
///
/// `H` is the texture handle type of the texture service. The handle is
/// owned here, so dropping the node releases its texture.
pub struct PreviewSlot<H> {
    /// Last successfully uploaded texture.
    pub(crate) handle: Option<H>,
    /// Image size of the texture behind `handle`.
    pub(crate) handle_size: Option<[usize; 2]>,
    /// Field revision and image size of the last upload attempt.
    pub(crate) attempted: Option<(u64, [usize; 2])>,
    /// Error from the last failed upload, cleared by the next success.
    pub(crate) error: Option<PreviewError>,
    /// Whether the canvas shows the preview image.
    pub(crate) visible: bool,
}

impl<H> PreviewSlot<H> {
    fn new() -> Self {
        Self {
            handle: None,
            handle_size: None,
            attempted: None,
            error: None,
            visible: true,
        }
    }

    /// The current texture handle, if any upload has succeeded.
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// The sticky error from the last failed upload.
    pub fn error(&self) -> Option<&PreviewError> {
        self.error.as_ref()
    }

    /// Whether the preview image is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true if the field at `revision` has not been uploaded at
    /// `size` yet. A failed attempt counts as uploaded, so a failing
    /// texture service is retried only once the field or size changes.
    pub(crate) fn needs_upload(&self, revision: u64, size: [usize; 2]) -> bool {
        self.attempted != Some((revision, size))
    }
}

/// A node in the noise graph.
///
/// The kind and the number of input pins are fixed at creation.
pub struct Node<H> {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,
    pub(crate) module: Box<dyn NoiseModule>,
    pub(crate) parameters: Vec<f64>,
    pub(crate) position: Pos2,
    pub(crate) dirty: bool,
    pub(crate) cache: Option<Arc<NoiseMap>>,
    pub(crate) revision: u64,
    pub(crate) preview: PreviewSlot<H>,
}

impl<H> Node<H> {
    /// Creates a dirty node with default parameter values and no cache.
    pub(crate) fn new(id: NodeId, module: Box<dyn NoiseModule>, position: Pos2) -> Self {
        let parameters = module.default_parameters();
        Self {
            id,
            kind: module.kind(),
            module,
            parameters,
            position,
            dirty: true,
            cache: None,
            revision: 0,
            preview: PreviewSlot::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The evaluation strategy for this node's kind.
    pub fn module(&self) -> &dyn NoiseModule {
        self.module.as_ref()
    }

    /// Current parameter values, in definition order.
    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    pub fn parameter_definitions(&self) -> &[ParameterDefinition] {
        self.module.parameters()
    }

    /// Number of input pins.
    pub fn input_count(&self) -> usize {
        self.module.input_names().len()
    }

    /// Labels of the input pins, in slot order.
    pub fn input_names(&self) -> &'static [&'static str] {
        self.module.input_names()
    }

    /// The input pins of this node, in slot order.
    pub fn input_pins(&self) -> impl Iterator<Item = PinId> + '_ {
        (0..self.input_count()).map(move |slot| PinId::input(self.id, slot))
    }

    pub fn output_pin(&self) -> PinId {
        PinId::output(self.id)
    }

    /// Canvas position of the node's top-left corner.
    pub fn position(&self) -> Pos2 {
        self.position
    }

    /// Returns true if the cached field is missing or out of date.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The last evaluated field, possibly stale if the node is dirty.
    pub fn cached(&self) -> Option<&Arc<NoiseMap>> {
        self.cache.as_ref()
    }

    /// Incremented every time the node's field is recomputed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn preview(&self) -> &PreviewSlot<H> {
        &self.preview
    }

    /// Returns true if `pin` belongs to this node and exists on it.
    pub fn has_pin(&self, pin: PinId) -> bool {
        pin.node == self.id
            && match pin.role {
                PinRole::Input => pin.slot < self.input_count(),
                PinRole::Output => pin.slot == 0,
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::ModuleRegistry;

    fn node(kind: NodeKind) -> Node<()> {
        let registry = ModuleRegistry::builtin();
        Node::new(NodeId(1), registry.create(kind).unwrap(), Pos2::new(10.0, 20.0))
    }

    #[test]
    fn test_new_node_is_dirty_with_defaults() {
        let n = node(NodeKind::Perlin);
        assert!(n.is_dirty());
        assert!(n.cached().is_none());
        assert_eq!(n.revision(), 0);
        assert_eq!(n.parameters().len(), n.parameter_definitions().len());
        assert_eq!(n.parameters()[0], 1.0);
        assert_eq!(n.position(), Pos2::new(10.0, 20.0));
        assert!(n.preview().is_visible());
        assert!(n.preview().handle().is_none());
    }

    #[test]
    fn test_input_pins_follow_arity() {
        for kind in [NodeKind::Const, NodeKind::Abs, NodeKind::Add, NodeKind::Select] {
            let n = node(kind);
            assert_eq!(n.input_pins().count(), kind.arity());
            assert_eq!(n.input_count(), kind.arity());
        }
    }

    #[test]
    fn test_has_pin() {
        let n = node(NodeKind::Add);
        assert!(n.has_pin(PinId::input(NodeId(1), 1)));
        assert!(!n.has_pin(PinId::input(NodeId(1), 2)));
        assert!(n.has_pin(PinId::output(NodeId(1))));
        assert!(!n.has_pin(PinId::output(NodeId(2))));
    }

    #[test]
    fn test_needs_upload() {
        let mut slot: PreviewSlot<()> = PreviewSlot::new();
        assert!(slot.needs_upload(1, [8, 8]));
        slot.attempted = Some((1, [8, 8]));
        assert!(!slot.needs_upload(1, [8, 8]));
        assert!(slot.needs_upload(2, [8, 8]));
        assert!(slot.needs_upload(1, [16, 16]));
    }
}
