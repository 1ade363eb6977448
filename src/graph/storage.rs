//! Graph storage for nodes and links.
//!
//! The NoiseGraph owns every node and link, validates structural edits
//! before they are committed and keeps dirty flags up to date. Edits follow
//! a check-then-commit protocol: a proposal is first validated with
//! `check_only = true`, and only a positively checked proposal may be
//! committed with `check_only = false`.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use egui::Pos2;
use log::{debug, info};

use super::evaluator::EvaluationStats;
use super::ids::{Link, LinkId, NodeId, PinId, PinRole};
use super::node::Node;
use super::validation::{LinkRejection, ValidationResult};
use crate::noise::{ModuleRegistry, NodeKind, NoiseMap, SampleWindow};

/// The node graph.
///
/// `H` is the preview texture handle type; each node owns its handle.
///
/// # Invariants
///
/// Between committed edits:
/// - every input pin has at most one incoming link,
/// - the links form no cycle,
/// - every link ends on live nodes and existing slots,
/// - a node is dirty whenever anything it depends on changed since its
///   field was last computed.
///
/// Breaking one of these through misuse (committing an unchecked edit,
/// using the id of a removed node) panics.
pub struct NoiseGraph<H> {
    registry: ModuleRegistry,
    pub(crate) nodes: BTreeMap<NodeId, Node<H>>,
    links: BTreeMap<LinkId, Link>,
    next_node_id: u64,
    next_link_id: u64,
    window: SampleWindow,
    /// Shared constant-zero field for unconnected inputs.
    pub(crate) zero_field: Option<Arc<NoiseMap>>,
    pub(crate) stats: EvaluationStats,
    /// Pin pair that passed the last link check.
    approved_link: Option<(PinId, PinId)>,
    /// Link that passed the last deletion check.
    approved_deletion: Option<LinkId>,
}

impl<H> NoiseGraph<H> {
    /// Creates an empty graph sampling fields over `window`.
    pub fn new(window: SampleWindow) -> Self {
        Self::with_registry(window, ModuleRegistry::builtin())
    }

    /// Creates an empty graph using a custom module registry.
    pub fn with_registry(window: SampleWindow, registry: ModuleRegistry) -> Self {
        Self {
            registry,
            nodes: BTreeMap::new(),
            links: BTreeMap::new(),
            next_node_id: 1,
            next_link_id: 1,
            window,
            zero_field: None,
            stats: EvaluationStats::default(),
            approved_link: None,
            approved_deletion: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// The window every field in the graph is sampled over.
    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn contains_link(&self, id: LinkId) -> bool {
        self.links.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<H>> {
        self.nodes.get(&id)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&id)
    }

    /// All nodes, in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<H>> {
        self.nodes.values()
    }

    /// All links, in id order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// The link into an input pin, if connected.
    pub fn link_into(&self, pin: PinId) -> Option<&Link> {
        self.links.values().find(|link| link.dest == pin)
    }

    /// All links leaving `node`'s output.
    pub fn links_from(&self, node: NodeId) -> impl Iterator<Item = &Link> {
        self.links
            .values()
            .filter(move |link| link.source.node == node)
    }

    /// Evaluation counters.
    pub fn stats(&self) -> &EvaluationStats {
        &self.stats
    }

    pub(crate) fn node_or_panic(&self, id: NodeId) -> &Node<H> {
        match self.nodes.get(&id) {
            Some(node) => node,
            None => panic!("Unknown or destroyed node {}", id),
        }
    }

    pub(crate) fn node_mut_or_panic(&mut self, id: NodeId) -> &mut Node<H> {
        match self.nodes.get_mut(&id) {
            Some(node) => node,
            None => panic!("Unknown or destroyed node {}", id),
        }
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Adds a node of `kind` at `position` with default parameters.
    ///
    /// The node starts dirty and without a cached field.
    pub fn add_node(&mut self, kind: NodeKind, position: Pos2) -> NodeId {
        let module = match self.registry.create(kind) {
            Some(module) => module,
            None => panic!("No module registered for {}", kind.module_id()),
        };

        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.insert(id, Node::new(id, module, position));
        self.clear_approvals();

        info!("Added {} node {}", kind.name(), id);
        id
    }

    /// Removes a node and every link touching it.
    ///
    /// Nodes downstream of the removed node lose an input and become dirty.
    /// The node's preview handle is dropped with it.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a live node.
    pub fn remove_node(&mut self, id: NodeId) {
        let kind = self.node_or_panic(id).kind();

        for downstream in self.descendants(id) {
            if let Some(node) = self.nodes.get_mut(&downstream) {
                node.dirty = true;
            }
        }

        let before = self.links.len();
        self.links.retain(|_, link| !link.touches(id));
        let removed_links = before - self.links.len();

        self.nodes.remove(&id);
        self.clear_approvals();

        info!(
            "Removed {} node {} and {} link(s)",
            kind.name(),
            id,
            removed_links
        );
    }

    /// Sets parameter `index` of node `id`, clamped to its definition.
    ///
    /// Returns false if the index is out of range, the value is NaN or
    /// infinite, or the stored value did not change. Otherwise the node and everything downstream become dirty.
    pub fn set_parameter(&mut self, id: NodeId, index: usize, value: f64) -> bool {
        let node = self.node_mut_or_panic(id);
        let Some(definition) = node.parameter_definitions().get(index) else {
            debug!("{} has no parameter {}", id, index);
            return false;
        };

        if !value.is_finite() {
            debug!("Ignoring non-finite value {} for {} parameter {}", value, id, index);
            return false;
        }

        let value = definition.clamp(value);
        if node.parameters[index] == value {
            return false;
        }
        node.parameters[index] = value;
        self.mark_dirty_from(id);
        true
    }

    /// Moves a node on the canvas. Does not affect evaluation.
    pub fn set_position(&mut self, id: NodeId, position: Pos2) {
        self.node_mut_or_panic(id).position = position;
    }

    /// Shows or hides a node's preview image.
    pub fn set_preview_visible(&mut self, id: NodeId, visible: bool) {
        self.node_mut_or_panic(id).preview.visible = visible;
    }

    /// Changes the sample window, dirtying every node.
    pub fn set_sample_window(&mut self, window: SampleWindow) {
        if self.window == window {
            return;
        }
        self.window = window;
        self.zero_field = None;
        for node in self.nodes.values_mut() {
            node.dirty = true;
        }
        debug!("Sample window changed to {:?}", window);
    }

    // ========================================================================
    // Links
    // ========================================================================

    /// Checks whether a link from `source` to `dest` may be created.
    ///
    /// Rules, in order: `source` must be an output and `dest` an input;
    /// `dest` must be an existing slot; `dest` must be free; the link must not
    /// close a cycle.
    ///
    /// # Panics
    ///
    /// Panics if either pin names a node that is not in the graph.
    pub fn validate_link(&self, source: PinId, dest: PinId) -> ValidationResult {
        let source_node = self.node_or_panic(source.node);
        let dest_node = self.node_or_panic(dest.node);

        if source.role != PinRole::Output || dest.role != PinRole::Input {
            return ValidationResult::Invalid(LinkRejection::WrongPinRoles);
        }
        if !source_node.has_pin(source) {
            return ValidationResult::Invalid(LinkRejection::WrongPinRoles);
        }
        if !dest_node.has_pin(dest) {
            return ValidationResult::Invalid(LinkRejection::NoSuchInput);
        }
        if self.link_into(dest).is_some() {
            return ValidationResult::Invalid(LinkRejection::InputOccupied);
        }
        if self.is_reachable(dest.node, source.node) {
            return ValidationResult::Invalid(LinkRejection::WouldCreateCycle);
        }
        ValidationResult::Valid
    }

    /// Validates or commits a link from `source` to `dest`.
    ///
    /// With `check_only` the link is validated and, if valid, remembered as
    /// approved. Without it, the approved link is inserted, its destination
    /// and everything downstream become dirty, and true is returned.
    ///
    /// # Panics
    ///
    /// Panics when committing a pin pair that did not pass the preceding
    /// check.
    pub fn query_link(&mut self, source: PinId, dest: PinId, check_only: bool) -> bool {
        if check_only {
            return match self.validate_link(source, dest) {
                ValidationResult::Valid => {
                    self.approved_link = Some((source, dest));
                    true
                }
                ValidationResult::Invalid(reason) => {
                    self.approved_link = None;
                    debug!("Rejected link {} -> {}: {}", source, dest, reason);
                    false
                }
            };
        }

        if self.approved_link != Some((source, dest)) {
            panic!(
                "Link {} -> {} committed without a successful check",
                source, dest
            );
        }

        let id = LinkId(self.next_link_id);
        self.next_link_id += 1;
        self.links.insert(id, Link { id, source, dest });
        self.clear_approvals();
        self.mark_dirty_from(dest.node);

        debug!("Created {}: {} -> {}", id, source, dest);
        true
    }

    /// Validates or commits the deletion of link `id`.
    ///
    /// With `check_only` the link must exist; a positive check is remembered.
    /// Without it, the approved link is removed and its former destination
    /// and everything downstream become dirty.
    ///
    /// # Panics
    ///
    /// Panics when committing a deletion that did not pass the preceding
    /// check.
    pub fn delete_link(&mut self, id: LinkId, check_only: bool) -> bool {
        if check_only {
            return if self.links.contains_key(&id) {
                self.approved_deletion = Some(id);
                true
            } else {
                self.approved_deletion = None;
                debug!("Rejected deletion of unknown {}", id);
                false
            };
        }

        if self.approved_deletion != Some(id) {
            panic!("Deletion of {} committed without a successful check", id);
        }
        let Some(link) = self.links.remove(&id) else {
            panic!("Approved {} vanished before commit", id);
        };
        self.clear_approvals();
        self.mark_dirty_from(link.dest.node);

        debug!("Deleted {}: {} -> {}", id, link.source, link.dest);
        true
    }

    fn clear_approvals(&mut self) {
        self.approved_link = None;
        self.approved_deletion = None;
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Nodes fed directly by each node's output.
    fn successors(&self) -> BTreeMap<NodeId, Vec<NodeId>> {
        let mut successors: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for link in self.links.values() {
            successors
                .entry(link.source.node)
                .or_default()
                .push(link.dest.node);
        }
        successors
    }

    /// Returns true if `to` can be reached from `from` by following links
    /// downstream. A node reaches itself.
    pub fn is_reachable(&self, from: NodeId, to: NodeId) -> bool {
        from == to || self.descendants(from).contains(&to)
    }

    /// Every node strictly downstream of `id`.
    pub fn descendants(&self, id: NodeId) -> BTreeSet<NodeId> {
        let successors = self.successors();
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            for &next in successors.get(&current).into_iter().flatten() {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        visited.remove(&id);
        visited
    }

    /// Marks `id` and every node downstream of it dirty.
    fn mark_dirty_from(&mut self, id: NodeId) {
        let downstream = self.descendants(id);
        for node_id in std::iter::once(id).chain(downstream) {
            if let Some(node) = self.nodes.get_mut(&node_id) {
                node.dirty = true;
            }
        }
    }

    /// Checks if the links contain a cycle.
    pub fn has_cycle(&self) -> bool {
        // Kahn's algorithm leaves nodes on a cycle unsorted
        self.topological_order().len() != self.nodes.len()
    }

    /// Computes a topological order of all nodes using Kahn's algorithm.
    ///
    /// Ties are broken by ascending node id.
    pub fn topological_order(&self) -> Vec<NodeId> {
        let mut in_degree: BTreeMap<NodeId, usize> =
            self.nodes.keys().map(|&id| (id, 0)).collect();

        for link in self.links.values() {
            if let Some(degree) = in_degree.get_mut(&link.dest.node) {
                *degree += 1;
            }
        }

        // Ready nodes, kept sorted in descending order so pop() yields the smallest id
        let mut queue: Vec<NodeId> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&id, _)| id)
            .rev()
            .collect();

        let mut result = Vec::with_capacity(self.nodes.len());

        while let Some(id) = queue.pop() {
            result.push(id);

            for link in self.links_from(id) {
                if let Some(degree) = in_degree.get_mut(&link.dest.node) {
                    *degree -= 1;
                    if *degree == 0 {
                        let pos = queue
                            .binary_search_by(|node| link.dest.node.cmp(node))
                            .unwrap_or_else(|p| p);
                        queue.insert(pos, link.dest.node);
                    }
                }
            }
        }

        result
    }
}

impl<H> Default for NoiseGraph<H> {
    fn default() -> Self {
        Self::new(SampleWindow::default())
    }
}
