//! Pull-based lazy evaluation of node fields.
//!
//! Evaluating a node evaluates whatever upstream nodes it needs, reusing
//! every cached field whose node is not dirty. Dirty propagation on commit
//! guarantees that a clean node has only clean ancestors, so a clean cache
//! can be returned without looking upstream.

use std::sync::Arc;

use super::ids::{NodeId, PinId};
use super::storage::NoiseGraph;
use crate::noise::NoiseMap;

/// Counters describing the work done by the evaluator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvaluationStats {
    /// Total number of field computations since the graph was created.
    pub evaluations: u64,
    /// Nodes recomputed by the most recent top-level `evaluate`, in the
    /// order they were computed.
    pub last_order: Vec<NodeId>,
}

impl<H> NoiseGraph<H> {
    /// Returns the field of node `id`, recomputing it and any dirty
    /// ancestors if needed.
    ///
    /// Unconnected inputs read a shared constant-zero field. Each
    /// recomputation caches the result, clears the node's dirty flag and
    /// bumps its revision.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a live node.
    pub fn evaluate(&mut self, id: NodeId) -> Arc<NoiseMap> {
        self.node_or_panic(id);
        self.stats.last_order.clear();
        self.evaluate_node(id)
    }

    fn evaluate_node(&mut self, id: NodeId) -> Arc<NoiseMap> {
        let node = self.node_or_panic(id);
        if !node.dirty {
            if let Some(cache) = &node.cache {
                return Arc::clone(cache);
            }
        }

        // Upstream fields in pin-index order
        let mut inputs = Vec::with_capacity(node.input_count());
        for slot in 0..node.input_count() {
            let source = self
                .link_into(PinId::input(id, slot))
                .map(|link| link.source.node);
            let field = match source {
                Some(source) => self.evaluate_node(source),
                None => self.zero_field(),
            };
            inputs.push(field);
        }

        let window = *self.window();
        let node = self.node_mut_or_panic(id);
        let refs: Vec<&NoiseMap> = inputs.iter().map(Arc::as_ref).collect();
        let field = Arc::new(node.module.evaluate(&refs, &node.parameters, &window));

        node.cache = Some(Arc::clone(&field));
        node.dirty = false;
        node.revision += 1;

        self.stats.evaluations += 1;
        self.stats.last_order.push(id);
        field
    }

    fn zero_field(&mut self) -> Arc<NoiseMap> {
        let window = *self.window();
        Arc::clone(
            self.zero_field
                .get_or_insert_with(|| Arc::new(NoiseMap::zeros(&window))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{NodeKind, SampleWindow};
    use egui::Pos2;

    type Graph = NoiseGraph<()>;

    fn graph() -> Graph {
        NoiseGraph::new(SampleWindow::default().with_size(8, 8))
    }

    fn link(graph: &mut Graph, from: NodeId, to: NodeId, slot: usize) {
        let (src, dst) = (PinId::output(from), PinId::input(to, slot));
        assert!(graph.query_link(src, dst, true));
        assert!(graph.query_link(src, dst, false));
    }

    fn constant(graph: &mut Graph, value: f64) -> NodeId {
        let id = graph.add_node(NodeKind::Const, Pos2::ZERO);
        graph.set_parameter(id, 0, value);
        id
    }

    #[test]
    fn test_evaluate_generator() {
        let mut g = graph();
        let c = constant(&mut g, 0.5);
        let field = g.evaluate(c);
        assert_eq!(field.size(), [8, 8]);
        assert!(field.values().iter().all(|&v| v == 0.5));

        let node = g.node(c).unwrap();
        assert!(!node.is_dirty());
        assert_eq!(node.revision(), 1);
        assert!(node.cached().is_some());
    }

    #[test]
    fn test_unconnected_inputs_read_zero() {
        let mut g = graph();
        let bias = g.add_node(NodeKind::ScaleBias, Pos2::ZERO);
        g.set_parameter(bias, 1, 0.25);
        let field = g.evaluate(bias);
        assert!(field.values().iter().all(|&v| v == 0.25));

        let add = g.add_node(NodeKind::Add, Pos2::ZERO);
        let field = g.evaluate(add);
        assert!(field.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_unconnected_inputs_share_one_zero_field() {
        let mut g = graph();
        let a = g.add_node(NodeKind::Add, Pos2::ZERO);
        g.evaluate(a);
        let zero = g.zero_field.clone().unwrap();
        let b = g.add_node(NodeKind::Min, Pos2::ZERO);
        g.evaluate(b);
        assert!(Arc::ptr_eq(&zero, g.zero_field.as_ref().unwrap()));
    }

    #[test]
    fn test_chain_evaluates_upstream_first() {
        let mut g = graph();
        let c = constant(&mut g, -0.5);
        let abs = g.add_node(NodeKind::Abs, Pos2::ZERO);
        let inv = g.add_node(NodeKind::Invert, Pos2::ZERO);
        link(&mut g, c, abs, 0);
        link(&mut g, abs, inv, 0);

        let field = g.evaluate(inv);
        assert!(field.values().iter().all(|&v| v == -0.5));
        assert_eq!(g.stats().last_order, vec![c, abs, inv]);
        assert_eq!(g.stats().evaluations, 3);
    }

    #[test]
    fn test_inputs_evaluated_in_pin_order() {
        let mut g = graph();
        let a = constant(&mut g, 1.0);
        let b = constant(&mut g, 2.0);
        let control = constant(&mut g, 0.0);
        let select = g.add_node(NodeKind::Select, Pos2::ZERO);
        // Wire in reverse slot order so id order and pin order differ
        link(&mut g, control, select, 2);
        link(&mut g, b, select, 1);
        link(&mut g, a, select, 0);

        let field = g.evaluate(select);
        assert!(field.values().iter().all(|&v| v == 2.0));
        assert_eq!(g.stats().last_order, vec![a, b, control, select]);
    }

    #[test]
    fn test_clean_nodes_are_memoized() {
        let mut g = graph();
        let p = g.add_node(NodeKind::Perlin, Pos2::ZERO);
        let abs = g.add_node(NodeKind::Abs, Pos2::ZERO);
        link(&mut g, p, abs, 0);

        let first = g.evaluate(abs);
        let count = g.stats().evaluations;
        let second = g.evaluate(abs);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(g.stats().evaluations, count);
        assert!(g.stats().last_order.is_empty());
        assert_eq!(g.node(abs).unwrap().revision(), 1);
    }

    #[test]
    fn test_parameter_change_recomputes_only_affected_nodes() {
        let mut g = graph();
        let a = constant(&mut g, 0.25);
        let b = constant(&mut g, 0.5);
        let add = g.add_node(NodeKind::Add, Pos2::ZERO);
        link(&mut g, a, add, 0);
        link(&mut g, b, add, 1);
        g.evaluate(add);

        g.set_parameter(b, 0, 1.0);
        let field = g.evaluate(add);
        assert!(field.values().iter().all(|&v| v == 1.25));
        assert_eq!(g.stats().last_order, vec![b, add]);
        assert_eq!(g.node(a).unwrap().revision(), 1);
        assert_eq!(g.node(add).unwrap().revision(), 2);
    }

    #[test]
    fn test_shared_upstream_evaluated_once() {
        let mut g = graph();
        let src = constant(&mut g, 0.5);
        let abs = g.add_node(NodeKind::Abs, Pos2::ZERO);
        let inv = g.add_node(NodeKind::Invert, Pos2::ZERO);
        let add = g.add_node(NodeKind::Add, Pos2::ZERO);
        link(&mut g, src, abs, 0);
        link(&mut g, src, inv, 0);
        link(&mut g, abs, add, 0);
        link(&mut g, inv, add, 1);

        let field = g.evaluate(add);
        assert!(field.values().iter().all(|&v| v == 0.0));
        assert_eq!(g.stats().last_order, vec![src, abs, inv, add]);
    }

    #[test]
    fn test_deleting_link_restores_zero_input() {
        let mut g = graph();
        let c = constant(&mut g, 0.75);
        let inv = g.add_node(NodeKind::Invert, Pos2::ZERO);
        link(&mut g, c, inv, 0);
        assert!(g.evaluate(inv).values().iter().all(|&v| v == -0.75));

        let id = g.links().next().unwrap().id;
        assert!(g.delete_link(id, true));
        assert!(g.delete_link(id, false));
        assert!(g.evaluate(inv).values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_window_change_resamples() {
        let mut g = graph();
        let p = g.add_node(NodeKind::Perlin, Pos2::ZERO);
        assert_eq!(g.evaluate(p).size(), [8, 8]);
        g.set_sample_window(g.window().with_size(4, 2));
        assert_eq!(g.evaluate(p).size(), [4, 2]);
        assert_eq!(g.node(p).unwrap().revision(), 2);
    }

    #[test]
    #[should_panic(expected = "Unknown or destroyed node")]
    fn test_evaluate_unknown_node_panics() {
        let mut g = graph();
        g.evaluate(NodeId(3));
    }
}
