//! Node templates for the graph widget's node finder.
//!
//! One template per [`NodeKind`]; the finder groups them by role.

use std::borrow::Cow;

use egui_node_graph2::{InputParamKind, NodeId as GraphNodeId, NodeTemplateIter, NodeTemplateTrait};

use super::{FieldInput, FieldType, NoiseGraphModel, NoiseGraphState, NoiseNodeData};
use crate::noise::{ModuleRegistry, NodeKind, NodeRole};

/// Template creating a node of one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoiseNodeTemplate(pub NodeKind);

/// Iterator over every node kind, in menu order.
pub struct AllNoiseTemplates;

impl NodeTemplateIter for AllNoiseTemplates {
    type Item = NoiseNodeTemplate;

    fn all_kinds(&self) -> Vec<Self::Item> {
        NodeKind::ALL.into_iter().map(NoiseNodeTemplate).collect()
    }
}

/// Adds one connection-only input per name, then the single output.
pub(super) fn add_pins(graph: &mut NoiseGraphModel, node_id: GraphNodeId, input_names: &[&str]) {
    for name in input_names {
        graph.add_input_param(
            node_id,
            name.to_string(),
            FieldType,
            FieldInput,
            InputParamKind::ConnectionOnly,
            true,
        );
    }
    graph.add_output_param(node_id, "Out".to_string(), FieldType);
}

impl NodeTemplateTrait for NoiseNodeTemplate {
    type NodeData = NoiseNodeData;
    type DataType = FieldType;
    type ValueType = FieldInput;
    type UserState = NoiseGraphState;
    type CategoryType = NodeRole;

    fn node_finder_label(&self, _user_state: &mut Self::UserState) -> Cow<'_, str> {
        Cow::Borrowed(self.0.name())
    }

    fn node_finder_categories(&self, _user_state: &mut Self::UserState) -> Vec<Self::CategoryType> {
        vec![self.0.role()]
    }

    fn node_graph_label(&self, _user_state: &mut Self::UserState) -> String {
        self.0.name().to_string()
    }

    fn user_data(&self, _user_state: &mut Self::UserState) -> Self::NodeData {
        NoiseNodeData::new(self.0)
    }

    fn build_node(
        &self,
        graph: &mut NoiseGraphModel,
        _user_state: &mut Self::UserState,
        node_id: GraphNodeId,
    ) {
        let input_names = ModuleRegistry::builtin()
            .create(self.0)
            .map(|module| module.input_names())
            .unwrap_or_default();
        add_pins(graph, node_id, input_names);
    }
}
