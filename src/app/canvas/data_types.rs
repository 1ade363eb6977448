//! Pin data type and input value for the node graph widget.
//!
//! Every pin carries a noise field, so there is a single data type and the
//! inputs hold no constant value of their own.

use std::borrow::Cow;

use eframe::egui::{self, Color32, RichText};
use egui_node_graph2::{DataTypeTrait, NodeId as GraphNodeId, WidgetValueTrait};

use super::{NoiseGraphState, NoiseNodeData, NoiseResponse};
use crate::app::theme;

/// The type flowing along every link: a sampled noise field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldType;

impl DataTypeTrait<NoiseGraphState> for FieldType {
    fn data_type_color(&self, _user_state: &mut NoiseGraphState) -> Color32 {
        theme::link::NORMAL
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("field")
    }
}

/// Value of an input pin.
///
/// Inputs are connection-only; an unconnected input reads the zero field,
/// so the widget just shows the pin label.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldInput;

impl WidgetValueTrait for FieldInput {
    type Response = NoiseResponse;
    type UserState = NoiseGraphState;
    type NodeData = NoiseNodeData;

    fn value_widget(
        &mut self,
        param_name: &str,
        _node_id: GraphNodeId,
        ui: &mut egui::Ui,
        _user_state: &mut Self::UserState,
        _node_data: &Self::NodeData,
    ) -> Vec<Self::Response> {
        ui.label(RichText::new(param_name).color(theme::text::SECONDARY));
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_name_and_color() {
        let mut state = NoiseGraphState::default();
        assert_eq!(FieldType.name(), "field");
        assert_eq!(FieldType.data_type_color(&mut state), theme::link::NORMAL);
    }

    #[test]
    fn test_field_input_default() {
        assert_eq!(FieldInput::default(), FieldInput);
    }
}
