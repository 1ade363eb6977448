//! Node data for the noise graph widget.
//!
//! Each widget node carries a snapshot of its graph node: the parameter
//! values shown on the knobs and the preview texture. The snapshot is
//! refreshed every frame; edits travel back as [`NoiseResponse`]s.

use eframe::egui::{
    self, load::SizedTexture, Align2, Color32, FontId, Pos2, Rect, RichText, Sense, TextureId,
    Vec2,
};
use egui_node_graph2::{
    Graph, NodeDataTrait, NodeId as GraphNodeId, NodeResponse, UserResponseTrait,
};

use super::{FieldInput, FieldType, NoiseGraphState};
use crate::app::theme;
use crate::noise::{NodeKind, ParameterDefinition};
use crate::widgets::{knob, KnobConfig};

pub const KNOBS_PER_ROW: usize = 4;
pub const KNOB_SIZE: f32 = 34.0;
/// Side length of the preview image in points.
pub const PREVIEW_SIZE: f32 = 128.0;

/// Edits made inside a node, reported back to the editor.
#[derive(Clone, Debug, PartialEq)]
pub enum NoiseResponse {
    ParameterChanged {
        node_id: GraphNodeId,
        index: usize,
        value: f64,
    },
    TogglePreview(GraphNodeId),
}

impl UserResponseTrait for NoiseResponse {}

/// Data stored per node in the graph widget.
#[derive(Clone, Debug)]
pub struct NoiseNodeData {
    pub kind: NodeKind,
    pub parameters: Vec<ParameterDefinition>,
    /// Current value of each parameter.
    pub values: Vec<f64>,
    pub preview: Option<TextureId>,
    pub preview_visible: bool,
    /// Sticky error from the last failed preview upload.
    pub preview_error: Option<String>,
    pub dirty: bool,
}

impl NoiseNodeData {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parameters: Vec::new(),
            values: Vec::new(),
            preview: None,
            preview_visible: true,
            preview_error: None,
            dirty: true,
        }
    }

    fn knobs_ui(&self, ui: &mut egui::Ui, node_id: GraphNodeId) -> Vec<NoiseResponse> {
        let mut responses = Vec::new();
        let rows = self
            .parameters
            .chunks(KNOBS_PER_ROW)
            .zip(self.values.chunks(KNOBS_PER_ROW));

        for (row, (params, values)) in rows.enumerate() {
            ui.horizontal(|ui| {
                for (col, (param, value)) in params.iter().zip(values).enumerate() {
                    let config = KnobConfig::for_parameter(param).with_size(KNOB_SIZE);
                    let mut edited = *value;
                    if knob(ui, &mut edited, &config).changed() {
                        responses.push(NoiseResponse::ParameterChanged {
                            node_id,
                            index: row * KNOBS_PER_ROW + col,
                            value: edited,
                        });
                    }
                }
            });
        }
        responses
    }

    fn preview_ui(&self, ui: &mut egui::Ui) {
        match self.preview {
            // Field rows run bottom to top
            Some(texture) => {
                let image = egui::Image::from_texture(SizedTexture::new(
                    texture,
                    Vec2::splat(PREVIEW_SIZE),
                ))
                .uv(Rect::from_min_max(Pos2::new(0.0, 1.0), Pos2::new(1.0, 0.0)));
                ui.add(image);
            }
            None => {
                let (rect, _) = ui.allocate_exact_size(Vec2::splat(PREVIEW_SIZE), Sense::hover());
                let painter = ui.painter();
                painter.rect_filled(rect, theme::ROUNDING_SMALL, theme::background::CANVAS);
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    "no preview",
                    FontId::proportional(11.0),
                    theme::text::DISABLED,
                );
            }
        }
    }
}

impl NodeDataTrait for NoiseNodeData {
    type Response = NoiseResponse;
    type UserState = NoiseGraphState;
    type DataType = FieldType;
    type ValueType = FieldInput;

    fn top_bar_ui(
        &self,
        ui: &mut egui::Ui,
        node_id: GraphNodeId,
        _graph: &Graph<Self, Self::DataType, Self::ValueType>,
        _user_state: &mut Self::UserState,
    ) -> Vec<NodeResponse<Self::Response, Self>>
    where
        Self::Response: UserResponseTrait,
    {
        let mut responses = Vec::new();
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let toggle = if self.preview_visible { "◉" } else { "○" };
            if ui
                .small_button(toggle)
                .on_hover_text("Show or hide the preview")
                .clicked()
            {
                responses.push(NodeResponse::User(NoiseResponse::TogglePreview(node_id)));
            }
            if self.dirty {
                ui.label(RichText::new("●").small().color(theme::node::BORDER_DIRTY))
                    .on_hover_text("Out of date");
            }
        });
        responses
    }

    fn bottom_ui(
        &self,
        ui: &mut egui::Ui,
        node_id: GraphNodeId,
        _graph: &Graph<Self, Self::DataType, Self::ValueType>,
        _user_state: &mut Self::UserState,
    ) -> Vec<NodeResponse<Self::Response, Self>>
    where
        Self::Response: UserResponseTrait,
    {
        let mut responses = Vec::new();

        if !self.parameters.is_empty() {
            ui.add_space(4.0);
            responses.extend(
                self.knobs_ui(ui, node_id)
                    .into_iter()
                    .map(NodeResponse::User),
            );
        }

        if self.preview_visible {
            ui.add_space(4.0);
            self.preview_ui(ui);
        }

        if let Some(error) = &self.preview_error {
            ui.label(
                RichText::new("⚠ preview failed")
                    .small()
                    .color(theme::accent::ERROR),
            )
            .on_hover_text(error.as_str());
        }

        responses
    }

    fn titlebar_color(
        &self,
        _ui: &egui::Ui,
        _node_id: GraphNodeId,
        _graph: &Graph<Self, Self::DataType, Self::ValueType>,
        _user_state: &mut Self::UserState,
    ) -> Option<Color32> {
        Some(self.kind.role().color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::canvas::{templates::add_pins, NoiseGraphModel};

    /// Runs `f` inside one headless egui frame.
    fn with_ui(mut f: impl FnMut(&mut egui::Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| f(ui));
        });
    }

    fn model_with(data: NoiseNodeData) -> (NoiseGraphModel, GraphNodeId) {
        let mut graph = NoiseGraphModel::new();
        let id = graph.add_node("Abs".to_string(), data, |graph, id| {
            add_pins(graph, id, &["Source"])
        });
        (graph, id)
    }

    #[test]
    fn test_new_node_data() {
        let data = NoiseNodeData::new(NodeKind::Perlin);
        assert_eq!(data.kind, NodeKind::Perlin);
        assert!(data.preview_visible);
        assert!(data.dirty);
        assert!(data.preview.is_none());
    }

    #[test]
    fn test_titlebar_uses_role_color() {
        let (graph, id) = model_with(NoiseNodeData::new(NodeKind::Abs));
        let mut state = NoiseGraphState::default();
        with_ui(|ui| {
            let color = graph.nodes[id].user_data.titlebar_color(ui, id, &graph, &mut state);
            assert_eq!(color, Some(NodeKind::Abs.role().color()));
        });
    }

    #[test]
    fn test_bottom_ui_draws_preview_and_placeholder() {
        let ctx = egui::Context::default();
        let texture = ctx.load_texture(
            "preview",
            egui::ColorImage::new([4, 4], Color32::WHITE),
            egui::TextureOptions::LINEAR,
        );

        let mut with_texture = NoiseNodeData::new(NodeKind::Abs);
        with_texture.preview = Some(texture.id());
        let mut failed = NoiseNodeData::new(NodeKind::Abs);
        failed.preview_error = Some("create failed".to_string());

        for data in [with_texture, failed] {
            let (graph, id) = model_with(data);
            let mut state = NoiseGraphState::default();
            with_ui(|ui| {
                let top = ui.cursor().top();
                let responses = graph.nodes[id].user_data.bottom_ui(ui, id, &graph, &mut state);
                assert!(responses.is_empty());
                assert!(ui.cursor().top() - top >= PREVIEW_SIZE);
            });
        }
    }

    #[test]
    fn test_hidden_preview_takes_no_space() {
        let mut data = NoiseNodeData::new(NodeKind::Abs);
        data.preview_visible = false;
        let (graph, id) = model_with(data);
        let mut state = NoiseGraphState::default();
        with_ui(|ui| {
            let top = ui.cursor().top();
            graph.nodes[id].user_data.bottom_ui(ui, id, &graph, &mut state);
            assert!(ui.cursor().top() - top < PREVIEW_SIZE);
        });
    }
}
