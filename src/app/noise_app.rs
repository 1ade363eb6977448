//! Main application struct for the noise editor
//!
//! Contains the NoiseApp which implements eframe::App and owns the node
//! editor, its egui texture service, and the canvas state.

use eframe::egui::{self, Align, Layout, Pos2, RichText};
use log::info;

use super::canvas::{CanvasState, EguiCanvas};
use super::textures::EguiTextures;
use super::theme;
use crate::config::EditorConfig;
use crate::editor::NodeEditor;
use crate::noise::NodeKind;
use crate::preview::GradientKind;

/// Where nodes added from the toolbar are placed, in canvas coordinates.
const TOOLBAR_PLACEMENT: Pos2 = Pos2::new(40.0, 40.0);

/// Main application state for the noise editor
pub struct NoiseApp {
    editor: NodeEditor<EguiTextures>,
    canvas: CanvasState,
    gradient: GradientKind,
    /// Whether theme has been applied
    theme_applied: bool,
}

impl NoiseApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &EditorConfig) -> Self {
        let textures = EguiTextures::new(cc.egui_ctx.clone());
        let editor = NodeEditor::with_settings(
            "Noise Editor",
            textures,
            config.sample_window(),
            config.gradient.build(),
        );
        info!(
            "Editor ready: {} node kinds, {}x{} previews",
            NodeKind::ALL.len(),
            config.preview_size,
            config.preview_size
        );

        Self {
            editor,
            canvas: CanvasState::default(),
            gradient: config.gradient,
            theme_applied: false,
        }
    }

    /// Draw the top toolbar with the node menu and gradient selector
    fn draw_toolbar(&self, ui: &mut egui::Ui) -> ToolbarActions {
        let mut actions = ToolbarActions::default();

        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new("NOISE EDITOR")
                    .size(18.0)
                    .color(theme::text::PRIMARY)
                    .strong(),
            );

            ui.add_space(20.0);
            ui.separator();
            ui.add_space(20.0);

            for (role, kinds) in self.editor.catalog() {
                ui.menu_button(RichText::new(role.name()).color(role.color()), |ui| {
                    for kind in kinds {
                        if ui.button(kind.name()).clicked() {
                            actions.add_node = Some(*kind);
                            ui.close_menu();
                        }
                    }
                });
            }

            ui.add_space(20.0);
            ui.separator();
            ui.add_space(20.0);

            ui.label(RichText::new("Gradient").color(theme::text::SECONDARY));
            let mut selected = self.gradient;
            egui::ComboBox::from_id_salt("gradient")
                .selected_text(gradient_label(selected))
                .show_ui(ui, |ui| {
                    for kind in [GradientKind::Terrain, GradientKind::Grayscale] {
                        ui.selectable_value(&mut selected, kind, gradient_label(kind));
                    }
                });
            if selected != self.gradient {
                actions.gradient = Some(selected);
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let graph = self.editor.graph();
                ui.label(
                    RichText::new(format!(
                        "{} nodes • {} links",
                        graph.node_count(),
                        graph.link_count()
                    ))
                    .color(theme::text::SECONDARY)
                    .small(),
                );
            });
        });

        actions
    }

    /// Draw the bottom status bar
    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);

            let selected = self
                .canvas
                .selected_node()
                .and_then(|id| self.editor.graph().node(id));
            match selected {
                Some(node) => match self.editor.preview_error(node.id()) {
                    Some(error) => {
                        ui.label(
                            RichText::new(format!("⚠ {}: {}", node.kind().name(), error))
                                .color(theme::accent::ERROR)
                                .small(),
                        );
                    }
                    None => {
                        ui.label(
                            RichText::new(format!(
                                "{} ({}) • {}",
                                node.kind().name(),
                                node.id(),
                                node.module().info().description
                            ))
                            .color(theme::text::SECONDARY)
                            .small(),
                        );
                    }
                },
                None if self.canvas.is_connecting() => {
                    ui.label(
                        RichText::new("Drop on a pin to connect")
                            .color(theme::accent::WARNING)
                            .small(),
                    );
                }
                None => {
                    ui.label(
                        RichText::new("Right-click to add a node • Drag from a connected input to unplug it")
                            .color(theme::text::SECONDARY)
                            .small(),
                    );
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let stats = self.editor.graph().stats();
                ui.label(
                    RichText::new(format!("{} evaluations", stats.evaluations))
                        .color(theme::text::DISABLED)
                        .small(),
                );
            });
        });
    }
}

fn gradient_label(kind: GradientKind) -> &'static str {
    match kind {
        GradientKind::Terrain => "Terrain",
        GradientKind::Grayscale => "Grayscale",
    }
}

/// Actions collected from the toolbar for deferred execution
#[derive(Default)]
struct ToolbarActions {
    add_node: Option<NodeKind>,
    gradient: Option<GradientKind>,
}

impl eframe::App for NoiseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        let toolbar_actions = egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::none()
                    .fill(theme::background::PANEL)
                    .inner_margin(egui::Margin::symmetric(0.0, 8.0)),
            )
            .show(ctx, |ui| self.draw_toolbar(ui))
            .inner;

        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::none()
                    .fill(theme::background::PANEL)
                    .inner_margin(egui::Margin::symmetric(0.0, 4.0)),
            )
            .show(ctx, |ui| self.draw_status_bar(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let mut canvas = EguiCanvas::new(ui, &mut self.canvas);
                self.editor.draw(&mut canvas);
            });

        if let Some(kind) = toolbar_actions.add_node {
            self.editor.add_node(kind, TOOLBAR_PLACEMENT);
        }
        if let Some(gradient) = toolbar_actions.gradient {
            self.gradient = gradient;
            self.editor.set_gradient(gradient.build());
        }
    }
}
