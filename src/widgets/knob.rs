//! Rotary knob widget for node parameters.
//!
//! Drag up/down to change the value, Shift+drag for fine control,
//! double-click to reset. Discrete parameters snap to whole steps and
//! toggles flip on click.

use eframe::egui::{self, Color32, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};
use std::ops::RangeInclusive;

use crate::app::theme;
use crate::noise::{ParameterDefinition, ParameterDisplay};

/// Configuration for the Knob widget.
#[derive(Clone, Debug)]
pub struct KnobConfig {
    /// Size of the knob (diameter).
    pub size: f32,
    pub range: RangeInclusive<f64>,
    /// Value restored on double-click.
    pub default: f64,
    /// Formatting and snapping of the value.
    pub display: ParameterDisplay,
    /// Map the drag distance logarithmically onto the range.
    pub logarithmic: bool,
    /// Label shown below the knob.
    pub label: Option<String>,
    pub show_value: bool,
    /// Drag distance in pixels for a full sweep of the range.
    pub drag_sensitivity: f32,
    /// Fine control multiplier when Shift is held.
    pub fine_multiplier: f32,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            size: 36.0,
            range: 0.0..=1.0,
            default: 0.5,
            display: ParameterDisplay::linear(2),
            logarithmic: false,
            label: None,
            show_value: true,
            drag_sensitivity: 200.0,
            fine_multiplier: 0.1,
        }
    }
}

impl KnobConfig {
    /// Knob editing `param`. Frequencies use a logarithmic sweep.
    pub fn for_parameter(param: &ParameterDefinition) -> Self {
        Self {
            range: param.min..=param.max,
            default: param.default,
            display: param.display,
            logarithmic: param.id == "frequency" && param.min > 0.0,
            label: Some(param.name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Total height including value and label rows.
    pub fn height(&self) -> f32 {
        let text_height = self.size * (16.0 / 36.0);
        self.size
            + if self.show_value { text_height } else { 0.0 }
            + if self.label.is_some() { text_height } else { 0.0 }
    }

    /// Position of `value` within the range, from 0 to 1.
    pub fn normalize(&self, value: f64) -> f64 {
        let (min, max) = (*self.range.start(), *self.range.end());
        if max <= min {
            return 0.0;
        }
        let t = if self.logarithmic {
            (value.ln() - min.ln()) / (max.ln() - min.ln())
        } else {
            (value - min) / (max - min)
        };
        t.clamp(0.0, 1.0)
    }

    /// Value at position `t` within the range, snapped for discrete
    /// displays.
    pub fn denormalize(&self, t: f64) -> f64 {
        let (min, max) = (*self.range.start(), *self.range.end());
        let t = t.clamp(0.0, 1.0);
        let value = if self.logarithmic {
            (min.ln() + t * (max.ln() - min.ln())).exp()
        } else {
            min + t * (max - min)
        };
        let value = value.clamp(min, max);
        if self.display.is_discrete() {
            value.round()
        } else {
            value
        }
    }
}

/// Knob drag state, kept in egui memory so discrete knobs can accumulate
/// sub-step drags.
#[derive(Clone, Copy, Default)]
struct DragPosition(f64);

/// A rotary knob editing `value`.
///
/// The response is marked changed when the value changes.
pub fn knob(ui: &mut Ui, value: &mut f64, config: &KnobConfig) -> Response {
    let (rect, mut response) =
        ui.allocate_exact_size(Vec2::new(config.size, config.height()), Sense::click_and_drag());
    let before = *value;

    if response.double_clicked() {
        *value = config.default;
    } else if config.display == ParameterDisplay::Toggle && response.clicked() {
        *value = if *value >= 0.5 { 0.0 } else { 1.0 };
    }

    if response.drag_started() {
        ui.data_mut(|d| d.insert_temp(response.id, DragPosition(config.normalize(*value))));
    }
    if response.dragged() {
        let sensitivity = if ui.input(|i| i.modifiers.shift) {
            config.drag_sensitivity / config.fine_multiplier
        } else {
            config.drag_sensitivity
        };
        let delta = -response.drag_delta().y / sensitivity;
        let position = ui
            .data(|d| d.get_temp::<DragPosition>(response.id))
            .unwrap_or(DragPosition(config.normalize(*value)));
        let position = (position.0 + delta as f64).clamp(0.0, 1.0);
        ui.data_mut(|d| d.insert_temp(response.id, DragPosition(position)));
        *value = config.denormalize(position);
    }

    if *value != before {
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        paint_knob(ui, rect, &response, *value, config);
    }

    response.on_hover_text(config.display.format(*value))
}

fn paint_knob(ui: &Ui, rect: Rect, response: &Response, value: f64, config: &KnobConfig) {
    let painter = ui.painter();
    let knob_rect = Rect::from_min_size(rect.min, Vec2::splat(config.size));
    let center = knob_rect.center();
    let scale = config.size / 36.0;
    let radius = config.size / 2.0 - 2.0 * scale;

    // Sweep from bottom-left (-225°) to bottom-right (+45°)
    let start_angle = -225.0_f32.to_radians();
    let end_angle = 45.0_f32.to_radians();
    let angle = start_angle + config.normalize(value) as f32 * (end_angle - start_angle);

    let active = response.hovered() || response.dragged();
    painter.circle_filled(
        center,
        radius,
        if active {
            theme::background::WIDGET_HOVERED
        } else {
            theme::background::WIDGET
        },
    );
    painter.circle_filled(
        center + Vec2::new(-radius * 0.3, -radius * 0.3),
        radius * 0.5,
        Color32::from_rgba_unmultiplied(255, 255, 255, 16),
    );

    draw_value_arc(
        painter,
        center,
        radius - 3.0 * scale,
        start_angle,
        angle,
        theme::accent::PRIMARY,
        scale,
    );

    let notch = |r: f32| Pos2::new(center.x + r * angle.cos(), center.y + r * angle.sin());
    painter.line_segment(
        [notch(radius - 9.0 * scale), notch(radius - 3.0 * scale)],
        Stroke::new(2.0 * scale, theme::text::PRIMARY),
    );

    painter.circle_stroke(
        center,
        radius,
        Stroke::new(
            1.0 * scale,
            if response.dragged() {
                theme::accent::PRIMARY
            } else {
                theme::node::BORDER
            },
        ),
    );

    let mut text_y = knob_rect.bottom() + 2.0 * scale;
    if config.show_value {
        painter.text(
            Pos2::new(center.x, text_y + 5.0 * scale),
            egui::Align2::CENTER_CENTER,
            config.display.format(value),
            egui::FontId::proportional(10.0 * scale),
            theme::text::PRIMARY,
        );
        text_y += 14.0 * scale;
    }
    if let Some(label) = &config.label {
        painter.text(
            Pos2::new(center.x, text_y + 5.0 * scale),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(9.0 * scale),
            theme::text::SECONDARY,
        );
    }
}

fn draw_value_arc(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    color: Color32,
    scale: f32,
) {
    let segments = 32;
    let arc_span = end_angle - start_angle;
    if arc_span.abs() <= 0.01 {
        return;
    }

    let points: Vec<Pos2> = (0..=segments)
        .map(|i| {
            let a = start_angle + arc_span * i as f32 / segments as f32;
            Pos2::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect();
    painter.add(egui::Shape::line(points, Stroke::new(2.5 * scale, color)));
}
