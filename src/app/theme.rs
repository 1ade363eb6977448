//! Theme definitions for the noise editor UI
//!
//! Color constants for the canvas, nodes and links, plus the dark egui
//! style applied on the first frame.

use eframe::egui::{self, Color32, Rounding, Stroke, Vec2};

/// Background colors
pub mod background {
    use super::Color32;

    /// Canvas background
    pub const CANVAS: Color32 = Color32::from_rgb(24, 26, 32);

    /// Grid lines
    pub const GRID: Color32 = Color32::from_rgb(38, 41, 50);

    /// Toolbar and status bar
    pub const PANEL: Color32 = Color32::from_rgb(32, 35, 43);

    /// Buttons, sliders and menus
    pub const WIDGET: Color32 = Color32::from_rgb(44, 48, 60);

    pub const WIDGET_HOVERED: Color32 = Color32::from_rgb(56, 61, 76);

    pub const WIDGET_ACTIVE: Color32 = Color32::from_rgb(68, 74, 92);
}

/// Node outline colors; header colors come from the node role
pub mod node {
    use super::Color32;

    /// Node outline
    pub const BORDER: Color32 = Color32::from_rgb(70, 75, 92);

    /// Outline of a node whose field is out of date
    pub const BORDER_DIRTY: Color32 = Color32::from_rgb(120, 110, 70);
}

/// Link and pin colors
pub mod link {
    use super::Color32;

    /// Links and the pins they plug into
    pub const NORMAL: Color32 = Color32::from_rgb(150, 160, 185);
}

/// Text colors
pub mod text {
    use super::Color32;

    pub const PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);

    pub const SECONDARY: Color32 = Color32::from_rgb(160, 160, 175);

    pub const DISABLED: Color32 = Color32::from_rgb(100, 100, 115);
}

/// UI accent colors
pub mod accent {
    use super::Color32;

    pub const PRIMARY: Color32 = Color32::from_rgb(66, 165, 245);

    pub const WARNING: Color32 = Color32::from_rgb(255, 183, 77);

    pub const ERROR: Color32 = Color32::from_rgb(239, 83, 80);
}

/// Grid spacing of the canvas background
pub const GRID_SPACING: f32 = 24.0;

/// Rounding of node frames
pub const ROUNDING: Rounding = Rounding {
    nw: 6.0,
    ne: 6.0,
    sw: 6.0,
    se: 6.0,
};

/// Rounding of buttons and sliders
pub const ROUNDING_SMALL: Rounding = Rounding {
    nw: 4.0,
    ne: 4.0,
    sw: 4.0,
    se: 4.0,
};

/// Apply the dark editor theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let visuals = &mut style.visuals;
    visuals.dark_mode = true;

    visuals.window_fill = background::PANEL;
    visuals.window_stroke = Stroke::new(1.0, node::BORDER);
    visuals.window_rounding = ROUNDING;
    visuals.panel_fill = background::CANVAS;

    let widgets = &mut visuals.widgets;
    for (state, fill, fg) in [
        (&mut widgets.noninteractive, background::WIDGET, text::SECONDARY),
        (&mut widgets.inactive, background::WIDGET, text::PRIMARY),
        (&mut widgets.hovered, background::WIDGET_HOVERED, text::PRIMARY),
        (&mut widgets.active, background::WIDGET_ACTIVE, accent::PRIMARY),
        (&mut widgets.open, background::WIDGET_ACTIVE, text::PRIMARY),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.fg_stroke = Stroke::new(1.0, fg);
        state.rounding = ROUNDING_SMALL;
    }

    visuals.selection.bg_fill = accent::PRIMARY.gamma_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent::PRIMARY);
    visuals.extreme_bg_color = Color32::from_rgb(18, 20, 26);

    style.spacing.item_spacing = Vec2::new(8.0, 4.0);
    style.spacing.button_padding = Vec2::new(10.0, 4.0);
    style.spacing.window_margin = egui::Margin::same(10.0);

    ctx.set_style(style);
}

/// Draw the canvas grid, shifted by the canvas pan offset
pub fn draw_grid_background(painter: &egui::Painter, rect: egui::Rect, pan: Vec2) {
    painter.rect_filled(rect, 0.0, background::CANVAS);
    let stroke = Stroke::new(1.0, background::GRID);

    let mut x = rect.left() + pan.x.rem_euclid(GRID_SPACING);
    while x <= rect.right() {
        painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
        x += GRID_SPACING;
    }

    let mut y = rect.top() + pan.y.rem_euclid(GRID_SPACING);
    while y <= rect.bottom() {
        painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
        y += GRID_SPACING;
    }
}
