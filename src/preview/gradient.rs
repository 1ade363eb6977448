//! Color gradients that turn a sampled field into a preview image.

use egui::{Color32, ColorImage};
use serde::{Deserialize, Serialize};

use crate::noise::NoiseMap;

/// Named gradient presets, selectable from the configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    /// Deep water through sand, grass and rock to snow.
    #[default]
    Terrain,
    /// Black at -1 to white at +1.
    Grayscale,
}

impl GradientKind {
    /// Builds the gradient for this preset.
    pub fn build(&self) -> ColorGradient {
        match self {
            GradientKind::Terrain => ColorGradient::terrain(),
            GradientKind::Grayscale => ColorGradient::grayscale(),
        }
    }
}

/// A piecewise-linear color ramp over field values.
///
/// Values below the first stop take the first color, values above the last
/// stop take the last color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorGradient {
    /// Stops sorted by ascending position, positions unique.
    stops: Vec<(f64, Color32)>,
}

impl ColorGradient {
    /// Creates a gradient from `stops` in any order.
    ///
    /// When two stops share a position the later one wins.
    pub fn new(stops: impl IntoIterator<Item = (f64, Color32)>) -> Self {
        let mut gradient = Self { stops: Vec::new() };
        for (position, color) in stops {
            gradient.add_stop(position, color);
        }
        gradient
    }

    /// The terrain ramp used for previews by default.
    pub fn terrain() -> Self {
        Self::new([
            (-1.00, Color32::from_rgb(0, 0, 128)),
            (-0.20, Color32::from_rgb(32, 64, 128)),
            (-0.04, Color32::from_rgb(64, 96, 192)),
            (-0.02, Color32::from_rgb(192, 192, 128)),
            (0.00, Color32::from_rgb(0, 192, 0)),
            (0.25, Color32::from_rgb(192, 192, 0)),
            (0.50, Color32::from_rgb(160, 96, 64)),
            (0.75, Color32::from_rgb(128, 255, 255)),
            (1.00, Color32::from_rgb(255, 255, 255)),
        ])
    }

    /// A black to white ramp over `[-1, 1]`.
    pub fn grayscale() -> Self {
        Self::new([(-1.0, Color32::BLACK), (1.0, Color32::WHITE)])
    }

    /// Inserts a stop, replacing any stop at the same position.
    pub fn add_stop(&mut self, position: f64, color: Color32) {
        match self
            .stops
            .binary_search_by(|(p, _)| p.total_cmp(&position))
        {
            Ok(index) => self.stops[index].1 = color,
            Err(index) => self.stops.insert(index, (position, color)),
        }
    }

    pub fn stops(&self) -> &[(f64, Color32)] {
        &self.stops
    }

    /// Color for a single field value.
    pub fn color_at(&self, value: f64) -> Color32 {
        let Some(&(first_pos, first)) = self.stops.first() else {
            return Color32::BLACK;
        };
        if value <= first_pos || value.is_nan() {
            return first;
        }

        for pair in self.stops.windows(2) {
            let (lo_pos, lo) = pair[0];
            let (hi_pos, hi) = pair[1];
            if value <= hi_pos {
                let t = ((value - lo_pos) / (hi_pos - lo_pos)) as f32;
                return lerp_color(lo, hi, t);
            }
        }

        self.stops.last().map_or(first, |&(_, color)| color)
    }

    /// Renders a whole field into an image of the same size.
    pub fn render(&self, map: &NoiseMap) -> ColorImage {
        let mut image = ColorImage::new(map.size(), Color32::BLACK);
        for (pixel, &value) in image.pixels.iter_mut().zip(map.values()) {
            *pixel = self.color_at(value as f64);
        }
        image
    }
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self::terrain()
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let channel = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_unmultiplied(
        channel(a.r(), b.r()),
        channel(a.g(), b.g()),
        channel(a.b(), b.b()),
        channel(a.a(), b.a()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::SampleWindow;

    #[test]
    fn test_stops_are_sorted_and_unique() {
        let gradient = ColorGradient::new([
            (1.0, Color32::WHITE),
            (-1.0, Color32::BLACK),
            (1.0, Color32::RED),
        ]);
        assert_eq!(gradient.stops(), &[(-1.0, Color32::BLACK), (1.0, Color32::RED)]);
    }

    #[test]
    fn test_grayscale_interpolates() {
        let gradient = ColorGradient::grayscale();
        assert_eq!(gradient.color_at(-1.0), Color32::BLACK);
        assert_eq!(gradient.color_at(1.0), Color32::WHITE);
        let mid = gradient.color_at(0.0);
        assert_eq!(mid.r(), 128);
        assert_eq!(mid.r(), mid.g());
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let gradient = ColorGradient::terrain();
        assert_eq!(gradient.color_at(-5.0), Color32::from_rgb(0, 0, 128));
        assert_eq!(gradient.color_at(5.0), Color32::WHITE);
        assert_eq!(gradient.color_at(f64::NAN), Color32::from_rgb(0, 0, 128));
    }

    #[test]
    fn test_terrain_hits_stop_colors() {
        let gradient = ColorGradient::terrain();
        assert_eq!(gradient.color_at(0.0), Color32::from_rgb(0, 192, 0));
        assert_eq!(gradient.color_at(0.5), Color32::from_rgb(160, 96, 64));
    }

    #[test]
    fn test_empty_gradient_is_black() {
        let gradient = ColorGradient::new([]);
        assert_eq!(gradient.color_at(0.3), Color32::BLACK);
    }

    #[test]
    fn test_render_matches_map_size() {
        let window = SampleWindow::new([0.0, 1.0], [0.0, 1.0], 3, 2);
        let map = NoiseMap::filled(&window, 1.0);
        let image = ColorGradient::grayscale().render(&map);
        assert_eq!(image.size, [3, 2]);
        assert_eq!(image.pixels.len(), 6);
        assert!(image.pixels.iter().all(|&p| p == Color32::WHITE));
    }

    #[test]
    fn test_gradient_kind_parses_lowercase() {
        let kind: GradientKind = serde_json::from_str("\"grayscale\"").unwrap();
        assert_eq!(kind, GradientKind::Grayscale);
        assert_eq!(kind.build(), ColorGradient::grayscale());
    }
}
