//! Sampled scalar fields and the window they are sampled over.
//!
//! Every node produces a [`NoiseMap`]: the node's field evaluated on a fixed
//! grid described by a [`SampleWindow`]. All maps in one graph share the same
//! window, so combining two maps is a plain element-wise operation.

use serde::{Deserialize, Serialize};

/// The rectangular region of the field plane that previews cover, and the
/// resolution it is sampled at.
///
/// Sample `(col, row)` lies at `x = x_min + col * (x_max - x_min) / width`,
/// `y = y_min + row * (y_max - y_min) / height`. Generators read the field on
/// the plane `(x, 0, y)` of their 3D domain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleWindow {
    /// Left edge of the window in field coordinates.
    pub x_min: f64,
    /// Right edge of the window in field coordinates.
    pub x_max: f64,
    /// Top edge of the window in field coordinates.
    pub y_min: f64,
    /// Bottom edge of the window in field coordinates.
    pub y_max: f64,
    /// Number of samples per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl SampleWindow {
    /// Default preview resolution in samples per side.
    pub const DEFAULT_SIZE: usize = 128;

    /// Creates a window over the given bounds.
    pub fn new(x_bounds: [f64; 2], y_bounds: [f64; 2], width: usize, height: usize) -> Self {
        Self {
            x_min: x_bounds[0],
            x_max: x_bounds[1],
            y_min: y_bounds[0],
            y_max: y_bounds[1],
            width,
            height,
        }
    }

    /// Returns the same bounds sampled at a different resolution.
    pub fn with_size(self, width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// Resolution as `[width, height]`.
    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    /// Total number of samples.
    pub fn sample_count(&self) -> usize {
        self.width * self.height
    }

    /// Field-space coordinates of sample `(col, row)`.
    pub fn point(&self, col: usize, row: usize) -> (f64, f64) {
        let dx = (self.x_max - self.x_min) / self.width.max(1) as f64;
        let dy = (self.y_max - self.y_min) / self.height.max(1) as f64;
        (self.x_min + col as f64 * dx, self.y_min + row as f64 * dy)
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(
            [2.0, 6.0],
            [1.0, 5.0],
            Self::DEFAULT_SIZE,
            Self::DEFAULT_SIZE,
        )
    }
}

/// A scalar field sampled over a [`SampleWindow`].
///
/// Values are stored row-major. Coherent-noise fields are nominally in
/// `[-1, 1]` but nothing clamps them; the color gradient clamps when
/// rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseMap {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl NoiseMap {
    /// Creates a map with every sample set to `value`.
    pub fn filled(window: &SampleWindow, value: f32) -> Self {
        Self {
            width: window.width,
            height: window.height,
            values: vec![value; window.sample_count()],
        }
    }

    /// Creates the constant-zero map used for unconnected inputs.
    pub fn zeros(window: &SampleWindow) -> Self {
        Self::filled(window, 0.0)
    }

    /// Samples `f(x, y, z)` on the plane `(x, 0, y)` of the window.
    pub fn generate(window: &SampleWindow, f: impl Fn(f64, f64, f64) -> f64) -> Self {
        let mut values = Vec::with_capacity(window.sample_count());
        for row in 0..window.height {
            for col in 0..window.width {
                let (x, y) = window.point(col, row);
                values.push(f(x, 0.0, y) as f32);
            }
        }
        Self {
            width: window.width,
            height: window.height,
            values,
        }
    }

    /// Applies `f` to every sample.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            width: self.width,
            height: self.height,
            values: self.values.iter().map(|&v| f(v as f64) as f32).collect(),
        }
    }

    /// Combines two maps of the same size sample by sample.
    pub fn zip(&self, other: &NoiseMap, f: impl Fn(f64, f64) -> f64) -> Self {
        debug_assert_eq!(self.size(), other.size());
        Self {
            width: self.width,
            height: self.height,
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(&a, &b)| f(a as f64, b as f64) as f32)
                .collect(),
        }
    }

    /// Combines three maps of the same size sample by sample.
    pub fn zip3(
        &self,
        second: &NoiseMap,
        third: &NoiseMap,
        f: impl Fn(f64, f64, f64) -> f64,
    ) -> Self {
        debug_assert_eq!(self.size(), second.size());
        debug_assert_eq!(self.size(), third.size());
        Self {
            width: self.width,
            height: self.height,
            values: self
                .values
                .iter()
                .zip(&second.values)
                .zip(&third.values)
                .map(|((&a, &b), &c)| f(a as f64, b as f64, c as f64) as f32)
                .collect(),
        }
    }

    /// Resolution as `[width, height]`.
    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    /// Number of samples per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at `(col, row)`, or `None` when out of bounds.
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + col).copied()
    }

    /// All samples, row-major.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Smallest and largest sample, or `None` for an empty map.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_window() -> SampleWindow {
        SampleWindow::new([0.0, 4.0], [0.0, 2.0], 4, 2)
    }

    #[test]
    fn test_default_window_matches_preview_bounds() {
        let window = SampleWindow::default();
        assert_eq!(window.x_min, 2.0);
        assert_eq!(window.x_max, 6.0);
        assert_eq!(window.y_min, 1.0);
        assert_eq!(window.y_max, 5.0);
        assert_eq!(window.size(), [128, 128]);
    }

    #[test]
    fn test_window_points() {
        let window = small_window();
        assert_eq!(window.point(0, 0), (0.0, 0.0));
        assert_eq!(window.point(3, 1), (3.0, 1.0));
    }

    #[test]
    fn test_generate_samples_plane() {
        let window = small_window();
        let map = NoiseMap::generate(&window, |x, y, z| {
            assert_eq!(y, 0.0);
            x + 10.0 * z
        });
        assert_eq!(map.size(), [4, 2]);
        assert_eq!(map.get(2, 0), Some(2.0));
        assert_eq!(map.get(1, 1), Some(11.0));
        assert_eq!(map.get(4, 0), None);
    }

    #[test]
    fn test_zip_and_map() {
        let window = small_window();
        let a = NoiseMap::filled(&window, 0.5);
        let b = NoiseMap::filled(&window, 0.25);
        let sum = a.zip(&b, |x, y| x + y);
        assert!(sum.values().iter().all(|&v| v == 0.75));
        let negated = sum.map(|v| -v);
        assert!(negated.values().iter().all(|&v| v == -0.75));
    }

    #[test]
    fn test_min_max() {
        let window = small_window();
        let map = NoiseMap::generate(&window, |x, _, _| x);
        assert_eq!(map.min_max(), Some((0.0, 3.0)));
        let empty = NoiseMap::zeros(&window.with_size(0, 0));
        assert_eq!(empty.min_max(), None);
    }
}
