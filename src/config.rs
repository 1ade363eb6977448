//! Editor configuration.
//!
//! Settings are read from a JSON file at startup. Every field is optional;
//! missing fields take their default value.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::noise::SampleWindow;
use crate::preview::GradientKind;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "NOISE_EDITOR_CONFIG";

/// Startup settings of the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial window size in points.
    pub window_size: [f32; 2],
    /// Preview resolution in samples per side.
    pub preview_size: usize,
    /// Horizontal bounds of the sampled region.
    pub x_bounds: [f64; 2],
    /// Vertical bounds of the sampled region.
    pub y_bounds: [f64; 2],
    /// Color ramp used for previews.
    pub gradient: GradientKind,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_size: [1280.0, 720.0],
            preview_size: SampleWindow::DEFAULT_SIZE,
            x_bounds: [2.0, 6.0],
            y_bounds: [1.0, 5.0],
            gradient: GradientKind::default(),
        }
    }
}

impl EditorConfig {
    /// Reads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reads the configuration at `path`, falling back to the defaults when
    /// no path is given or the file cannot be read.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!(
                    "Ignoring configuration {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Configuration file named by the first command line argument, or by
    /// [`CONFIG_ENV_VAR`].
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR))
            .map(PathBuf::from)
    }

    /// The sample window every node field is evaluated on.
    pub fn sample_window(&self) -> SampleWindow {
        let size = self.preview_size.max(1);
        SampleWindow::new(self.x_bounds, self.y_bounds, size, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        let window = config.sample_window();
        assert_eq!(window.x_min, 2.0);
        assert_eq!(window.x_max, 6.0);
        assert_eq!(window.y_min, 1.0);
        assert_eq!(window.y_max, 5.0);
        assert_eq!(window.width, SampleWindow::DEFAULT_SIZE);
        assert_eq!(config.gradient, GradientKind::Terrain);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "preview_size": 64, "gradient": "grayscale" }"#).unwrap();
        assert_eq!(config.preview_size, 64);
        assert_eq!(config.gradient, GradientKind::Grayscale);
        assert_eq!(config.window_size, [1280.0, 720.0]);
        assert_eq!(config.x_bounds, [2.0, 6.0]);
    }

    #[test]
    fn test_zero_preview_size_samples_once() {
        let config = EditorConfig {
            preview_size: 0,
            ..Default::default()
        };
        assert_eq!(config.sample_window().size(), [1, 1]);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "noise_editor_config_{}.json",
            std::process::id()
        ));
        let config = EditorConfig {
            preview_size: 32,
            y_bounds: [-1.0, 1.0],
            ..Default::default()
        };
        config.save(&path).unwrap();
        let loaded = EditorConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/nonexistent/noise_editor.json");
        assert!(matches!(EditorConfig::load(path), Err(ConfigError::Io(_))));
        assert_eq!(
            EditorConfig::load_or_default(Some(path)),
            EditorConfig::default()
        );
        assert_eq!(EditorConfig::load_or_default(None), EditorConfig::default());
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let path = std::env::temp_dir().join(format!(
            "noise_editor_bad_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ preview_size: ").unwrap();
        let result = EditorConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}
