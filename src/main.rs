//! Noise Editor - A node-based editor for procedural noise
//!
//! Entry point for the application. An optional JSON configuration file is
//! read from the first argument or the `NOISE_EDITOR_CONFIG` variable.

use eframe::egui;
use noise_editor::app::NoiseApp;
use noise_editor::config::EditorConfig;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = EditorConfig::load_or_default(EditorConfig::path_from_env().as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title("Noise Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Noise Editor",
        options,
        Box::new(move |cc| Ok(Box::new(NoiseApp::new(cc, &config)))),
    )
}
