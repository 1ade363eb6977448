//! Application module
//!
//! The eframe application: egui canvas, texture service, and theme.

pub mod canvas;
pub mod noise_app;
pub mod textures;
pub mod theme;

pub use canvas::{CanvasState, EguiCanvas};
pub use noise_app::NoiseApp;
pub use textures::EguiTextures;
