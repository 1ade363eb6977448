//! Preview module
//!
//! Rendering of node fields into images and the texture contract used to
//! display them.

pub mod gradient;
pub mod texture;

pub use gradient::{ColorGradient, GradientKind};
pub use texture::TextureService;
