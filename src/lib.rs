//! Noise Editor Library
//!
//! Core library for the node-based procedural noise editor: the noise
//! modules, the node graph with lazy evaluation, preview rendering, and the
//! editor controller that drives an interactive canvas.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod graph;
pub mod modules;
pub mod noise;
pub mod preview;
pub mod widgets;

#[cfg(test)]
mod tests {
    #[test]
    fn test_package_metadata() {
        assert_eq!(env!("CARGO_PKG_NAME"), "noise_editor");
        assert_eq!(env!("CARGO_PKG_AUTHORS"), "");
        assert_eq!(env!("CARGO_PKG_LICENSE"), "MIT");
    }
}
