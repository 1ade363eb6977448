//! Modules module
//!
//! Built-in noise modules.
//! Includes fractal and pattern generators, modifiers, combiners and the selector.

pub mod combiners;
pub mod generators;
pub mod modifiers;
pub mod patterns;
pub mod select;
pub mod voronoi;

// Re-export commonly used types
pub use combiners::{Add, Max, Min};
pub use generators::{Billow, Perlin, RidgedMulti};
pub use modifiers::{Abs, Clamp, Exponent, Invert, ScaleBias};
pub use patterns::{Checkerboard, Const, Cylinders, Spheres};
pub use select::Select;
pub use voronoi::Voronoi;
