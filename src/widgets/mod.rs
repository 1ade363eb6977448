//! Widgets module
//!
//! Custom UI controls for node parameters.

pub mod knob;

pub use knob::{knob, KnobConfig};
