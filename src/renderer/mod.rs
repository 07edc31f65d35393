//! WebGPU rendering module
//!
//! Flat-colored triangles: the simulation is turned into vertices by
//! `shapes`, and `pipeline` owns the device and draws them.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, arena_to_ndc};
pub use vertex::{Palette, Vertex};
