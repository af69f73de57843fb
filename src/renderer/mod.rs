//! WebGPU rendering module
//!
//! Builds flat-colored triangle lists from a `Snapshot` and draws them with a
//! single pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, RendererError};
pub use shapes::{grid_to_ndc, scene};
pub use vertex::{Vertex, colors};
