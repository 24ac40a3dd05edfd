//! WebGPU rendering module
//!
//! The scene is a flat-colored triangle list rebuilt from the game state each
//! frame and drawn with a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, pixel_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
