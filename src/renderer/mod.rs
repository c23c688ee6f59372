//! WebGPU rendering module
//!
//! The scene is rebuilt as a flat triangle list every frame; the pipeline
//! maps field coordinates to the letterboxed viewport.

pub mod pipeline;
pub mod scene;
pub mod shapes;

pub use pipeline::RenderState;
pub use scene::build_scene;
