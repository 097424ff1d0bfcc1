//! Rendering backends
//!
//! `pipeline` draws a [`Scene`](crate::scene::Scene) with WebGPU; text is left
//! to the page overlay. `ascii` rasterizes a scene into a character grid for
//! headless runs.

pub mod ascii;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use ascii::AsciiRenderer;
pub use pipeline::RenderState;
