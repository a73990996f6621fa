//! # Vortex Renderer
//!
//! Draws the particle population as single-pixel points with wgpu.

pub mod error;
pub mod renderer;
pub mod screen;

pub use error::*;
pub use renderer::*;
pub use screen::*;
