//! # Vortex Physics
//!
//! Core physics for the vortex particle field: 2D vector operations, the
//! particle layout shared with the GPU, the vortex force kernel and the
//! per-particle integration step.

pub mod constants;
pub mod kernel;
pub mod particle;
pub mod vector;

pub use constants::*;
pub use kernel::*;
pub use particle::*;
pub use vector::*;
