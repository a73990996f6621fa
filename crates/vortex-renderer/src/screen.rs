//! Screen-space uniform for pixel-coordinate rendering

use bytemuck::{Pod, Zeroable};

/// Screen uniform for GPU
///
/// Positions are in pixels with the origin at the top-left and Y pointing down;
/// the vertex shader maps them to clip space using `size`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ScreenUniform {
    pub size: [f32; 2],
    /// Non-zero: draw positions modulo `size` instead of clipping them
    pub wrap: u32,
    pub _padding: u32,
}

impl ScreenUniform {
    pub fn new(width: u32, height: u32, wrap: bool) -> Self {
        Self {
            size: [width.max(1) as f32, height.max(1) as f32],
            wrap: wrap as u32,
            _padding: 0,
        }
    }
}
