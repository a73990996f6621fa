//! Particle layout shared by the CPU update and the GPU point renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// A single point mass.
///
/// `repr(C)` and `Pod` so a whole population can be uploaded as a vertex
/// buffer without conversion; the renderer reads `position` at offset 0.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position in pixels, origin top-left, Y down
    pub position: Vec2,
    /// Velocity in pixels per frame
    pub velocity: Vec2,
}

impl Particle {
    /// Particle at rest at `position`
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Advance one frame: `v += dv; p += v; v *= damping`.
    ///
    /// Damping is applied every frame regardless of the forcing, so the speed
    /// stays bounded under continuous acceleration.
    #[inline]
    pub fn integrate(&mut self, delta_velocity: Vec2, damping: f32) {
        self.velocity += delta_velocity;
        self.position += self.velocity;
        self.velocity *= damping;
    }
}
