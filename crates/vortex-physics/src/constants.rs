//! Constants for the vortex force kernel
//!
//! Tuned for a pixel-space simulation running at roughly 120 frames per second.

/// Fixed rotation applied to the attraction direction to produce the swirl (radians)
pub const SWIRL_ANGLE: f32 = 100.0;

/// Numerator of the swirl falloff: swirl magnitude is `SWIRL_STRENGTH / distance`
pub const SWIRL_STRENGTH: f32 = 10.0;

/// Force multiplier while turbo is held
pub const TURBO_MULTIPLIER: f32 = 3.0;

/// Per-frame multiplicative velocity decay
pub const DAMPING: f32 = 0.998;

/// Lower bound on the particle/attractor distance used in the swirl falloff.
/// Prevents singular forces at r→0
pub const MIN_DISTANCE: f32 = 1.0e-3;
