//! Vortex force kernel
//!
//! Every particle is pulled toward the attractor and pushed around it:
//!
//! ```text
//! direction = normalize(attractor - position)
//! distance  = |position - attractor|
//! swirl     = rotate(direction, swirl_angle) * (swirl_strength / distance)
//! dv        = (direction + swirl) * (turbo ? turbo_multiplier : 1)
//! ```
//!
//! A particle sitting exactly on the attractor has no direction and receives a
//! zero delta. Otherwise the distance is clamped to `min_distance` so the swirl
//! term stays finite.

use glam::Vec2;

use crate::constants::*;
use crate::particle::Particle;
use crate::vector::Vector2Ext;

/// Tuning for the single vortex force model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VortexParams {
    pub swirl_angle: f32,
    pub swirl_strength: f32,
    pub turbo_multiplier: f32,
    pub damping: f32,
    pub min_distance: f32,
}

impl Default for VortexParams {
    fn default() -> Self {
        Self {
            swirl_angle: SWIRL_ANGLE,
            swirl_strength: SWIRL_STRENGTH,
            turbo_multiplier: TURBO_MULTIPLIER,
            damping: DAMPING,
            min_distance: MIN_DISTANCE,
        }
    }
}

/// Pure mapping from (position, attractor, turbo) to a velocity delta.
///
/// `Copy` so each worker task captures its own instance by value.
#[derive(Clone, Copy, Debug)]
pub struct VortexKernel {
    params: VortexParams,
    // Unit vector at `swirl_angle`; rotating by it avoids a sin/cos per particle
    swirl_rotor: Vec2,
}

impl Default for VortexKernel {
    fn default() -> Self {
        Self::new(VortexParams::default())
    }
}

impl VortexKernel {
    pub fn new(params: VortexParams) -> Self {
        Self {
            params,
            swirl_rotor: Vec2::X.rotated(params.swirl_angle),
        }
    }

    /// Velocity change for a particle at `position`
    #[inline]
    pub fn delta_velocity(&self, position: Vec2, attractor: Vec2, turbo: bool) -> Vec2 {
        let Some(direction) = (attractor - position).normalized() else {
            return Vec2::ZERO;
        };

        let distance = position
            .distance_to(attractor)
            .max(self.params.min_distance as f64);
        let falloff = (self.params.swirl_strength as f64 / distance) as f32;
        let swirl = self.swirl_rotor.rotate(direction) * falloff;

        let multiplier = if turbo {
            self.params.turbo_multiplier
        } else {
            1.0
        };

        (direction + swirl) * multiplier
    }

    /// Apply the force and integrate one frame in place
    #[inline]
    pub fn advance(&self, particle: &mut Particle, attractor: Vec2, turbo: bool) {
        let delta = self.delta_velocity(particle.position, attractor, turbo);
        particle.integrate(delta, self.params.damping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Vec2, expected: (f64, f64), tolerance: f64) {
        assert!(
            (actual.x as f64 - expected.0).abs() < tolerance
                && (actual.y as f64 - expected.1).abs() < tolerance,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn three_four_five_scenario() {
        let kernel = VortexKernel::default();
        let position = Vec2::new(3.0, 4.0);
        let attractor = Vec2::ZERO;

        assert_eq!(position.distance_to(attractor), 5.0);
        let direction = (attractor - position).normalized().unwrap();
        assert_close(direction, (-0.6, -0.8), 1e-6);

        // rotate (-0.6, -0.8) by 100 rad, scale by 10 / 5
        let (sin, cos) = 100.0_f64.sin_cos();
        let swirl_x = (-0.6 * cos - -0.8 * sin) * 2.0;
        let swirl_y = (-0.6 * sin + -0.8 * cos) * 2.0;

        let delta = kernel.delta_velocity(position, attractor, false);
        assert_close(delta, (-0.6 + swirl_x, -0.8 + swirl_y), 1e-5);
    }

    #[test]
    fn turbo_triples_the_delta() {
        let kernel = VortexKernel::default();
        let position = Vec2::new(120.0, -35.5);
        let attractor = Vec2::new(400.0, 300.0);

        let normal = kernel.delta_velocity(position, attractor, false);
        let turbo = kernel.delta_velocity(position, attractor, true);
        assert!((turbo - normal * 3.0).length() < 1e-5);
    }

    #[test]
    fn kernel_is_deterministic() {
        let kernel = VortexKernel::default();
        let position = Vec2::new(812.25, 17.0);
        let attractor = Vec2::new(960.0, 500.0);

        let first = kernel.delta_velocity(position, attractor, true);
        for _ in 0..100 {
            assert_eq!(kernel.delta_velocity(position, attractor, true), first);
        }
    }

    #[test]
    fn coincident_attractor_yields_zero_delta() {
        let kernel = VortexKernel::default();
        let point = Vec2::new(250.0, 250.0);
        assert_eq!(kernel.delta_velocity(point, point, false), Vec2::ZERO);
        assert_eq!(kernel.delta_velocity(point, point, true), Vec2::ZERO);
    }

    #[test]
    fn near_coincident_attractor_stays_finite() {
        let kernel = VortexKernel::default();
        let attractor = Vec2::ZERO;
        let position = Vec2::new(1.0e-6, 0.0);

        let delta = kernel.delta_velocity(position, attractor, true);
        assert!(delta.is_finite());
        // clamped falloff bounds the magnitude
        let bound = (1.0 + SWIRL_STRENGTH / MIN_DISTANCE) * TURBO_MULTIPLIER;
        assert!(delta.length() <= bound * 1.001);
    }

    #[test]
    fn attractor_on_particle_does_not_poison_later_frames() {
        let kernel = VortexKernel::default();
        let attractor = Vec2::new(50.0, 50.0);
        let mut particle = Particle::at(attractor);

        for _ in 0..240 {
            kernel.advance(&mut particle, attractor, false);
            assert!(particle.position.is_finite());
            assert!(particle.velocity.is_finite());
        }
    }

    #[test]
    fn far_particles_are_pulled_toward_the_attractor() {
        let kernel = VortexKernel::default();
        let attractor = Vec2::new(0.0, 0.0);
        let position = Vec2::new(1000.0, 0.0);

        // swirl is 10/1000 of the radial term out here
        let delta = kernel.delta_velocity(position, attractor, false);
        assert!(delta.x < -0.98);
        assert!(delta.y.abs() < 0.02);
    }
}
