//! 2D vector operations used by the force kernel
//!
//! `glam::Vec2` already provides addition, subtraction, scalar and
//! component-wise multiplication plus the in-place `+=`/`*=` used during
//! integration. [`Vector2Ext`] adds the measurements the kernel needs, computed
//! in double precision, and an explicit failure case for normalizing a
//! zero-length vector.

use glam::Vec2;

/// Position / velocity vector in pixel space.
pub type Vector2 = Vec2;

pub trait Vector2Ext: Sized {
    /// Euclidean length, `sqrt(x² + y²)`, evaluated in `f64`.
    fn magnitude(self) -> f64;

    /// Unit vector in the same direction, or `None` when the magnitude is zero
    /// (or not finite).
    fn normalized(self) -> Option<Self>;

    /// Euclidean distance between two points, evaluated in `f64`.
    fn distance_to(self, other: Self) -> f64;

    /// Counter-clockwise rotation by `angle` radians.
    fn rotated(self, angle: f32) -> Self;
}

impl Vector2Ext for Vec2 {
    #[inline]
    fn magnitude(self) -> f64 {
        let x = self.x as f64;
        let y = self.y as f64;
        (x * x + y * y).sqrt()
    }

    #[inline]
    fn normalized(self) -> Option<Self> {
        let m = self.magnitude();
        if m == 0.0 || !m.is_finite() {
            return None;
        }
        Some(Vec2::new(
            (self.x as f64 / m) as f32,
            (self.y as f64 / m) as f32,
        ))
    }

    #[inline]
    fn distance_to(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    #[inline]
    fn rotated(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn magnitude_of_pythagorean_triple() {
        assert_eq!(Vec2::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Vec2::new(-3.0, -4.0).magnitude(), 5.0);
    }

    #[test]
    fn normalized_has_unit_length() {
        let n = Vec2::new(3.0, 4.0).normalized().unwrap();
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.y - 0.8).abs() < 1e-6);
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalizing_zero_fails() {
        assert_eq!(Vec2::ZERO.normalized(), None);
        assert_eq!(Vec2::new(f32::INFINITY, 0.0).normalized(), None);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(10.0, 2.0);
        let b = Vec2::new(7.0, 6.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
    }

    #[test]
    fn quarter_turn_rotation() {
        let r = Vec2::X.rotated(FRAC_PI_2);
        assert!(r.x.abs() < 1e-6);
        assert!((r.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_preserves_length() {
        let v = Vec2::new(-2.5, 7.0);
        let r = v.rotated(100.0);
        assert!((r.magnitude() - v.magnitude()).abs() < 1e-5);
    }

    #[test]
    fn in_place_accumulation() {
        let mut v = Vec2::new(1.0, 2.0);
        v += Vec2::new(0.5, -1.0);
        v *= 2.0;
        assert_eq!(v, Vec2::new(3.0, 2.0));
        assert_eq!(v * Vec2::new(2.0, 0.5), Vec2::new(6.0, 1.0));
    }
}
