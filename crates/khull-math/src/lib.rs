#![warn(missing_docs)]

//! Math types for the khull concave hull kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types
//! for 2D point-cloud geometry: points, vectors, angles, and
//! tolerance constants.

use nalgebra::Vector2;

/// A point in the cloud plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the cloud plane.
pub type Vec2 = Vector2<f64>;

/// Coordinate resolution for point-identity tests.
///
/// Two coordinates closer than this are the same coordinate. Purification
/// keeps distinct points at least a linear tolerance apart, so identity
/// tests at this resolution never confuse true neighbors.
pub const RESOLUTION: f64 = 1e-8;

/// Signed angle from `a` to `b` in radians.
///
/// Counterclockwise rotation is positive; the result lies in (-PI, PI].
pub fn signed_angle(a: &Vec2, b: &Vec2) -> f64 {
    let cross = a.x * b.y - a.y * b.x;
    let dot = a.x * b.x + a.y * b.y;
    cross.atan2(dot)
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-7 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-7,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_signed_angle_quadrants() {
        let x = Vec2::x();
        let y = Vec2::y();
        assert_relative_eq!(signed_angle(&x, &y), FRAC_PI_2);
        assert_relative_eq!(signed_angle(&y, &x), -FRAC_PI_2);
        assert_relative_eq!(signed_angle(&x, &-x), PI);
        assert_relative_eq!(signed_angle(&x, &x), 0.0);
    }

    #[test]
    fn test_signed_angle_scale_invariant() {
        let a = Vec2::new(3.0, 1.0);
        let b = Vec2::new(-1.0, 2.0);
        assert_relative_eq!(
            signed_angle(&a, &b),
            signed_angle(&(a * 10.0), &(b * 0.25)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(1.0 + 1e-8, 2.0);
        assert!(tol.points_equal(&a, &b));
        let c = Point2::new(1.001, 2.0);
        assert!(!tol.points_equal(&a, &c));
    }

    #[test]
    fn test_resolution_below_default_linear() {
        assert!(RESOLUTION < Tolerance::DEFAULT.linear);
    }
}
