//! 2D vector helpers.
//!
//! `Vec2` is nalgebra's `Vector2<f64>`, so addition, subtraction, scaling and
//! `magnitude()` come from nalgebra's operators. This module only adds the
//! pieces nalgebra does not provide in the shape the engine needs.

use crate::error::{Error, Result};
use nalgebra::{Rotation2, Vector2};
use rand::Rng;
use std::f64::consts::TAU;

/// 2D vector used for positions, velocities and momenta.
pub type Vec2 = Vector2<f64>;

/// Divide `v` by the scalar `k`.
///
/// Errors: `Error::MathError` if `k` is zero or not finite.
pub fn divide(v: Vec2, k: f64) -> Result<Vec2> {
    if k == 0.0 || !k.is_finite() {
        return Err(Error::MathError(format!("cannot divide vector by {k}")));
    }
    Ok(v / k)
}

/// Unit vector pointing in a direction drawn uniformly from [0, 2π).
pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let theta = rng.random_range(0.0..TAU);
    Vec2::new(theta.cos(), theta.sin())
}

/// Rotate `v` counter-clockwise by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f64) -> Vec2 {
    Rotation2::new(angle) * v
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn distance_squared(a: &Vec2, b: &Vec2) -> f64 {
    (a - b).magnitude_squared()
}

/// True when every component is finite.
#[inline]
pub fn is_finite(v: &Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
