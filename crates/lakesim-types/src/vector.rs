//! Two-dimensional vector used for positions, velocities, and steering forces.
//!
//! [`Vec2`] is a plain `Copy` value with the handful of operations the
//! steering model needs: addition, subtraction, scalar scaling, length,
//! distance, and normalization.
//!
//! Normalizing a zero-length vector has no direction. Instead of producing
//! `NaN` components, [`Vec2::normalize`] returns `None` and
//! [`Vec2::normalize_or_zero`] returns [`Vec2::ZERO`], so a degenerate input
//! contributes nothing to a steering sum.

use core::ops::{Add, AddAssign, Div, Mul, Sub};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A 2D vector (or point) in lake coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Unit vector in the same direction.
    ///
    /// Returns `None` for the zero vector and for vectors whose length is
    /// not finite.
    pub fn normalize(self) -> Option<Self> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(Self::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Unit vector in the same direction, or [`Vec2::ZERO`] when the
    /// direction is undefined.
    pub fn normalize_or_zero(self) -> Self {
        self.normalize().unwrap_or(Self::ZERO)
    }

    /// Multiply both components by `factor`.
    pub const fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Shrink the vector to `max` length if it is longer, keeping direction.
    pub fn clamp_length(self, max: f64) -> Self {
        if self.length() > max {
            self.normalize_or_zero().scale(max)
        } else {
            self
        }
    }

    /// Point halfway between `self` and `other`.
    pub const fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Whether both components are finite.
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}


impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn length_and_distance() {
        let v = Vec2::new(3.0, 4.0);
        assert!(close(v.length(), 5.0));
        assert!(close(Vec2::new(1.0, 1.0).distance(Vec2::new(4.0, 5.0)), 5.0));
    }

    #[test]
    fn normalize_zero_is_none() {
        assert!(Vec2::ZERO.normalize().is_none());
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn normalize_produces_unit_length() {
        let n = Vec2::new(-7.0, 2.5).normalize_or_zero();
        assert!(close(n.length(), 1.0));
    }

    #[test]
    fn clamp_length_only_shrinks() {
        let long = Vec2::new(30.0, 40.0).clamp_length(2.0);
        assert!(close(long.length(), 2.0));
        assert!(close(long.x, 1.2));

        let short = Vec2::new(0.3, 0.4);
        assert_eq!(short.clamp_length(2.0), short);
    }

    #[test]
    fn midpoint_of_two_points() {
        let m = Vec2::new(100.0, 200.0).midpoint(Vec2::new(300.0, 100.0));
        assert!(close(m.x, 200.0));
        assert!(close(m.y, 150.0));
    }

    #[test]
    fn operators_compose() {
        let mut v = Vec2::new(1.0, 2.0) + Vec2::new(3.0, 4.0) * 2.0;
        v += Vec2::new(-1.0, -1.0);
        let v = (v - Vec2::new(0.0, 1.0)) / 2.0;
        assert!(close(v.x, 3.5));
        assert!(close(v.y, 4.0));
    }
}
