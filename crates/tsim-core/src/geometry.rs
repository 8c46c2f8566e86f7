//! 2D vector math used by the collision detector and vehicle state.
//!
//! `Vector2d` uses `f64` throughout: collision contact points are compared
//! against edge lengths of a few metres and single precision loses the
//! parametric distances after the back-off step.

use std::ops::{Add, Mul, Neg, Sub};

/// A point or direction in the world plane, metres.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2d {
    pub x: f64,
    pub y: f64,
}

impl Vector2d {
    pub const ZERO: Vector2d = Vector2d { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `yaw` (radians, counter-clockwise from +x).
    #[inline]
    pub fn from_yaw(yaw: f64) -> Self {
        Self { x: yaw.cos(), y: yaw.sin() }
    }

    /// Rotate counter-clockwise by `angle` radians around the origin.
    #[inline]
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Shift by `offset`.
    #[inline]
    pub fn translate(self, offset: Vector2d) -> Self {
        self + offset
    }

    #[inline]
    pub fn dot(self, other: Vector2d) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3D cross product; the 2×2 determinant `|self other|`.
    #[inline]
    pub fn cross(self, other: Vector2d) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len <= f64::EPSILON {
            return None;
        }
        Some(self * (1.0 / len))
    }
}

impl Add for Vector2d {
    type Output = Vector2d;
    #[inline]
    fn add(self, rhs: Vector2d) -> Vector2d {
        Vector2d::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2d {
    type Output = Vector2d;
    #[inline]
    fn sub(self, rhs: Vector2d) -> Vector2d {
        Vector2d::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2d {
    type Output = Vector2d;
    #[inline]
    fn mul(self, rhs: f64) -> Vector2d {
        Vector2d::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2d {
    type Output = Vector2d;
    #[inline]
    fn neg(self) -> Vector2d {
        Vector2d::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vector2d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
