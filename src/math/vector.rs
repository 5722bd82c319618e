//! 2D vector value type

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Immutable 2-component real vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2d {
    pub x0: f64,
    pub x1: f64,
}

impl Vector2d {
    pub const ORIGIN: Vector2d = Vector2d { x0: 0.0, x1: 0.0 };

    pub const fn new(x0: f64, x1: f64) -> Self {
        Self { x0, x1 }
    }

    pub fn add(self, other: Vector2d) -> Vector2d {
        Vector2d::new(self.x0 + other.x0, self.x1 + other.x1)
    }

    pub fn subtract(self, other: Vector2d) -> Vector2d {
        Vector2d::new(self.x0 - other.x0, self.x1 - other.x1)
    }

    /// Both components as an array, in file order
    pub fn coords(self) -> [f64; 2] {
        [self.x0, self.x1]
    }

    pub fn is_finite(self) -> bool {
        self.x0.is_finite() && self.x1.is_finite()
    }
}

impl Add for Vector2d {
    type Output = Vector2d;

    fn add(self, rhs: Vector2d) -> Vector2d {
        Vector2d::add(self, rhs)
    }
}

impl Sub for Vector2d {
    type Output = Vector2d;

    fn sub(self, rhs: Vector2d) -> Vector2d {
        self.subtract(rhs)
    }
}

impl Neg for Vector2d {
    type Output = Vector2d;

    fn neg(self) -> Vector2d {
        Vector2d::new(-self.x0, -self.x1)
    }
}

/// Text form used by the description file format: `x0, x1`
impl fmt::Display for Vector2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x0, self.x1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_subtract() {
        let a = Vector2d::new(1.0, 2.0);
        let b = Vector2d::new(3.0, 5.0);
        assert_eq!(a.add(b), Vector2d::new(4.0, 7.0));
        assert_eq!(b.subtract(a), Vector2d::new(2.0, 3.0));
        assert_eq!(a + b, b + a);
        assert_eq!(-a, Vector2d::new(-1.0, -2.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector2d::new(0.5, -1.0).to_string(), "0.5, -1");
    }
}
