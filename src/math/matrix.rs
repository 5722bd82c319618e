//! 2x2 real matrix

use std::fmt;

use super::Vector2d;

/// Row-major 2x2 matrix `[[a00, a01], [a10, a11]]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2x2 {
    pub a00: f64,
    pub a01: f64,
    pub a10: f64,
    pub a11: f64,
}

impl Matrix2x2 {
    pub const IDENTITY: Matrix2x2 = Matrix2x2::new(1.0, 0.0, 0.0, 1.0);

    pub const fn new(a00: f64, a01: f64, a10: f64, a11: f64) -> Self {
        Self { a00, a01, a10, a11 }
    }

    /// Diagonal scaling matrix
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy)
    }

    pub fn multiply(&self, v: Vector2d) -> Vector2d {
        Vector2d::new(
            self.a00 * v.x0 + self.a01 * v.x1,
            self.a10 * v.x0 + self.a11 * v.x1,
        )
    }

    /// Elements in file order
    pub fn coords(&self) -> [f64; 4] {
        [self.a00, self.a01, self.a10, self.a11]
    }
}

impl fmt::Display for Matrix2x2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.a00, self.a01, self.a10, self.a11)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply() {
        let m = Matrix2x2::new(2.0, 2.0, 4.0, 5.0);
        assert_eq!(m.multiply(Vector2d::new(1.0, 2.0)), Vector2d::new(6.0, 14.0));
    }

    #[test]
    fn test_identity_and_scale() {
        let v = Vector2d::new(-3.5, 7.25);
        assert_eq!(Matrix2x2::IDENTITY.multiply(v), v);
        assert_eq!(Matrix2x2::scale(2.0, 0.5).multiply(v), Vector2d::new(-7.0, 3.625));
    }
}
