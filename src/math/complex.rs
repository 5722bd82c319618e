//! Complex numbers for Julia inverse iteration
//!
//! Structurally a Vector2d (real part in x0, imaginary part in x1) with one
//! extra operation: the principal square root.

use std::fmt;

use super::Vector2d;

/// Complex number `re + im·i`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex(Vector2d);

impl Complex {
    pub const fn new(re: f64, im: f64) -> Self {
        Complex(Vector2d::new(re, im))
    }

    pub fn re(self) -> f64 {
        self.0.x0
    }

    pub fn im(self) -> f64 {
        self.0.x1
    }

    pub fn as_vector(self) -> Vector2d {
        self.0
    }

    /// Principal square root
    ///
    /// `|z| = hypot(re, im)`, `re' = sqrt((re + |z|) / 2)`,
    /// `im' = sign(im) * sqrt((|z| - re) / 2)` where a zero imaginary part
    /// (either sign of zero) counts as positive.
    pub fn sqrt(self) -> Complex {
        let (x0, x1) = (self.re(), self.im());
        let len = x0.hypot(x1);
        let re = ((x0 + len) / 2.0).sqrt();
        let sign = if x1 < 0.0 { -1.0 } else { 1.0 };
        // len - x0 can dip a hair below zero when im == 0
        let im = sign * ((len - x0).max(0.0) / 2.0).sqrt();
        Complex::new(re, im)
    }
}

impl From<Vector2d> for Complex {
    fn from(v: Vector2d) -> Self {
        Complex(v)
    }
}

impl From<Complex> for Vector2d {
    fn from(c: Complex) -> Self {
        c.0
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
