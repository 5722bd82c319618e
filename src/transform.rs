//! Point-mapping transforms for the chaos game
//!
//! Two kinds of map are supported:
//! - Affine: `x -> A·x + b`
//! - Julia: `z -> ±sqrt(z - c)`, one inverse branch of `z -> z² + c`
//!
//! Julia sets are sampled by pairing both signs for the same center.

use std::fmt;

use crate::math::{Complex, Matrix2x2, Vector2d};

/// Which square-root branch a Julia transform takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JuliaSign {
    Negative,
    Positive,
}

impl JuliaSign {
    pub fn factor(self) -> f64 {
        match self {
            JuliaSign::Negative => -1.0,
            JuliaSign::Positive => 1.0,
        }
    }
}

/// Transform kind, as named by the file keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Affine2D,
    Julia,
}

impl TransformKind {
    /// Keyword written at the top of a description file
    pub fn keyword(self) -> &'static str {
        match self {
            TransformKind::Affine2D => "Affine2D",
            TransformKind::Julia => "Julia",
        }
    }

    /// Case-insensitive keyword lookup
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "affine2d" => Some(TransformKind::Affine2D),
            "julia" => Some(TransformKind::Julia),
            _ => None,
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform2D {
    Affine { matrix: Matrix2x2, vector: Vector2d },
    Julia { center: Complex, sign: JuliaSign },
}

impl Transform2D {
    pub fn affine(matrix: Matrix2x2, vector: Vector2d) -> Self {
        Transform2D::Affine { matrix, vector }
    }

    pub fn julia(center: Complex, sign: JuliaSign) -> Self {
        Transform2D::Julia { center, sign }
    }

    /// Both branches for one center, negative sign first
    pub fn julia_pair(center: Complex) -> [Transform2D; 2] {
        [
            Transform2D::julia(center, JuliaSign::Negative),
            Transform2D::julia(center, JuliaSign::Positive),
        ]
    }

    pub fn transform(&self, point: Vector2d) -> Vector2d {
        match self {
            Transform2D::Affine { matrix, vector } => matrix.multiply(point).add(*vector),
            Transform2D::Julia { center, sign } => {
                let root = Complex::from(point.subtract(center.as_vector())).sqrt();
                let k = sign.factor();
                Vector2d::new(k * root.re(), k * root.im())
            }
        }
    }

    pub fn kind(&self) -> TransformKind {
        match self {
            Transform2D::Affine { .. } => TransformKind::Affine2D,
            Transform2D::Julia { .. } => TransformKind::Julia,
        }
    }

    /// Raw parameters as an editor shows them: six numbers for an affine
    /// map (matrix row-major, then vector), two for a Julia center
    pub fn coefficients(&self) -> Vec<f64> {
        match self {
            Transform2D::Affine { matrix, vector } => {
                let mut out = matrix.coords().to_vec();
                out.extend_from_slice(&vector.coords());
                out
            }
            Transform2D::Julia { center, .. } => vec![center.re(), center.im()],
        }
    }
}

/// One line of the description file format
impl fmt::Display for Transform2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform2D::Affine { matrix, vector } => write!(f, "{}, {}", matrix, vector),
            Transform2D::Julia { center, .. } => write!(f, "{}", center),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affine_transform() {
        let t = Transform2D::affine(Matrix2x2::new(2.0, 2.0, 4.0, 5.0), Vector2d::new(3.0, 4.0));
        assert_eq!(t.transform(Vector2d::new(1.0, 2.0)), Vector2d::new(9.0, 18.0));
    }

    #[test]
    fn test_julia_sign_symmetry() {
        let c = Complex::new(-0.74543, 0.11301);
        let [neg, pos] = Transform2D::julia_pair(c);
        for &(x, y) in &[(0.4, 0.2), (-1.0, 0.3), (0.0, 0.0), (1.2, -0.8)] {
            let p = Vector2d::new(x, y);
            assert_eq!(pos.transform(p), -neg.transform(p));
        }
    }

    #[test]
    fn test_julia_is_inverse_of_square_plus_c() {
        let c = Complex::new(0.3, 0.6);
        let z = Vector2d::new(0.4, 0.2);
        let w = Transform2D::julia(c, JuliaSign::Positive).transform(z);
        // w² + c == z
        let sq = Vector2d::new(w.x0 * w.x0 - w.x1 * w.x1, 2.0 * w.x0 * w.x1);
        let back = sq + c.as_vector();
        assert!((back.x0 - z.x0).abs() < 1e-12);
        assert!((back.x1 - z.x1).abs() < 1e-12);
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TransformKind::from_keyword("AFFINE2D"), Some(TransformKind::Affine2D));
        assert_eq!(TransformKind::from_keyword("julia"), Some(TransformKind::Julia));
        assert_eq!(TransformKind::from_keyword("mandelbrot"), None);
    }

    #[test]
    fn test_coefficients() {
        let t = Transform2D::affine(Matrix2x2::new(1.0, 2.0, 3.0, 4.0), Vector2d::new(5.0, 6.0));
        assert_eq!(t.coefficients(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let j = Transform2D::julia(Complex::new(-0.5, 0.25), JuliaSign::Negative);
        assert_eq!(j.coefficients(), vec![-0.5, 0.25]);
        assert_eq!(j.to_string(), "-0.5, 0.25");
    }
}
