//! Chaos game description: bounding box plus transform list
//!
//! A description is validated once at construction and never changes
//! afterwards. Its `Display` output is exactly the text file format.

use std::fmt;

use thiserror::Error;

use crate::math::{Complex, Matrix2x2, Vector2d};
use crate::transform::{JuliaSign, Transform2D, TransformKind};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DescriptionError {
    #[error("Invalid bounds: min ({min}) must be strictly below max ({max}) on both axes")]
    InvalidBounds { min: Vector2d, max: Vector2d },
    #[error("Description has no transforms")]
    EmptyTransformList,
    #[error("Cannot mix {first} and {other} transforms in one description")]
    MixedTransformKinds {
        first: TransformKind,
        other: TransformKind,
    },
    #[error("Row {row} has {len} values, expected 2 (Julia) or 6 (Affine2D)")]
    BadRowLength { row: usize, len: usize },
    #[error("Description is not a Julia set")]
    NotJulia,
    #[error("Julia description needs exactly one center as a negative/positive pair, got {count} transforms")]
    InvalidJuliaPair { count: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChaosGameDescription {
    min: Vector2d,
    max: Vector2d,
    transforms: Vec<Transform2D>,
}

impl ChaosGameDescription {
    /// Build a description, enforcing `min < max` on both axes, a non-empty
    /// transform list, and a single transform kind.
    ///
    /// A Julia description is exactly `[julia(c, Negative), julia(c, Positive)]`
    /// for one center `c`, which is all the file format can hold.
    pub fn new(
        min: Vector2d,
        max: Vector2d,
        transforms: Vec<Transform2D>,
    ) -> Result<Self, DescriptionError> {
        // Written as negations so NaN bounds are rejected too
        if !(min.x0 < max.x0) || !(min.x1 < max.x1) || !min.is_finite() || !max.is_finite() {
            return Err(DescriptionError::InvalidBounds { min, max });
        }

        let first = transforms
            .first()
            .ok_or(DescriptionError::EmptyTransformList)?
            .kind();
        if let Some(other) = transforms.iter().map(Transform2D::kind).find(|k| *k != first) {
            return Err(DescriptionError::MixedTransformKinds { first, other });
        }
        if first == TransformKind::Julia && !is_julia_pair(&transforms) {
            return Err(DescriptionError::InvalidJuliaPair {
                count: transforms.len(),
            });
        }

        Ok(Self { min, max, transforms })
    }

    /// Literal tables known to satisfy the invariants
    pub(crate) fn new_unchecked(min: Vector2d, max: Vector2d, transforms: Vec<Transform2D>) -> Self {
        debug_assert!(Self::new(min, max, transforms.clone()).is_ok());
        Self { min, max, transforms }
    }

    /// Build from editor rows: 6 numbers per affine map, or a single
    /// 2-number Julia center (which becomes a negative/positive pair)
    pub fn from_rows(
        min: Vector2d,
        max: Vector2d,
        rows: &[Vec<f64>],
    ) -> Result<Self, DescriptionError> {
        let mut transforms = Vec::with_capacity(rows.len() * 2);
        for (i, row) in rows.iter().enumerate() {
            match row.as_slice() {
                &[re, im] => transforms.extend(Transform2D::julia_pair(Complex::new(re, im))),
                &[a00, a01, a10, a11, v0, v1] => transforms.push(Transform2D::affine(
                    Matrix2x2::new(a00, a01, a10, a11),
                    Vector2d::new(v0, v1),
                )),
                other => {
                    return Err(DescriptionError::BadRowLength {
                        row: i + 1,
                        len: other.len(),
                    })
                }
            }
        }
        Self::new(min, max, transforms)
    }

    pub fn min(&self) -> Vector2d {
        self.min
    }

    pub fn max(&self) -> Vector2d {
        self.max
    }

    pub fn transforms(&self) -> &[Transform2D] {
        &self.transforms
    }

    /// Kind of every transform in the list
    pub fn kind(&self) -> TransformKind {
        self.transforms[0].kind()
    }

    pub fn is_julia(&self) -> bool {
        self.kind() == TransformKind::Julia
    }

    /// Parameter rows as written to disk: one row per affine map, or the
    /// single Julia center (the sign pair shares it)
    pub fn transform_rows(&self) -> Vec<Vec<f64>> {
        match self.kind() {
            TransformKind::Affine2D => self.transforms.iter().map(Transform2D::coefficients).collect(),
            TransformKind::Julia => vec![self.transforms[0].coefficients()],
        }
    }

    /// Same bounds, with every Julia transform moved to a new center
    pub fn with_julia_center(&self, center: Complex) -> Result<Self, DescriptionError> {
        if !self.is_julia() {
            return Err(DescriptionError::NotJulia);
        }
        let transforms = self
            .transforms
            .iter()
            .map(|t| match t {
                Transform2D::Julia { sign, .. } => Transform2D::julia(center, *sign),
                other => *other,
            })
            .collect();
        Self::new(self.min, self.max, transforms)
    }
}

fn is_julia_pair(transforms: &[Transform2D]) -> bool {
    match transforms {
        [
            Transform2D::Julia { center: a, sign: JuliaSign::Negative },
            Transform2D::Julia { center: b, sign: JuliaSign::Positive },
        ] => a == b,
        _ => false,
    }
}

/// Text projection in the description file grammar
impl fmt::Display for ChaosGameDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind().keyword())?;
        writeln!(f, "{}", self.min)?;
        writeln!(f, "{}", self.max)?;
        for row in self.transform_rows() {
            let line: Vec<String> = row.iter().map(f64::to_string).collect();
            writeln!(f, "{}", line.join(", "))?;
        }
        Ok(())
    }
}
