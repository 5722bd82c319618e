//! Math primitives for the chaos game
//!
//! Small immutable value types:
//! - Vector2d: points and translations
//! - Complex: points in the complex plane, with principal square root
//! - Matrix2x2: the linear part of an affine map

pub mod complex;
pub mod matrix;
pub mod vector;

pub use complex::Complex;
pub use matrix::Matrix2x2;
pub use vector::Vector2d;
