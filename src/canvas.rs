//! Discrete bitmap for plotting chaos game points
//!
//! The bounding box `[min, max]` is mapped onto pixel indices
//! `[0, width-1] x [0, height-1]` by a fixed affine map built at construction:
//!
//! ```text
//! scale_x = (width - 1) / (max.x - min.x)      translate_x = -min.x * scale_x
//! scale_y = (height - 1) / (max.y - min.y)     translate_y = -min.y * scale_y
//! ```
//!
//! The grid is indexed `grid[iy][ix]` (rows are y, columns are x).
//! Points that land outside the grid are dropped: writes do nothing and
//! reads return 0.

use crate::math::{Matrix2x2, Vector2d};
use crate::transform::Transform2D;

/// Mapped coordinates within this distance of an integer snap to it, so
/// the bounding-box corners land exactly on the edge pixels
const SNAP_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct ChaosCanvas {
    width: usize,
    height: usize,
    min: Vector2d,
    max: Vector2d,
    grid: Vec<Vec<u8>>,
    coords_to_indices: Transform2D,
}

impl ChaosCanvas {
    pub fn new(width: usize, height: usize, min: Vector2d, max: Vector2d) -> Self {
        let scale_x = (width as f64 - 1.0) / (max.x0 - min.x0);
        let scale_y = (height as f64 - 1.0) / (max.x1 - min.x1);
        let coords_to_indices = Transform2D::affine(
            Matrix2x2::scale(scale_x, scale_y),
            Vector2d::new(-min.x0 * scale_x, -min.x1 * scale_y),
        );

        Self {
            width,
            height,
            min,
            max,
            grid: vec![vec![0; width]; height],
            coords_to_indices,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn min(&self) -> Vector2d {
        self.min
    }

    pub fn max(&self) -> Vector2d {
        self.max
    }

    /// Pixel index `(ix, iy)` for a point, or None if it falls off the grid
    pub fn index_of(&self, point: Vector2d) -> Option<(usize, usize)> {
        let mapped = self.coords_to_indices.transform(point);
        let ix = to_index(mapped.x0, self.width)?;
        let iy = to_index(mapped.x1, self.height)?;
        Some((ix, iy))
    }

    /// 1 if the pixel under `point` is set, 0 if unset or off the grid
    pub fn get_pixel(&self, point: Vector2d) -> u8 {
        match self.index_of(point) {
            Some((ix, iy)) => self.grid[iy][ix],
            None => 0,
        }
    }

    /// Set the pixel under `point`; off-grid points are ignored
    pub fn put_pixel(&mut self, point: Vector2d) {
        if let Some((ix, iy)) = self.index_of(point) {
            self.grid[iy][ix] = 1;
        }
    }

    /// Direct cell read by index; out-of-range reads return 0
    pub fn cell(&self, ix: usize, iy: usize) -> u8 {
        self.grid
            .get(iy)
            .and_then(|row| row.get(ix))
            .copied()
            .unwrap_or(0)
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(0);
        }
    }

    /// Rows of cells, `raw_grid()[iy][ix]`, row 0 at `min.y`
    pub fn raw_grid(&self) -> &[Vec<u8>] {
        &self.grid
    }

    /// Number of set cells
    pub fn count_set(&self) -> usize {
        self.grid
            .iter()
            .map(|row| row.iter().filter(|&&c| c != 0).count())
            .sum()
    }

    /// Text rendering: `X` for set cells, space otherwise, highest y first
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.grid.iter().rev() {
            out.extend(row.iter().map(|&c| if c != 0 { 'X' } else { ' ' }));
            out.push('\n');
        }
        out
    }
}

fn to_index(value: f64, dim: usize) -> Option<usize> {
    if !value.is_finite() {
        return None;
    }
    let nearest = value.round();
    let value = if (value - nearest).abs() < SNAP_EPSILON {
        nearest
    } else {
        value
    };
    // Truncation toward zero: anything in (-1, 0) lands on index 0
    let idx = value.trunc();
    if idx >= 0.0 && idx < dim as f64 {
        Some(idx as usize)
    } else {
        None
    }
}
