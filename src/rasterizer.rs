//! Analytic anti-aliased rasterization.
//!
//! Every line segment of a tesselated outline is walked across the pixel
//! grid with a parameter-space raycast: for each axis the parameter of
//! the next integer grid crossing is tracked, and the smaller of the two
//! is advanced. Each sub-segment between crossings lies inside exactly
//! one cell and deposits a signed coverage pair there:
//!
//! - `cover` accumulates the sub-segment's y extent (sign = winding),
//! - `area` accumulates the sub-pixel area to the right of the segment,
//!   `(1 - xAvg) * yDiff`.
//!
//! A row-wise running sum then integrates the cells into 8-bit coverage
//! under the non-zero winding rule (`|accum + area|`).
//!
//! Purely horizontal segments deposit nothing: they advance no coverage
//! and their area contribution stays confined to a single row.

use crate::basics::{uround, Point};
use crate::error::Result;
use crate::outline::Outline;

/// One pixel's rasterization accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cell {
    pub area: f64,
    pub cover: f64,
}

/// A zero-filled cell grid owned by a single rasterization.
#[derive(Debug)]
pub struct Raster {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Raster {
    /// Allocate a `width x height` grid of cleared cells.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = width as usize * height as usize;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize(len, Cell::default());
        Ok(Self {
            cells,
            width: width as usize,
            height: height as usize,
        })
    }

    #[cfg(test)]
    fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    /// Rasterize every line segment of a tesselated outline.
    ///
    /// All points must already be clamped into the grid.
    pub fn draw_outline(&mut self, outline: &Outline) {
        for line in &outline.lines {
            self.draw_line(outline.point(line.beg), outline.point(line.end));
        }
    }

    /// Deposit one sub-segment into the cell at `(px, py)`.
    #[inline]
    fn draw_dot(&mut self, px: usize, py: usize, x_avg: f64, y_diff: f64) {
        debug_assert!(px < self.width && py < self.height);
        let cell = &mut self.cells[py * self.width + px];
        cell.cover += y_diff;
        cell.area += (1.0 - x_avg) * y_diff;
    }

    /// Walk a line segment across every pixel boundary it crosses.
    pub fn draw_line(&mut self, origin: Point, goal: Point) {
        let delta_x = goal.x - origin.x;
        let delta_y = goal.y - origin.y;
        if delta_y == 0.0 {
            return;
        }

        let step_x = if delta_x >= 0.0 { 1.0 } else { -1.0 };
        let step_y = if delta_y >= 0.0 { 1.0 } else { -1.0 };
        let mut px = origin.x.floor();
        let mut py = origin.y.floor();

        // Parameter gap between successive crossings per axis, and the
        // parameter of the first crossing.
        let gap_x = if delta_x != 0.0 {
            1.0 / delta_x.abs()
        } else {
            0.0
        };
        let gap_y = 1.0 / delta_y.abs();
        let mut next_x = if delta_x > 0.0 {
            (px + 1.0 - origin.x) * gap_x
        } else if delta_x < 0.0 {
            (origin.x - px) * gap_x
        } else {
            f64::INFINITY
        };
        let mut next_y = if delta_y > 0.0 {
            (py + 1.0 - origin.y) * gap_y
        } else {
            (origin.y - py) * gap_y
        };

        let mut t = 0.0;
        loop {
            let crossing = next_x.min(next_y).min(1.0);
            // Average x offset of the sub-segment within its pixel, and
            // its signed y extent.
            let x_avg = origin.x + delta_x * 0.5 * (t + crossing) - px;
            let y_diff = delta_y * (crossing - t);
            self.draw_dot(px as usize, py as usize, x_avg, y_diff);
            if crossing >= 1.0 {
                break;
            }
            t = crossing;
            if next_x < next_y {
                next_x += gap_x;
                px += step_x;
            } else {
                next_y += gap_y;
                py += step_y;
            }
        }
    }

    /// Integrate the cell grid into an 8-bit coverage image.
    ///
    /// `image` must hold `width * height` bytes in row-major order. When
    /// `flip_rows` is set the cell rows are written bottom-up, producing
    /// the vertically mirrored image a downward y axis calls for.
    pub fn integrate(&self, image: &mut [u8], flip_rows: bool) {
        debug_assert_eq!(image.len(), self.width * self.height);
        for row in 0..self.height {
            let out_row = if flip_rows {
                self.height - 1 - row
            } else {
                row
            };
            let cells = &self.cells[row * self.width..(row + 1) * self.width];
            let out = &mut image[out_row * self.width..(out_row + 1) * self.width];
            let mut accum = 0.0f64;
            for (cell, pixel) in cells.iter().zip(out.iter_mut()) {
                let value = (accum + cell.area).abs().clamp(0.0, 1.0);
                *pixel = uround(value * 255.0) as u8;
                accum += cell.cover;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
