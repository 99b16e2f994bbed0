//! Window extraction with edge padding
//!
//! A [`Window`] is the s×s neighborhood of a target cell flattened row-major,
//! top-left to bottom-right:
//!
//! ```text
//! m1 m2 m3
//! m4 m5 m6      (s = 3, center = m5)
//! m7 m8 m9
//! ```
//!
//! Positions that fall outside the grid are resolved by a [`PadPolicy`]. The
//! default pads with a constant 0, which keeps output grids the same shape as
//! the input but biases every cell within `(s - 1) / 2` of a border.

use serde::{Deserialize, Serialize};

use super::{CellValue, Grid, Neighborhood};
use crate::error::{Error, Result};

/// How out-of-bounds window positions are filled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PadPolicy {
    /// Fill with a fixed value
    Constant(f64),
    /// Repeat the nearest edge cell
    Replicate,
    /// Mirror about the edge cell, without repeating it
    Reflect,
}

impl Default for PadPolicy {
    fn default() -> Self {
        PadPolicy::Constant(0.0)
    }
}

impl PadPolicy {
    /// Map a possibly out-of-range index onto `0..n`, or `None` for a constant fill
    fn resolve(&self, i: isize, n: usize) -> Option<usize> {
        let n_i = n as isize;
        if (0..n_i).contains(&i) {
            return Some(i as usize);
        }
        match self {
            PadPolicy::Constant(_) => None,
            PadPolicy::Replicate => Some(i.clamp(0, n_i - 1) as usize),
            PadPolicy::Reflect => {
                if n == 1 {
                    return Some(0);
                }
                let period = 2 * (n_i - 1);
                let m = i.rem_euclid(period);
                let reflected = if m < n_i { m } else { period - m };
                Some(reflected as usize)
            }
        }
    }
}

/// Immutable s×s snapshot of a grid neighborhood
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    size: usize,
    values: Vec<f64>,
}

impl Window {
    /// Build a window from row-major values; `values.len()` must be `size²`
    pub fn from_values(size: usize, values: Vec<f64>) -> Result<Self> {
        Neighborhood::from_size(size)?;
        if values.len() != size * size {
            return Err(Error::invalid_argument(
                "window",
                values.len(),
                format!("expected {} values for a {}x{} window", size * size, size, size),
            ));
        }
        Ok(Self { size, values })
    }

    fn blank(neighborhood: Neighborhood) -> Self {
        Self {
            size: neighborhood.size(),
            values: vec![0.0; neighborhood.cell_count()],
        }
    }

    /// Side length s
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the target cell
    pub fn center(&self) -> f64 {
        self.values[self.values.len() / 2]
    }

    /// Value at zero-based row-major position `i`
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl<T: CellValue> Grid<T> {
    /// Extract the `size`×`size` window centered on (row, col).
    ///
    /// Fails with [`Error::InvalidArgument`] for an even or zero size and with
    /// [`Error::IndexOutOfBounds`] when the target cell is outside the grid.
    pub fn window(&self, row: usize, col: usize, size: usize, pad: PadPolicy) -> Result<Window> {
        let neighborhood = Neighborhood::from_size(size)?;
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        let mut window = Window::blank(neighborhood);
        self.fill_window(row, col, neighborhood, pad, &mut window);
        Ok(window)
    }

    /// Refill `window` in place for the target cell (row, col).
    ///
    /// `window` must have been created for `neighborhood` and (row, col) must lie
    /// inside the grid. Missing cells are read as NaN.
    pub fn fill_window(
        &self,
        row: usize,
        col: usize,
        neighborhood: Neighborhood,
        pad: PadPolicy,
        window: &mut Window,
    ) {
        debug_assert_eq!(window.size, neighborhood.size());
        debug_assert!(row < self.rows() && col < self.cols());

        let (rows, cols) = self.shape();
        let fill = match pad {
            PadPolicy::Constant(v) => v,
            _ => f64::NAN,
        };

        for (slot, (dr, dc)) in window.values.iter_mut().zip(neighborhood.offsets()) {
            let r = pad.resolve(row as isize + dr, rows);
            let c = pad.resolve(col as isize + dc, cols);
            *slot = match (r, c) {
                (Some(r), Some(c)) => {
                    // r < rows and c < cols by construction of `resolve`
                    let v = unsafe { self.get_unchecked(r, c) };
                    if self.is_missing(v) { f64::NAN } else { v.as_f64() }
                }
                _ => fill,
            };
        }
    }

    /// Allocate a reusable window buffer for `neighborhood`
    pub fn window_buffer(&self, neighborhood: Neighborhood) -> Window {
        Window::blank(neighborhood)
    }
}
