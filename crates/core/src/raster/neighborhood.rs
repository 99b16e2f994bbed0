//! Square focal neighborhoods

use crate::error::{Error, Result};

/// Defines a square neighborhood pattern around a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// Square neighborhood of given radius, side `2 * radius + 1`
    Square(usize),
}

impl Neighborhood {
    /// Square neighborhood from an odd side length `size >= 1`
    pub fn from_size(size: usize) -> Result<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(Error::invalid_argument(
                "window_size",
                size,
                "window size must be a positive odd number",
            ));
        }
        Ok(Neighborhood::Square(size / 2))
    }

    /// Get the radius of the neighborhood
    pub fn radius(&self) -> usize {
        let Neighborhood::Square(r) = self;
        *r
    }

    /// Side length of the neighborhood
    pub fn size(&self) -> usize {
        self.radius() * 2 + 1
    }

    /// Number of cells including the center
    pub fn cell_count(&self) -> usize {
        self.size() * self.size()
    }

    /// Relative (row, col) positions, row-major from top-left to bottom-right
    pub fn offsets(&self) -> impl Iterator<Item = (isize, isize)> {
        let r = self.radius() as isize;
        (-r..=r).flat_map(move |dr| (-r..=r).map(move |dc| (dr, dc)))
    }
}
