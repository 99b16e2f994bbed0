//! Focal (moving window) mean
//!
//! The arithmetic mean of the s×s window around each cell, using the same
//! window extraction and padding as the curvature kernels. Padded positions
//! count toward the mean. A missing cell anywhere in the window makes the
//! result missing.

use crate::mapper::map_windows;
use demcurv_core::raster::{CellValue, Grid, Neighborhood, PadPolicy, Window};
use demcurv_core::Result;

/// Mean of every value in the window
pub fn window_mean(window: &Window) -> f64 {
    window.values().iter().sum::<f64>() / window.len() as f64
}

/// Compute the focal mean of a grid
///
/// # Arguments
/// * `grid` - Input grid
/// * `window_size` - Odd side length of the square window (1, 3, 5, ...)
/// * `pad` - Fill policy for window positions outside the grid
///
/// # Returns
/// Grid of window means with NaN as nodata
pub fn focal_mean<T: CellValue>(grid: &Grid<T>, window_size: usize, pad: PadPolicy) -> Result<Grid<f64>> {
    let neighborhood = Neighborhood::from_size(window_size)?;
    map_windows(grid, neighborhood, pad, window_mean)
}
