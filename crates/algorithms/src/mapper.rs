//! Grid mapper: apply a window kernel at every cell
//!
//! The output grid is allocated once with the input's shape and transform, and
//! each row of it is handed to exactly one worker as a disjoint `&mut` slice.
//! Kernels only ever see windows of raw input elevations, so cells never
//! depend on each other's results.

use crate::maybe_rayon::*;
use demcurv_core::raster::{CellValue, Grid, Neighborhood, PadPolicy, Window};
use demcurv_core::{Error, Result};

/// Map `kernel` over the `neighborhood` window of every cell of `grid`.
///
/// Out-of-bounds window positions are filled according to `pad`. The result has
/// the same shape and transform as `grid` and NaN as its nodata value.
pub fn map_windows<T, F>(
    grid: &Grid<T>,
    neighborhood: Neighborhood,
    pad: PadPolicy,
    kernel: F,
) -> Result<Grid<f64>>
where
    T: CellValue,
    F: Fn(&Window) -> f64 + Sync,
{
    grid.validate()?;
    let (rows, cols) = grid.shape();

    let mut output = grid.with_same_meta::<f64>(rows, cols);
    output.set_nodata(Some(f64::NAN));

    let cells = output
        .data_mut()
        .as_slice_mut()
        .ok_or_else(|| Error::Other("output grid is not contiguous".into()))?;

    cells
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, row_out)| {
            let mut window = grid.window_buffer(neighborhood);
            for (col, cell) in row_out.iter_mut().enumerate() {
                grid.fill_window(row, col, neighborhood, pad, &mut window);
                *cell = kernel(&window);
            }
        });

    Ok(output)
}
