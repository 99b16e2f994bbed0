//! Bolstad concavity/convexity index
//!
//! Computed at grid level rather than per window:
//!
//! ```text
//! bolstad = 10000 * ((z - focal_mean(z, s)) / 1000 / 36.2)
//! ```
//!
//! Pass one builds the focal mean grid with the shared window policy, pass two
//! combines it elementwise with the input elevations.

use demcurv_core::raster::{CellValue, Grid, PadPolicy};
use demcurv_core::Result;
use ndarray::Zip;

use super::kernels;
use crate::statistics::focal_mean;

/// Bolstad index of every cell of `dem`
pub fn bolstad<T: CellValue>(dem: &Grid<T>, window_size: usize, pad: PadPolicy) -> Result<Grid<f64>> {
    let mut output = focal_mean(dem, window_size, pad)?;

    let nodata = dem.nodata();
    Zip::from(output.data_mut())
        .and(dem.data())
        .for_each(|mean, &z| {
            *mean = if z.is_missing(nodata) {
                f64::NAN
            } else {
                kernels::bolstad(z.as_f64(), *mean)
            };
        });

    Ok(output)
}
