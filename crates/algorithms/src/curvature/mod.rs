//! Surface curvature from DEMs
//!
//! Five variants share one traversal:
//!
//! | variant    | window | method                                        |
//! |------------|--------|-----------------------------------------------|
//! | `planform` | 3x3    | Zevenbergen & Thorne quadratic fit            |
//! | `profile`  | 3x3    | Zevenbergen & Thorne quadratic fit            |
//! | `total`    | 3x3    | rounded planform + rounded profile            |
//! | `mcnab`    | s×s    | symmetric difference to the window center     |
//! | `bolstad`  | s×s    | deviation from the focal mean (two passes)    |
//!
//! Windows that extend past the grid edge are padded (constant 0 by default),
//! so output grids always match the input shape. Values within `(s - 1) / 2`
//! cells of a border are biased by the padding.
//!
//! Flat cells (zero gradient) have no defined planform or profile direction and
//! come out as NaN, the output nodata value.

mod bolstad;
pub mod kernels;
mod variant;

pub use kernels::{round6, select_kernel, KernelPlan, ZtDerivatives, EDGE_CORRECTION};
pub use variant::CurvatureVariant;

use demcurv_core::raster::{CellValue, Grid, Neighborhood, PadPolicy};
use demcurv_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::mapper::map_windows;

/// Parameters for curvature calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvatureParams {
    /// Curvature metric to compute
    pub variant: CurvatureVariant,
    /// Odd window side for `mcnab` and `bolstad`; the other variants always use 3
    pub window_size: usize,
    /// Fill policy for window positions outside the grid
    pub pad: PadPolicy,
    /// Cell resolution in map units; `None` takes it from the grid transform
    pub resolution: Option<f64>,
}

impl Default for CurvatureParams {
    fn default() -> Self {
        Self {
            variant: CurvatureVariant::default(),
            window_size: 3,
            pad: PadPolicy::default(),
            resolution: None,
        }
    }
}

impl CurvatureParams {
    pub fn new(variant: CurvatureVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Check the window size the variant will actually use
    pub fn validate(&self) -> Result<Neighborhood> {
        Neighborhood::from_size(self.variant.window_size(self.window_size))
    }
}

/// Curvature algorithm
#[derive(Debug, Clone, Default)]
pub struct Curvature;

impl Algorithm for Curvature {
    type Input = Grid<f64>;
    type Output = Grid<f64>;
    type Params = CurvatureParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Curvature"
    }

    fn description(&self) -> &'static str {
        "Planform, profile, total, McNab or Bolstad curvature from a DEM"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        curvature(&input, params)
    }
}

/// Resolve and check the cell resolution used by the derivative kernels
fn resolve_resolution<T: CellValue>(dem: &Grid<T>, requested: Option<f64>) -> Result<f64> {
    let res = match requested {
        Some(res) => res,
        None => {
            let transform = dem.transform();
            if !transform.is_square() {
                let (x, y) = transform.resolution();
                warn!("Non-square cells ({} x {}), using x resolution {}", x, y, x);
            }
            transform.cell_size()
        }
    };

    if !res.is_finite() || res <= 0.0 {
        return Err(Error::invalid_argument(
            "resolution",
            res,
            "cell resolution must be a positive finite number",
        ));
    }
    Ok(res)
}

/// Calculate surface curvature from a DEM
///
/// All arguments are validated before the grid is traversed; on error no
/// output grid is allocated.
///
/// # Arguments
/// * `dem` - Input DEM grid
/// * `params` - Variant, window size, pad policy and optional resolution
///
/// # Returns
/// Grid with the same shape and transform as `dem`, NaN as nodata
pub fn curvature<T: CellValue>(dem: &Grid<T>, params: CurvatureParams) -> Result<Grid<f64>> {
    dem.validate()?;
    let neighborhood = params.validate()?;
    let res = resolve_resolution(dem, params.resolution)?;

    debug!(
        "{} curvature over {}x{} cells, window {}, resolution {}",
        params.variant,
        dem.rows(),
        dem.cols(),
        neighborhood.size(),
        res
    );

    match select_kernel(params.variant) {
        KernelPlan::PerWindow(kernel) => {
            map_windows(dem, neighborhood, params.pad, |w| kernel(w, res))
        }
        KernelPlan::FocalDeviation => bolstad::bolstad(dem, neighborhood.size(), params.pad),
    }
}

/// Curvature by variant name with a constant pad value
///
/// `variant` must be one of `planform`, `profile`, `total`, `mcnab` or
/// `bolstad` (exact, case-sensitive). `window_size` only affects `mcnab` and
/// `bolstad`. The resolution is taken from the grid.
pub fn compute_curvature<T: CellValue>(
    dem: &Grid<T>,
    window_size: usize,
    variant: &str,
    pad_value: f64,
) -> Result<Grid<f64>> {
    let variant: CurvatureVariant = variant.parse()?;
    curvature(
        dem,
        CurvatureParams {
            variant,
            window_size,
            pad: PadPolicy::Constant(pad_value),
            resolution: None,
        },
    )
}
