//! # demcurv core
//!
//! Core types and I/O shared by the demcurv crates.
//!
//! This crate provides:
//! - `Grid<T>`: a 2D elevation grid with cell resolution and nodata metadata
//! - `GeoTransform`: origin and per-axis cell resolution
//! - Window extraction with configurable edge padding
//! - The `Algorithm` trait implemented by every grid transform
//! - Native GeoTIFF reading and writing

pub mod error;
pub mod io;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{CellValue, GeoTransform, Grid, Neighborhood, PadPolicy, Window};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::raster::{CellValue, GeoTransform, Grid, PadPolicy, Window};
    pub use crate::Algorithm;
}

/// Core trait for grid transforms.
///
/// Algorithms are pure functions from an input grid and parameters to a new grid.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
