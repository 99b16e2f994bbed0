//! Focal statistics over elevation grids
//!
//! - **focal**: moving-window mean sharing the curvature window policy

pub mod focal;

pub use focal::focal_mean;
