//! # demcurv algorithms
//!
//! Moving-window curvature metrics over digital elevation models.
//!
//! - **curvature**: planform, profile and total curvature (Zevenbergen & Thorne
//!   1987) plus the McNab and Bolstad concavity/convexity indices
//! - **statistics**: focal mean used by the Bolstad index
//!
//! Every cell is computed independently from raw elevations. With the default
//! `parallel` feature rows are distributed over the rayon thread pool.

mod maybe_rayon;
pub mod curvature;
pub mod mapper;
pub mod statistics;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::curvature::{
        compute_curvature, curvature, Curvature, CurvatureParams, CurvatureVariant,
    };
    pub use crate::statistics::focal_mean;
    pub use demcurv_core::prelude::*;
}
