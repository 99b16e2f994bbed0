//! Per-window curvature kernels
//!
//! Zevenbergen & Thorne (1987) fit a quadratic surface to the 3x3 window:
//!
//! ```text
//! m1 m2 m3
//! m4 m5 m6
//! m7 m8 m9
//! ```
//!
//! Partial derivatives, with cell resolution `res`:
//!   p  = dz/dx    = (m6 - m4) / (2*res)
//!   q  = dz/dy    = (m2 - m8) / (2*res)
//!   r  = d²z/dx²  = (m4 + m6 - 2*m5) / (2*res²)
//!   t  = d²z/dy²  = (m2 + m8 - 2*m5) / (2*res²)
//!   s  = d²z/dxdy = (m3 + m7 - m1 - m9) / (4*res²)
//!
//! Curvatures:
//!   Planform = -(q²r - 2pqs + p²t) / ((p² + q²) * sqrt(1 + p² + q²))
//!   Profile  = -(p²r + 2pqs + q²t) / ((p² + q²) * (1 + p² + q²)^1.5)
//!
//! Both are undefined where p² + q² = 0 (flat cells); kernels report NaN there.
//!
//! The McNab index works on an s×s window and needs no derivatives.

use demcurv_core::raster::Window;

use super::CurvatureVariant;

/// Edge-correction constant shared by the McNab and Bolstad indices, in meters
pub const EDGE_CORRECTION: f64 = 36.2;

/// Signature of a kernel evaluated on one window at a given resolution
pub type WindowKernel = fn(&Window, f64) -> f64;

/// How a variant turns a grid into its output
#[derive(Clone, Copy)]
pub enum KernelPlan {
    /// Evaluate a kernel independently on every cell's window
    PerWindow(WindowKernel),
    /// Two passes: focal mean of the grid, then an elementwise combination
    FocalDeviation,
}

/// Pick the kernel strategy for a variant
pub fn select_kernel(variant: CurvatureVariant) -> KernelPlan {
    match variant {
        CurvatureVariant::Planform => KernelPlan::PerWindow(planform),
        CurvatureVariant::Profile => KernelPlan::PerWindow(profile),
        CurvatureVariant::Total => KernelPlan::PerWindow(total),
        CurvatureVariant::McNab => KernelPlan::PerWindow(|w, _| mcnab(w)),
        CurvatureVariant::Bolstad => KernelPlan::FocalDeviation,
    }
}

/// Round to 6 decimal places
pub fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

/// First and second order partial derivatives of the fitted surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZtDerivatives {
    pub p: f64,
    pub q: f64,
    pub r: f64,
    pub t: f64,
    pub s: f64,
}

impl ZtDerivatives {
    /// Derivatives at the center of a 3x3 window
    pub fn from_window(window: &Window, res: f64) -> Self {
        debug_assert_eq!(window.size(), 3);
        let m = window.values();
        let (m1, m2, m3, m4, m5, m6, m7, m8, m9) =
            (m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8]);

        let res2 = res * res;
        Self {
            p: (m6 - m4) / (2.0 * res),
            q: (m2 - m8) / (2.0 * res),
            r: (m4 + m6 - 2.0 * m5) / (2.0 * res2),
            t: (m2 + m8 - 2.0 * m5) / (2.0 * res2),
            s: (m3 + m7 - m1 - m9) / (4.0 * res2),
        }
    }

    /// p² + q²
    pub fn gradient_squared(&self) -> f64 {
        self.p * self.p + self.q * self.q
    }

    /// Zero (or undefined) gradient leaves the curvature direction undefined
    fn is_singular(&self) -> bool {
        let g2 = self.gradient_squared();
        g2.is_nan() || g2 == 0.0
    }

    /// Unrounded planform curvature, `None` on a numeric singularity
    pub fn planform(&self) -> Option<f64> {
        if self.is_singular() {
            return None;
        }
        let Self { p, q, r, t, s } = *self;
        let g2 = self.gradient_squared();
        let num = q * q * r - 2.0 * p * q * s + p * p * t;
        let value = -num / (g2 * (1.0 + g2).sqrt());
        value.is_finite().then_some(value)
    }

    /// Unrounded profile curvature, `None` on a numeric singularity
    pub fn profile(&self) -> Option<f64> {
        if self.is_singular() {
            return None;
        }
        let Self { p, q, r, t, s } = *self;
        let g2 = self.gradient_squared();
        let num = p * p * r + 2.0 * p * q * s + q * q * t;
        let value = -num / (g2 * (1.0 + g2).powf(1.5));
        value.is_finite().then_some(value)
    }
}

/// Planform curvature rounded to 6 decimals, NaN where undefined
pub fn planform(window: &Window, res: f64) -> f64 {
    ZtDerivatives::from_window(window, res)
        .planform()
        .map_or(f64::NAN, round6)
}

/// Profile curvature rounded to 6 decimals, NaN where undefined
pub fn profile(window: &Window, res: f64) -> f64 {
    ZtDerivatives::from_window(window, res)
        .profile()
        .map_or(f64::NAN, round6)
}

/// Sum of the individually rounded planform and profile curvatures
pub fn total(window: &Window, res: f64) -> f64 {
    let d = ZtDerivatives::from_window(window, res);
    match (d.planform(), d.profile()) {
        (Some(plan), Some(prof)) => round6(plan) + round6(prof),
        _ => f64::NAN,
    }
}

/// McNab index: `(Σ 2·(center − x)) / 4 / 36.2` over every cell of the window
pub fn mcnab(window: &Window) -> f64 {
    let center = window.center();
    let sum: f64 = window.values().iter().map(|&x| (center - x) + (center - x)).sum();
    sum / 4.0 / EDGE_CORRECTION
}

/// Bolstad index for one cell from its elevation and focal mean
pub fn bolstad(z: f64, mean: f64) -> f64 {
    10000.0 * ((z - mean) / 1000.0 / EDGE_CORRECTION)
}
