//! Cell value trait for elevation grids

use num_traits::{Float, NumCast};
use std::fmt::Debug;

/// Trait for types that can be stored in an elevation grid cell.
///
/// Elevations are real-valued, so only floating point types qualify. NaN is
/// the missing-value sentinel throughout: it marks nodata on input and
/// numerically undefined cells (flat gradients) on output.
pub trait CellValue: Float + Debug + Send + Sync + 'static {
    /// Missing-value sentinel for this type
    fn missing() -> Self {
        Self::nan()
    }

    /// Check if this value is missing, either NaN or equal to `nodata`
    fn is_missing(&self, nodata: Option<Self>) -> bool {
        if self.is_nan() {
            return true;
        }
        match nodata {
            Some(nd) => (*self - nd).abs() < Self::epsilon() * Self::from_f64(100.0),
            None => false,
        }
    }

    /// Convert to f64, yielding NaN if the value is not representable
    fn as_f64(self) -> f64 {
        <f64 as NumCast>::from(self).unwrap_or(f64::NAN)
    }

    /// Convert from f64, yielding the missing sentinel on failure
    fn from_f64(v: f64) -> Self {
        <Self as NumCast>::from(v).unwrap_or_else(Self::missing)
    }
}

impl CellValue for f32 {}
impl CellValue for f64 {}
