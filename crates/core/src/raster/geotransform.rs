//! Grid origin and cell resolution

use serde::{Deserialize, Serialize};

/// North-up placement of a grid in map units.
///
/// ```text
/// x = origin_x + col * pixel_width
/// y = origin_y + row * pixel_height
/// ```
///
/// `pixel_height` is usually negative (rows grow southwards). Curvature
/// kernels only care about the absolute cell spacing, see [`resolution`].
///
/// [`resolution`]: GeoTransform::resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// X coordinate of the upper-left corner
    pub origin_x: f64,
    /// Y coordinate of the upper-left corner
    pub origin_y: f64,
    /// Cell size along X
    pub pixel_width: f64,
    /// Cell size along Y, negative for north-up grids
    pub pixel_height: f64,
}

impl GeoTransform {
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        }
    }

    /// Unit-origin transform with square cells of the given size
    pub fn with_resolution(res: f64) -> Self {
        Self::new(0.0, 0.0, res, -res)
    }

    /// Absolute cell spacing as (x, y)
    pub fn resolution(&self) -> (f64, f64) {
        (self.pixel_width.abs(), self.pixel_height.abs())
    }

    /// Cell size along X (assumes square cells)
    pub fn cell_size(&self) -> f64 {
        self.pixel_width.abs()
    }

    /// Whether X and Y spacing agree to within a relative 1e-9
    pub fn is_square(&self) -> bool {
        let (x, y) = self.resolution();
        (x - y).abs() <= 1e-9 * x.max(y)
    }

    /// Bounding box (min_x, min_y, max_x, max_y) of a grid with the given shape
    pub fn bounds(&self, rows: usize, cols: usize) -> (f64, f64, f64, f64) {
        let x1 = self.origin_x + cols as f64 * self.pixel_width;
        let y1 = self.origin_y + rows as f64 * self.pixel_height;
        (
            self.origin_x.min(x1),
            self.origin_y.min(y1),
            self.origin_x.max(x1),
            self.origin_y.max(y1),
        )
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::with_resolution(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resolution_is_absolute() {
        let gt = GeoTransform::new(500.0, 1000.0, 10.0, -10.0);
        assert_eq!(gt.resolution(), (10.0, 10.0));
        assert!(gt.is_square());

        let rect = GeoTransform::new(0.0, 0.0, 10.0, -30.0);
        assert!(!rect.is_square());
        assert_relative_eq!(rect.cell_size(), 10.0);
    }

    #[test]
    fn test_bounds() {
        let gt = GeoTransform::new(0.0, 100.0, 1.0, -1.0);
        let (min_x, min_y, max_x, max_y) = gt.bounds(100, 50);
        assert_relative_eq!(min_x, 0.0);
        assert_relative_eq!(min_y, 0.0);
        assert_relative_eq!(max_x, 50.0);
        assert_relative_eq!(max_y, 100.0);
    }
}
