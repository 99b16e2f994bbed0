//! Main Grid type

use crate::error::{Error, Result};
use crate::raster::{CellValue, GeoTransform};
use ndarray::Array2;

/// A 2D elevation grid.
///
/// `Grid<T>` stores cell values row-major in an `Array2<T>` together with the
/// [`GeoTransform`] that carries its cell resolution and an optional nodata
/// value.
///
/// # Example
///
/// ```
/// use demcurv_core::{GeoTransform, Grid};
///
/// let mut dem: Grid<f64> = Grid::new(3, 3);
/// dem.set_transform(GeoTransform::with_resolution(10.0));
/// dem.set(1, 1, 42.0).unwrap();
/// assert_eq!(dem.get(1, 1).unwrap(), 42.0);
/// assert_eq!(dem.cell_size(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: CellValue> {
    data: Array2<T>,
    transform: GeoTransform,
    nodata: Option<T>,
}

impl<T: CellValue> Grid<T> {
    /// Create a new grid filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_array(Array2::zeros((rows, cols)))
    }

    /// Create a new grid filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self::from_array(Array2::from_elem((rows, cols), value))
    }

    /// Create a grid from row-major data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions { rows, cols });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self::from_array(array))
    }

    /// Create a grid from nested rows, each of the same length
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != n_cols) {
            return Err(Error::TypeMismatch {
                expected: format!("{} columns in every row", n_cols),
                found: "ragged rows".into(),
            });
        }
        Self::from_vec(rows.concat(), n_rows, n_cols)
    }

    /// Create a grid from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self {
            data,
            transform: GeoTransform::default(),
            nodata: None,
        }
    }

    /// Allocate an output grid of the given shape sharing this grid's transform
    pub fn with_same_meta<U: CellValue>(&self, rows: usize, cols: usize) -> Grid<U> {
        Grid {
            data: Array2::zeros((rows, cols)),
            transform: self.transform,
            nodata: None,
        }
    }

    /// Fail with [`Error::TypeMismatch`] unless this is a usable grid of at least 1x1 cells
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            let (rows, cols) = self.shape();
            return Err(Error::TypeMismatch {
                expected: "a grid of at least 1x1 cells".into(),
                found: format!("{}x{} grid", rows, cols),
            });
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Get value at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> T {
        unsafe { *self.data.uget((row, col)) }
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: GeoTransform) {
        self.transform = transform;
    }

    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }

    pub fn set_nodata(&mut self, nodata: Option<T>) {
        self.nodata = nodata;
    }

    /// Cell size along X (assumes square cells)
    pub fn cell_size(&self) -> f64 {
        self.transform.cell_size()
    }

    /// Geographic bounds (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.transform.bounds(self.rows(), self.cols())
    }

    /// Whether `value` is NaN or this grid's nodata value
    pub fn is_missing(&self, value: T) -> bool {
        value.is_missing(self.nodata)
    }

    /// Min, max and mean over the non-missing cells
    pub fn statistics(&self) -> GridStatistics {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;

        for &value in self.data.iter() {
            if self.is_missing(value) {
                continue;
            }
            let v = value.as_f64();
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }

        let (min, max, mean) = if count > 0 {
            (Some(min), Some(max), Some(sum / count as f64))
        } else {
            (None, None, None)
        };

        GridStatistics {
            min,
            max,
            mean,
            valid_count: count,
            missing_count: self.len() - count,
        }
    }
}

/// Basic statistics for a grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridStatistics {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub valid_count: usize,
    pub missing_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid: Grid<f64> = Grid::new(100, 200);
        assert_eq!(grid.rows(), 100);
        assert_eq!(grid.cols(), 200);
        assert_eq!(grid.shape(), (100, 200));
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_empty_grid_is_type_mismatch() {
        let grid: Grid<f64> = Grid::new(0, 5);
        assert!(matches!(grid.validate(), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(grid.get(1, 0).unwrap(), 3.0);

        let ragged = Grid::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(ragged, Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid: Grid<f32> = Grid::new(2, 2);
        assert!(matches!(grid.get(2, 0), Err(Error::IndexOutOfBounds { .. })));
        assert!(grid.set(0, 5, 1.0).is_err());
    }

    #[test]
    fn test_statistics_skip_missing() {
        let mut grid: Grid<f64> = Grid::new(10, 10);
        for i in 0..10 {
            for j in 0..10 {
                grid.set(i, j, (i * 10 + j) as f64).unwrap();
            }
        }
        grid.set(0, 0, f64::NAN).unwrap();
        grid.set(9, 9, -9999.0).unwrap();
        grid.set_nodata(Some(-9999.0));

        let stats = grid.statistics();
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(98.0));
        assert_eq!(stats.valid_count, 98);
        assert_eq!(stats.missing_count, 2);
    }
}
