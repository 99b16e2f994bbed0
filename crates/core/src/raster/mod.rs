//! Grid data structures and window extraction

mod element;
mod geotransform;
mod grid;
mod neighborhood;
mod window;

pub use element::CellValue;
pub use geotransform::GeoTransform;
pub use grid::{Grid, GridStatistics};
pub use neighborhood::Neighborhood;
pub use window::{PadPolicy, Window};
