//! Curvature demo: every variant over a synthetic valley
//!
//! Builds a 100x100 DEM of a V-shaped valley draining south with a rounded
//! hill on its east flank, then prints summary statistics for each variant.
//!
//! Run:
//!   cargo run -p demcurv-algorithms --example curvature_demo

use demcurv_algorithms::curvature::{curvature, CurvatureParams, CurvatureVariant};
use demcurv_core::{GeoTransform, Grid, PadPolicy};

fn main() {
    let dem = create_valley(100, 100);
    println!("DEM: {} x {}, cell size {}", dem.cols(), dem.rows(), dem.cell_size());

    for variant in CurvatureVariant::ALL {
        let params = CurvatureParams {
            variant,
            window_size: 5,
            pad: PadPolicy::Replicate,
            resolution: None,
        };
        let result = match curvature(&dem, params) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{}: {}", variant, e);
                continue;
            }
        };
        let stats = result.statistics();
        println!(
            "\n{}:\n  Min: {:.6}\n  Max: {:.6}\n  Mean: {:.6}\n  Undefined cells: {}",
            variant,
            stats.min.unwrap_or(f64::NAN),
            stats.max.unwrap_or(f64::NAN),
            stats.mean.unwrap_or(f64::NAN),
            stats.missing_count
        );
    }
}

/// V-shaped valley along the central column plus a Gaussian hill
fn create_valley(rows: usize, cols: usize) -> Grid<f64> {
    let mut dem = Grid::new(rows, cols);
    dem.set_transform(GeoTransform::new(0.0, rows as f64 * 10.0, 10.0, -10.0));

    let mid = cols as f64 / 2.0;
    for r in 0..rows {
        for c in 0..cols {
            let x = c as f64;
            let y = r as f64;
            let valley = 2.0 * (x - mid).abs() + 0.5 * (rows as f64 - y);
            let dx = x - 75.0;
            let dy = y - 40.0;
            let hill = 60.0 * (-(dx * dx + dy * dy) / 200.0).exp();
            let _ = dem.set(r, c, 500.0 + valley + hill);
        }
    }
    dem
}
