//! Grid-level properties of the curvature variants on synthetic DEMs.

use demcurv_algorithms::curvature::{
    compute_curvature, curvature, round6, CurvatureParams, CurvatureVariant, ZtDerivatives,
};
use demcurv_core::io::{read_geotiff_from_buffer, write_geotiff_to_buffer};
use demcurv_core::{Error, GeoTransform, Grid, PadPolicy};

/// Rolling hills on a tilted base at 30 m resolution
fn hills(rows: usize, cols: usize) -> Grid<f64> {
    let mut dem = Grid::new(rows, cols);
    dem.set_transform(GeoTransform::new(500_000.0, 4_000_000.0, 30.0, -30.0));
    for r in 0..rows {
        for c in 0..cols {
            let (y, x) = (r as f64, c as f64);
            let z = 800.0 + 40.0 * (y / 5.0).sin() * (x / 7.0).cos() + 1.5 * y - 0.8 * x;
            dem.set(r, c, z).unwrap();
        }
    }
    dem
}

fn params(variant: CurvatureVariant, window_size: usize) -> CurvatureParams {
    CurvatureParams {
        variant,
        window_size,
        ..Default::default()
    }
}

fn bits(grid: &Grid<f64>) -> Vec<u64> {
    grid.data().iter().map(|v| v.to_bits()).collect()
}

// ---------------------------------------------------------------------------
// Shape and metadata
// ---------------------------------------------------------------------------

#[test]
fn output_shape_matches_input_for_every_variant() {
    let dem = hills(17, 23);
    for variant in CurvatureVariant::ALL {
        for window_size in [1, 3, 5, 9] {
            for pad in [PadPolicy::Constant(0.0), PadPolicy::Replicate, PadPolicy::Reflect] {
                let p = CurvatureParams {
                    variant,
                    window_size,
                    pad,
                    resolution: None,
                };
                let out = curvature(&dem, p).unwrap();
                assert_eq!(out.shape(), dem.shape(), "{} s={}", variant, window_size);
                assert_eq!(out.transform(), dem.transform());
            }
        }
    }
}

#[test]
fn single_cell_grid_is_padded_not_rejected() {
    let dem = Grid::filled(1, 1, 42.0);
    for variant in CurvatureVariant::ALL {
        let out = curvature(&dem, params(variant, 3)).unwrap();
        assert_eq!(out.shape(), (1, 1));
    }
}

// ---------------------------------------------------------------------------
// Zevenbergen & Thorne variants
// ---------------------------------------------------------------------------

#[test]
fn total_is_sum_of_rounded_components_on_interior() {
    let dem = hills(30, 30);
    let res = dem.cell_size();
    let total = curvature(&dem, params(CurvatureVariant::Total, 3)).unwrap();
    let plan = curvature(&dem, params(CurvatureVariant::Planform, 3)).unwrap();
    let prof = curvature(&dem, params(CurvatureVariant::Profile, 3)).unwrap();

    for r in 1..29 {
        for c in 1..29 {
            let w = dem.window(r, c, 3, PadPolicy::default()).unwrap();
            let d = ZtDerivatives::from_window(&w, res);
            let expected = round6(d.planform().unwrap()) + round6(d.profile().unwrap());
            let got = total.get(r, c).unwrap();
            assert_eq!(got.to_bits(), expected.to_bits(), "cell ({}, {})", r, c);
            assert_eq!(got, plan.get(r, c).unwrap() + prof.get(r, c).unwrap());
        }
    }
}

#[test]
fn planar_surface_has_zero_planform_and_profile() {
    let mut dem = Grid::new(12, 15);
    dem.set_transform(GeoTransform::with_resolution(5.0));
    for r in 0..12 {
        for c in 0..15 {
            dem.set(r, c, 300.0 + 4.0 * r as f64 - 2.5 * c as f64).unwrap();
        }
    }

    for variant in [CurvatureVariant::Planform, CurvatureVariant::Profile, CurvatureVariant::Total] {
        let out = curvature(&dem, params(variant, 3)).unwrap();
        for r in 1..11 {
            for c in 1..14 {
                assert_eq!(out.get(r, c).unwrap(), 0.0, "{} at ({}, {})", variant, r, c);
            }
        }
    }
}

#[test]
fn flat_surface_reports_sentinel_everywhere_inside() {
    let dem = Grid::filled(8, 8, 1234.5);
    for variant in [CurvatureVariant::Planform, CurvatureVariant::Profile, CurvatureVariant::Total] {
        let out = curvature(&dem, params(variant, 3)).unwrap();
        for r in 1..7 {
            for c in 1..7 {
                assert!(out.get(r, c).unwrap().is_nan());
            }
        }
        assert!(out.nodata().unwrap().is_nan());
    }
}

#[test]
fn uniform_ramp_center_cell() {
    let mut dem = Grid::from_rows(&[
        vec![30.0, 20.0, 10.0],
        vec![30.0, 20.0, 10.0],
        vec![30.0, 20.0, 10.0],
    ])
    .unwrap();
    dem.set_transform(GeoTransform::with_resolution(10.0));

    for name in ["profile", "planform", "total"] {
        let out = compute_curvature(&dem, 3, name, 0.0).unwrap();
        assert_eq!(out.get(1, 1).unwrap(), 0.0, "{}", name);
    }
}

#[test]
fn resolution_override_rescales_curvature() {
    let dem = hills(20, 20);
    let at_30 = curvature(&dem, params(CurvatureVariant::Profile, 3)).unwrap();
    let at_60 = curvature(
        &dem,
        CurvatureParams {
            resolution: Some(60.0),
            ..params(CurvatureVariant::Profile, 3)
        },
    )
    .unwrap();
    assert_ne!(bits(&at_30), bits(&at_60));
}

#[test]
fn nodata_cells_poison_their_neighbourhood() {
    let mut dem = hills(10, 10);
    dem.set(5, 5, -9999.0).unwrap();
    dem.set_nodata(Some(-9999.0));

    let out = curvature(&dem, params(CurvatureVariant::Planform, 3)).unwrap();
    assert!(out.get(5, 4).unwrap().is_nan());
    assert!(out.get(4, 5).unwrap().is_nan());
    assert!(out.get(2, 2).unwrap().is_finite());
}

// ---------------------------------------------------------------------------
// McNab and Bolstad indices
// ---------------------------------------------------------------------------

#[test]
fn focal_indices_are_zero_on_constant_region_with_unit_window() {
    let dem = Grid::filled(9, 9, 75.0);
    for variant in [CurvatureVariant::McNab, CurvatureVariant::Bolstad] {
        let out = curvature(&dem, params(variant, 1)).unwrap();
        assert!(out.data().iter().all(|&v| v == 0.0), "{}", variant);
    }
}

#[test]
fn focal_indices_agree_on_sign() {
    let mut dem = Grid::filled(11, 11, 100.0);
    dem.set(5, 5, 140.0).unwrap();
    dem.set(2, 8, 60.0).unwrap();

    for variant in [CurvatureVariant::McNab, CurvatureVariant::Bolstad] {
        let out = curvature(&dem, params(variant, 3)).unwrap();
        assert!(out.get(5, 5).unwrap() > 0.0, "{} peak", variant);
        assert!(out.get(2, 8).unwrap() < 0.0, "{} pit", variant);
    }
}

#[test]
fn wider_window_changes_focal_indices_only() {
    let dem = hills(25, 25);
    for variant in CurvatureVariant::ALL {
        let narrow = curvature(&dem, params(variant, 3)).unwrap();
        let wide = curvature(&dem, params(variant, 7)).unwrap();
        if variant.uses_focal_window() {
            assert_ne!(bits(&narrow), bits(&wide), "{}", variant);
        } else {
            assert_eq!(bits(&narrow), bits(&wide), "{}", variant);
        }
    }
}

#[test]
fn pad_policy_only_affects_border_band() {
    let dem = hills(20, 20);
    let zero = curvature(&dem, params(CurvatureVariant::Bolstad, 5)).unwrap();
    let replicate = curvature(
        &dem,
        CurvatureParams {
            pad: PadPolicy::Replicate,
            ..params(CurvatureVariant::Bolstad, 5)
        },
    )
    .unwrap();

    for r in 0..20 {
        for c in 0..20 {
            let a = zero.get(r, c).unwrap();
            let b = replicate.get(r, c).unwrap();
            let interior = (2..18).contains(&r) && (2..18).contains(&c);
            if interior {
                assert_eq!(a, b, "interior cell ({}, {})", r, c);
            } else {
                assert_ne!(a, b, "border cell ({}, {})", r, c);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Argument validation and determinism
// ---------------------------------------------------------------------------

#[test]
fn invalid_arguments_fail_before_traversal() {
    let dem = hills(6, 6);

    let err = compute_curvature(&dem, 3, "slope", 0.0).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { name: "variant", .. }));

    for window_size in [0, 2, 8] {
        let err = compute_curvature(&dem, window_size, "bolstad", 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "window_size", .. }));
    }

    let empty: Grid<f64> = Grid::new(0, 0);
    let err = compute_curvature(&empty, 3, "total", 0.0).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn repeated_runs_are_bit_identical() {
    let dem = hills(40, 33);
    for variant in CurvatureVariant::ALL {
        let a = curvature(&dem, params(variant, 5)).unwrap();
        let b = curvature(&dem, params(variant, 5)).unwrap();
        assert_eq!(bits(&a), bits(&b), "{}", variant);
    }
}

#[test]
fn geotiff_roundtrip_preserves_resolution_for_kernels() {
    let dem = hills(16, 16);
    let bytes = write_geotiff_to_buffer(&dem, None).unwrap();
    let loaded: Grid<f64> = read_geotiff_from_buffer(&bytes).unwrap();

    let direct = curvature(&dem, params(CurvatureVariant::Total, 3)).unwrap();
    let via_file = curvature(&loaded, params(CurvatureVariant::Total, 3)).unwrap();
    assert_eq!(bits(&direct), bits(&via_file));

    let out_bytes = write_geotiff_to_buffer(&via_file, None).unwrap();
    let reloaded: Grid<f64> = read_geotiff_from_buffer(&out_bytes).unwrap();
    assert_eq!(bits(&reloaded), bits(&via_file));
    assert!(reloaded.nodata().unwrap().is_nan());
}
