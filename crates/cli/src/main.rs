//! demcurv CLI - surface curvature from digital elevation models

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use demcurv_algorithms::curvature::{curvature, CurvatureParams, CurvatureVariant};
use demcurv_core::io::{read_geotiff, write_geotiff, GeoTiffOptions};
use demcurv_core::{Grid, PadPolicy};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "demcurv")]
#[command(author, version, about = "Moving-window surface curvature for DEMs", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a DEM file
    Info {
        /// Input GeoTIFF
        input: PathBuf,
    },
    /// Compute a curvature metric for every cell of a DEM
    Curvature {
        /// Input DEM (single-band GeoTIFF)
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Variant: planform, profile, total, mcnab, bolstad
        #[arg(short = 't', long, default_value = "total")]
        variant: String,
        /// Odd window size for mcnab and bolstad
        #[arg(short, long, default_value = "3")]
        window_size: usize,
        /// Edge padding strategy
        #[arg(short, long, value_enum, default_value_t = PadMode::Constant)]
        pad: PadMode,
        /// Fill value for constant padding
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        pad_value: f64,
        /// Cell resolution override (map units); defaults to the file's pixel size
        #[arg(short, long)]
        resolution: Option<f64>,
        /// Do not write a nodata tag to the output
        #[arg(long)]
        no_nodata_tag: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PadMode {
    Constant,
    Replicate,
    Reflect,
}

impl PadMode {
    fn policy(self, value: f64) -> PadPolicy {
        match self {
            PadMode::Constant => PadPolicy::Constant(value),
            PadMode::Replicate => PadPolicy::Replicate,
            PadMode::Reflect => PadPolicy::Reflect,
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_dem(path: &PathBuf) -> Result<Grid<f64>> {
    let pb = spinner("Reading DEM...");
    let dem: Grid<f64> = read_geotiff(path)
        .with_context(|| format!("Failed to read DEM {}", path.display()))?;
    pb.finish_and_clear();
    info!("Input: {} x {}, cell size {}", dem.cols(), dem.rows(), dem.cell_size());
    Ok(dem)
}

fn write_result(grid: &Grid<f64>, path: &PathBuf, options: GeoTiffOptions) -> Result<()> {
    let pb = spinner("Writing output...");
    write_geotiff(grid, path, Some(options)).context("Failed to write output")?;
    pb.finish_and_clear();
    Ok(())
}

fn done(name: &str, path: &PathBuf, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn print_info(input: &PathBuf, dem: &Grid<f64>) {
    let (rows, cols) = dem.shape();
    let (res_x, res_y) = dem.transform().resolution();
    let bounds = dem.bounds();
    let stats = dem.statistics();

    println!("File: {}", input.display());
    println!("Dimensions: {} x {} ({} cells)", cols, rows, dem.len());
    println!("Resolution: {} x {}", res_x, res_y);
    println!(
        "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
        bounds.0, bounds.1, bounds.2, bounds.3
    );
    if let Some(nodata) = dem.nodata() {
        println!("NoData: {}", nodata);
    }
    println!("\nStatistics:");
    if let Some(min) = stats.min {
        println!("  Min: {:.4}", min);
    }
    if let Some(max) = stats.max {
        println!("  Max: {:.4}", max);
    }
    if let Some(mean) = stats.mean {
        println!("  Mean: {:.4}", mean);
    }
    println!(
        "  Valid cells: {} ({:.1}%)",
        stats.valid_count,
        100.0 * stats.valid_count as f64 / dem.len() as f64
    );
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let dem = read_dem(&input)?;
            print_info(&input, &dem);
        }

        Commands::Curvature {
            input,
            output,
            variant,
            window_size,
            pad,
            pad_value,
            resolution,
            no_nodata_tag,
        } => {
            // Reject bad arguments before touching the input file
            let variant: CurvatureVariant = variant.parse()?;
            let params = CurvatureParams {
                variant,
                window_size,
                pad: pad.policy(pad_value),
                resolution,
            };
            params.validate()?;

            let dem = read_dem(&input)?;
            let start = Instant::now();
            let result = curvature(&dem, params).context("Failed to calculate curvature")?;
            let elapsed = start.elapsed();

            let stats = result.statistics();
            info!(
                "{} undefined cells (flat or nodata) of {}",
                stats.missing_count,
                result.len()
            );

            let options = GeoTiffOptions {
                write_nodata: !no_nodata_tag,
            };
            write_result(&result, &output, options)?;
            done(&format!("Curvature ({})", variant), &output, elapsed);
        }
    }

    Ok(())
}
