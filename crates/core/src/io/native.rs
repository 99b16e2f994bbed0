//! Native GeoTIFF reading/writing
//!
//! Uses the `tiff` crate. Only single-band grayscale images are accepted;
//! georeferencing is limited to the pixel-scale and tiepoint tags, which is
//! all a north-up elevation grid needs.

use crate::error::{Error, Result};
use crate::raster::{CellValue, GeoTransform, Grid};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::Gray64Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;
use tiff::{ColorType, TiffError};

// The decoder maps these tag numbers (33550, 33922, 34735, 42113) to named
// variants, so lookups through `Tag::Unknown` would never match.
const MODEL_PIXEL_SCALE: Tag = Tag::ModelPixelScaleTag;
const MODEL_TIEPOINT: Tag = Tag::ModelTiepointTag;
const GEO_KEY_DIRECTORY: Tag = Tag::GeoKeyDirectoryTag;
const GDAL_NODATA: Tag = Tag::GdalNodata;

/// Pass-through options applied when persisting a grid
#[derive(Debug, Clone)]
pub struct GeoTiffOptions {
    /// Write the grid's nodata value (NaN if unset) as a GDAL_NODATA tag
    pub write_nodata: bool,
}

impl Default for GeoTiffOptions {
    fn default() -> Self {
        Self { write_nodata: true }
    }
}

/// Read a single-band GeoTIFF file into a Grid
pub fn read_geotiff<T, P>(path: P) -> Result<Grid<T>>
where
    T: CellValue,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    decode_geotiff(BufReader::new(file))
}

/// Read a single-band GeoTIFF from an in-memory buffer
pub fn read_geotiff_from_buffer<T: CellValue>(data: &[u8]) -> Result<Grid<T>> {
    decode_geotiff(Cursor::new(data))
}

fn cast_all<S: num_traits::NumCast + Copy, T: CellValue>(buf: &[S]) -> Vec<T> {
    buf.iter()
        .map(|&v| num_traits::cast(v).unwrap_or_else(T::missing))
        .collect()
}

fn decode_geotiff<T, R>(reader: R) -> Result<Grid<T>>
where
    T: CellValue,
    R: Read + Seek,
{
    let mut decoder = Decoder::new(reader)?;

    match decoder.colortype().map_err(unsupported_as_mismatch)? {
        ColorType::Gray(_) => {}
        other => {
            return Err(Error::TypeMismatch {
                expected: "single-band grayscale elevation grid".into(),
                found: format!("{:?} image", other),
            });
        }
    }

    let (width, height) = decoder.dimensions()?;
    let rows = height as usize;
    let cols = width as usize;

    let data: Vec<T> = match decoder.read_image().map_err(unsupported_as_mismatch)? {
        DecodingResult::F32(buf) => cast_all(&buf),
        DecodingResult::F64(buf) => cast_all(&buf),
        DecodingResult::U8(buf) => cast_all(&buf),
        DecodingResult::U16(buf) => cast_all(&buf),
        DecodingResult::U32(buf) => cast_all(&buf),
        DecodingResult::U64(buf) => cast_all(&buf),
        DecodingResult::I8(buf) => cast_all(&buf),
        DecodingResult::I16(buf) => cast_all(&buf),
        DecodingResult::I32(buf) => cast_all(&buf),
        DecodingResult::I64(buf) => cast_all(&buf),
        #[allow(unreachable_patterns)]
        _ => {
            return Err(Error::TypeMismatch {
                expected: "integer or floating point samples".into(),
                found: "unsupported sample format".into(),
            });
        }
    };

    let mut grid = Grid::from_vec(data, rows, cols)?;
    grid.validate()?;

    if let Some(transform) = read_geotransform(&mut decoder) {
        grid.set_transform(transform);
    }

    if let Ok(text) = decoder.get_tag_ascii_string(GDAL_NODATA) {
        if let Ok(nd) = text.trim_matches(char::from(0)).trim().parse::<f64>() {
            grid.set_nodata(Some(T::from_f64(nd)));
        }
    }

    Ok(grid)
}

/// Pixel layouts the decoder cannot represent are not elevation grids
fn unsupported_as_mismatch(err: TiffError) -> Error {
    match err {
        TiffError::UnsupportedError(kind) => Error::TypeMismatch {
            expected: "single-band numeric elevation grid".into(),
            found: kind.to_string(),
        },
        other => other.into(),
    }
}

/// GeoTransform from ModelPixelScale + ModelTiepoint, if both are present
fn read_geotransform<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<GeoTransform> {
    let scale = decoder.get_tag_f64_vec(MODEL_PIXEL_SCALE).ok()?;
    let tiepoint = decoder.get_tag_f64_vec(MODEL_TIEPOINT).ok()?;

    if scale.len() < 2 || tiepoint.len() < 6 {
        return None;
    }
    // tiepoint: [I, J, K, X, Y, Z], scale: [ScaleX, ScaleY, ScaleZ]
    let origin_x = tiepoint[3] - tiepoint[0] * scale[0];
    let origin_y = tiepoint[4] + tiepoint[1] * scale[1];
    Some(GeoTransform::new(origin_x, origin_y, scale[0], -scale[1]))
}

/// Write a Grid to a GeoTIFF file as 64-bit float
pub fn write_geotiff<T, P>(grid: &Grid<T>, path: P, options: Option<GeoTiffOptions>) -> Result<()>
where
    T: CellValue,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode_geotiff(grid, &mut writer, options.unwrap_or_default())?;
    writer.flush()?;
    Ok(())
}

/// Write a Grid to an in-memory GeoTIFF buffer
pub fn write_geotiff_to_buffer<T: CellValue>(
    grid: &Grid<T>,
    options: Option<GeoTiffOptions>,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_geotiff(grid, Cursor::new(&mut buf), options.unwrap_or_default())?;
    Ok(buf)
}

fn encode_geotiff<T, W>(grid: &Grid<T>, writer: W, options: GeoTiffOptions) -> Result<()>
where
    T: CellValue,
    W: Write + Seek,
{
    grid.validate()?;
    let mut encoder = TiffEncoder::new(writer)?;
    let (rows, cols) = grid.shape();

    let data: Vec<f64> = grid.data().iter().map(|&v| v.as_f64()).collect();

    let mut image = encoder.new_image::<Gray64Float>(cols as u32, rows as u32)?;

    let gt = grid.transform();
    let scale = [gt.pixel_width.abs(), gt.pixel_height.abs(), 0.0];
    image.encoder().write_tag(MODEL_PIXEL_SCALE, &scale[..])?;

    let tiepoint = [0.0, 0.0, 0.0, gt.origin_x, gt.origin_y, 0.0];
    image.encoder().write_tag(MODEL_TIEPOINT, &tiepoint[..])?;

    // Version 1.1.0 with two keys: GTModelTypeGeoKey = Projected,
    // GTRasterTypeGeoKey = PixelIsArea
    let geokeys: [u16; 12] = [1, 1, 0, 2, 1024, 0, 1, 1, 1025, 0, 1, 1];
    image.encoder().write_tag(GEO_KEY_DIRECTORY, &geokeys[..])?;

    if options.write_nodata {
        let nodata = grid.nodata().map_or(f64::NAN, CellValue::as_f64);
        let text = if nodata.is_nan() { "nan".to_string() } else { nodata.to_string() };
        image.encoder().write_tag(GDAL_NODATA, text.as_str())?;
    }

    image.write_data(&data)?;
    Ok(())
}
