//! GeoTIFF raster reader
//!
//! Decodes only the strips or tiles that intersect a requested window, so
//! large orthophotos never have to be held in memory in full.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;

use super::buffer::{RasterBuffer, SampleType, Samples};
use super::reader::{RasterDataset, RasterReader};
use super::world_file;
use crate::coordinate::{GeoTransform, PixelWindow};
use crate::errors::{CropError, CropResult};

/// Reader that opens GeoTIFF files
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoTiffReader;

impl GeoTiffReader {
    pub fn new() -> Self {
        GeoTiffReader
    }
}

impl RasterReader for GeoTiffReader {
    fn open(&self, path: &Path) -> CropResult<Box<dyn RasterDataset>> {
        Ok(Box::new(GeoTiffDataset::open(path)?))
    }
}

/// An open GeoTIFF file
pub struct GeoTiffDataset {
    /// Path the dataset was opened from
    path: PathBuf,
    /// Underlying TIFF decoder
    decoder: Decoder<BufReader<File>>,
    width: u32,
    height: u32,
    bands: usize,
    sample_type: SampleType,
    geo_transform: GeoTransform,
}

impl GeoTiffDataset {
    /// Open a GeoTIFF and read its layout and georeferencing
    ///
    /// Georeferencing is taken from ModelPixelScale + ModelTiepoint, then
    /// ModelTransformation, then a world file sidecar.
    pub fn open(path: &Path) -> CropResult<Self> {
        info!("Opening raster: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::with_capacity(1024 * 1024, file);
        let mut decoder = Decoder::new(reader)?.with_limits(Limits::unlimited());

        let (width, height) = decoder.dimensions()?;

        let planar = find_u16(&mut decoder, Tag::PlanarConfiguration)?.unwrap_or(1);
        if planar != 1 {
            return Err(CropError::UnsupportedSampleFormat(
                "planar (band-separated) TIFF layout".to_string(),
            ));
        }

        let bands = find_u16(&mut decoder, Tag::SamplesPerPixel)?.unwrap_or(1) as usize;
        let sample_type = detect_sample_type(&mut decoder)?;
        let geo_transform = read_geo_transform(&mut decoder, path)?;
        if geo_transform.is_rotated() {
            debug!("{} has rotation terms; they are ignored when mapping to pixels", path.display());
        }

        info!(
            "Raster {}: {}x{} pixels, {} band(s) of {}, geotransform {:?}",
            path.display(), width, height, bands, sample_type, geo_transform.coefficients()
        );

        Ok(GeoTiffDataset {
            path: path.to_path_buf(),
            decoder,
            width,
            height,
            bands,
            sample_type,
            geo_transform,
        })
    }
}

impl RasterDataset for GeoTiffDataset {
    fn geo_transform(&self) -> &GeoTransform {
        &self.geo_transform
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn band_count(&self) -> usize {
        self.bands
    }

    fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    fn read_window(&mut self, window: &PixelWindow) -> CropResult<RasterBuffer> {
        if !window.fits_within(self.width, self.height) {
            return Err(CropError::WindowOutOfBounds {
                x: window.min_x(),
                y: window.min_y(),
                width: window.width(),
                height: window.height(),
                raster_width: self.width,
                raster_height: self.height,
            });
        }

        // fits_within guarantees non-negative origins
        let x0 = window.min_x() as u32;
        let y0 = window.min_y() as u32;
        let x1 = x0 + window.width();
        let y1 = y0 + window.height();

        let (chunk_w, chunk_h) = self.decoder.chunk_dimensions();
        if chunk_w == 0 || chunk_h == 0 {
            return Err(CropError::RasterError("Raster reports zero-sized chunks".to_string()));
        }
        let chunks_across = (self.width + chunk_w - 1) / chunk_w;

        let mut out = Samples::zeroed(self.sample_type, self.bands * window.area());
        let layout = WindowLayout {
            bands: self.bands,
            x0,
            y0,
            x1,
            y1,
            out_width: window.width() as usize,
        };

        for cy in (y0 / chunk_h)..=((y1 - 1) / chunk_h) {
            for cx in (x0 / chunk_w)..=((x1 - 1) / chunk_w) {
                let index = cy * chunks_across + cx;
                let (data_w, data_h) = self.decoder.chunk_data_dimensions(index);
                debug!("Reading chunk {} ({}x{}) of {}", index, data_w, data_h, self.path.display());

                let chunk = self.decoder.read_chunk(index)?;
                let placement = ChunkPlacement {
                    left: cx * chunk_w,
                    top: cy * chunk_h,
                    width: data_w,
                    height: data_h,
                };
                copy_chunk(chunk, &placement, &layout, &mut out)?;
            }
        }

        RasterBuffer::new(self.bands, window.height() as usize, window.width() as usize, out)
    }
}

/// Requested window, in raster pixels
struct WindowLayout {
    bands: usize,
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
    out_width: usize,
}

/// Where a decoded chunk sits in the raster
struct ChunkPlacement {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

fn copy_chunk(chunk: DecodingResult, placement: &ChunkPlacement, layout: &WindowLayout, out: &mut Samples) -> CropResult<()> {
    match (chunk, out) {
        (DecodingResult::U8(src), Samples::U8(dst)) => copy_overlap(&src, dst, placement, layout),
        (DecodingResult::U16(src), Samples::U16(dst)) => copy_overlap(&src, dst, placement, layout),
        (DecodingResult::I16(src), Samples::I16(dst)) => copy_overlap(&src, dst, placement, layout),
        (DecodingResult::F32(src), Samples::F32(dst)) => copy_overlap(&src, dst, placement, layout),
        (_, dst) => Err(CropError::UnsupportedSampleFormat(format!(
            "decoded chunk does not match expected {} samples",
            dst.sample_type()
        ))),
    }
}

/// Copy the part of an interleaved chunk that overlaps the window into band-major output
fn copy_overlap<T: Copy>(src: &[T], dst: &mut [T], placement: &ChunkPlacement, layout: &WindowLayout) -> CropResult<()> {
    let row_start = layout.y0.max(placement.top);
    let row_end = layout.y1.min(placement.top + placement.height);
    let col_start = layout.x0.max(placement.left);
    let col_end = layout.x1.min(placement.left + placement.width);

    let plane = layout.out_width * (layout.y1 - layout.y0) as usize;
    let chunk_stride = placement.width as usize * layout.bands;

    for row in row_start..row_end {
        let src_row = (row - placement.top) as usize * chunk_stride;
        let dst_row = (row - layout.y0) as usize * layout.out_width;
        for col in col_start..col_end {
            let src_pixel = src_row + (col - placement.left) as usize * layout.bands;
            let dst_pixel = dst_row + (col - layout.x0) as usize;
            for band in 0..layout.bands {
                let value = src.get(src_pixel + band).copied().ok_or_else(|| {
                    CropError::RasterError("Decoded chunk is shorter than its dimensions".to_string())
                })?;
                dst[band * plane + dst_pixel] = value;
            }
        }
    }
    Ok(())
}

/// First value of an unsigned tag; single SHORTs decode as scalars, not lists
fn find_u16(decoder: &mut Decoder<BufReader<File>>, tag: Tag) -> CropResult<Option<u16>> {
    Ok(decoder.find_tag_unsigned_vec::<u16>(tag)?.and_then(|values| values.first().copied()))
}

fn find_f64_vec(decoder: &mut Decoder<BufReader<File>>, tag: Tag) -> CropResult<Option<Vec<f64>>> {
    match decoder.find_tag(tag)? {
        Some(value) => Ok(Some(value.into_f64_vec()?)),
        None => Ok(None),
    }
}

fn detect_sample_type(decoder: &mut Decoder<BufReader<File>>) -> CropResult<SampleType> {
    let bits = find_u16(decoder, Tag::BitsPerSample)?.unwrap_or(1);
    let format = find_u16(decoder, Tag::SampleFormat)?.unwrap_or(1);

    match (format, bits) {
        (1, 8) => Ok(SampleType::U8),
        (1, 16) => Ok(SampleType::U16),
        (2, 16) => Ok(SampleType::I16),
        (3, 32) => Ok(SampleType::F32),
        _ => Err(CropError::UnsupportedSampleFormat(format!(
            "{} bits with sample format {}",
            bits, format
        ))),
    }
}

fn read_geo_transform(decoder: &mut Decoder<BufReader<File>>, path: &Path) -> CropResult<GeoTransform> {
    let pixel_scale = find_f64_vec(decoder, Tag::ModelPixelScaleTag)?;
    let tiepoint = find_f64_vec(decoder, Tag::ModelTiepointTag)?;
    if let (Some(scale), Some(tie)) = (pixel_scale, tiepoint) {
        return GeoTransform::from_scale_and_tiepoint(&scale, &tie);
    }

    if let Some(matrix) = find_f64_vec(decoder, Tag::ModelTransformationTag)? {
        return GeoTransform::from_model_transformation(&matrix);
    }

    world_file::find_world_file(path)?.ok_or(CropError::MissingGeoTransform)
}
