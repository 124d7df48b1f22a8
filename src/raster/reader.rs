//! Raster reader interfaces

use std::path::Path;

use super::buffer::{RasterBuffer, SampleType};
use crate::coordinate::{GeoTransform, PixelWindow};
use crate::errors::CropResult;

/// An open georeferenced raster
///
/// A dataset is opened once per (raster, annotation) pair and dropped when
/// every polygon of the pair has been handled.
pub trait RasterDataset {
    /// Affine mapping between world and pixel coordinates
    fn geo_transform(&self) -> &GeoTransform;

    /// Raster size as (width, height) in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Number of bands (samples per pixel)
    fn band_count(&self) -> usize;

    /// Numeric type of the samples
    fn sample_type(&self) -> SampleType;

    /// Read a window as a band-major (band, row, col) block
    ///
    /// Windows that do not lie fully inside the raster are an error.
    fn read_window(&mut self, window: &PixelWindow) -> CropResult<RasterBuffer>;
}

/// Opens raster files into datasets
pub trait RasterReader: Send + Sync {
    /// Open the raster at `path`
    fn open(&self, path: &Path) -> CropResult<Box<dyn RasterDataset>>;

    /// Check if this reader understands the given file
    fn supports_format(&self, path: &Path) -> bool {
        let extension = path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .unwrap_or("")
            .to_lowercase();

        matches!(extension.as_str(), "tif" | "tiff")
    }
}
