//! In-memory raster dataset

use super::buffer::{map_samples, RasterBuffer, SampleType, Samples};
use super::reader::RasterDataset;
use crate::coordinate::{GeoTransform, PixelWindow};
use crate::errors::{CropError, CropResult};

/// A fully loaded band-major raster
///
/// Useful for feeding synthetic or already-decoded data through the
/// extraction pipeline.
#[derive(Debug, Clone)]
pub struct MemoryDataset {
    width: u32,
    height: u32,
    bands: usize,
    samples: Samples,
    geo_transform: GeoTransform,
}

impl MemoryDataset {
    /// Create a dataset from band-major samples
    pub fn new(width: u32, height: u32, bands: usize, samples: Samples, geo_transform: GeoTransform) -> CropResult<Self> {
        let expected = width as usize * height as usize * bands;
        if samples.len() != expected {
            return Err(CropError::GenericError(format!(
                "Raster of {}x{}x{} needs {} samples, got {}",
                width, height, bands, expected, samples.len()
            )));
        }
        Ok(MemoryDataset { width, height, bands, samples, geo_transform })
    }
}

impl RasterDataset for MemoryDataset {
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
        self.samples.sample_type()
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

        let plane = self.width as usize * self.height as usize;
        let raster_width = self.width as usize;
        let bands = self.bands;
        let (x0, y0) = (window.min_x() as usize, window.min_y() as usize);
        let (w, h) = (window.width() as usize, window.height() as usize);

        let samples = map_samples!(&self.samples, |data| {
            let mut out = Vec::with_capacity(bands * w * h);
            for band in 0..bands {
                for row in y0..y0 + h {
                    let start = band * plane + row * raster_width + x0;
                    out.extend_from_slice(&data[start..start + w]);
                }
            }
            out
        });

        RasterBuffer::new(bands, h, w, samples)
    }
}
