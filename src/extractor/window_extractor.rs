//! Raster window extraction
//!
//! Reads the band-major block under a pixel window and reorders it to the
//! channel-last layout image encoders expect.

use log::debug;

use crate::coordinate::PixelWindow;
use crate::errors::CropResult;
use crate::raster::{PixelBuffer, RasterDataset};

/// Extract one window from an open raster as a (row, col, band) buffer
///
/// # Arguments
/// * `dataset` - Open raster to read from
/// * `window` - Valid crop rectangle in the raster's pixel space
///
/// # Returns
/// The channel-last pixels, or the read error for this window only
pub fn extract_window(dataset: &mut dyn RasterDataset, window: &PixelWindow) -> CropResult<PixelBuffer> {
    debug!("Reading window {}", window);

    let block = dataset.read_window(window)?;
    let (bands, rows, cols) = block.shape();
    debug!("Read block of shape ({}, {}, {}), reordering to channel-last", bands, rows, cols);

    Ok(block.into_channel_last())
}
