//! Raster access for windowed extraction
//!
//! This module defines the raster reader interfaces, the sample buffers
//! passed between reading and encoding, and the GeoTIFF implementation.

mod buffer;
mod reader;
mod geotiff;
mod memory;
pub mod world_file;

#[cfg(test)]
mod tests;

pub use buffer::{PixelBuffer, RasterBuffer, SampleType, Samples};
pub use reader::{RasterDataset, RasterReader};
pub use geotiff::{GeoTiffDataset, GeoTiffReader};
pub use memory::MemoryDataset;
