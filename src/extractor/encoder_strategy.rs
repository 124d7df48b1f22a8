//! Image encoder strategy definitions
//!
//! Each strategy writes a channel-last pixel buffer to a lossless image
//! file. The factory picks a strategy from the configured format name.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageFormat};
use log::{debug, error, info};
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;

use crate::errors::{CropError, CropResult};
use crate::raster::{PixelBuffer, SampleType, Samples};

/// Strategy for writing extracted pixels to an image file
pub trait ImageEncoder: Send + Sync {
    /// File extension written by this encoder, without the dot
    fn extension(&self) -> &'static str;

    /// Check if this encoder can represent the given buffer
    fn supports(&self, buffer: &PixelBuffer) -> bool;

    /// Encode the buffer and write it to `path`
    fn encode_to_file(&self, buffer: &PixelBuffer, path: &Path) -> CropResult<()>;
}

/// PNG output through the `image` crate
///
/// Supports 8 and 16 bit unsigned samples with one to four bands.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngImageEncoder;

impl PngImageEncoder {
    fn to_dynamic_image(buffer: &PixelBuffer) -> CropResult<DynamicImage> {
        let (w, h) = (buffer.width() as u32, buffer.height() as u32);
        let invalid = || CropError::EncodeError("Pixel buffer does not match image dimensions".to_string());

        let image = match (buffer.samples(), buffer.bands()) {
            (Samples::U8(data), 1) => DynamicImage::ImageLuma8(ImageBuffer::from_raw(w, h, data.clone()).ok_or_else(invalid)?),
            (Samples::U8(data), 2) => DynamicImage::ImageLumaA8(ImageBuffer::from_raw(w, h, data.clone()).ok_or_else(invalid)?),
            (Samples::U8(data), 3) => DynamicImage::ImageRgb8(ImageBuffer::from_raw(w, h, data.clone()).ok_or_else(invalid)?),
            (Samples::U8(data), 4) => DynamicImage::ImageRgba8(ImageBuffer::from_raw(w, h, data.clone()).ok_or_else(invalid)?),
            (Samples::U16(data), 1) => DynamicImage::ImageLuma16(ImageBuffer::from_raw(w, h, data.clone()).ok_or_else(invalid)?),
            (Samples::U16(data), 2) => DynamicImage::ImageLumaA16(ImageBuffer::from_raw(w, h, data.clone()).ok_or_else(invalid)?),
            (Samples::U16(data), 3) => DynamicImage::ImageRgb16(ImageBuffer::from_raw(w, h, data.clone()).ok_or_else(invalid)?),
            (Samples::U16(data), 4) => DynamicImage::ImageRgba16(ImageBuffer::from_raw(w, h, data.clone()).ok_or_else(invalid)?),
            (samples, bands) => {
                return Err(CropError::UnsupportedSampleFormat(format!(
                    "PNG cannot hold {} band(s) of {} samples",
                    bands,
                    samples.sample_type()
                )))
            }
        };
        Ok(image)
    }
}

impl ImageEncoder for PngImageEncoder {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn supports(&self, buffer: &PixelBuffer) -> bool {
        matches!(buffer.sample_type(), SampleType::U8 | SampleType::U16) && (1..=4).contains(&buffer.bands())
    }

    fn encode_to_file(&self, buffer: &PixelBuffer, path: &Path) -> CropResult<()> {
        let image = Self::to_dynamic_image(buffer)?;
        image.save_with_format(path, ImageFormat::Png)?;
        debug!("Wrote {}x{} PNG to {}", buffer.width(), buffer.height(), path.display());
        Ok(())
    }
}

/// Uncompressed single-strip TIFF output through the `tiff` crate
///
/// Supports any band count and every sample type the readers produce.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffImageEncoder;

impl ImageEncoder for TiffImageEncoder {
    fn extension(&self) -> &'static str {
        "tif"
    }

    fn supports(&self, buffer: &PixelBuffer) -> bool {
        buffer.bands() > 0
    }

    fn encode_to_file(&self, buffer: &PixelBuffer, path: &Path) -> CropResult<()> {
        let bands = buffer.bands();
        if bands == 0 {
            return Err(CropError::EncodeError("Pixel buffer has no bands".to_string()));
        }

        let sample_type = buffer.sample_type();
        let width = buffer.width() as u32;
        let height = buffer.height() as u32;

        let file = File::create(path)?;
        let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
        let mut dir = encoder.new_directory()?;

        dir.write_tag(Tag::ImageWidth, width)?;
        dir.write_tag(Tag::ImageLength, height)?;

        let bits_per_sample: Vec<u16> = vec![sample_type.bits(); bands];
        dir.write_tag(Tag::BitsPerSample, bits_per_sample.as_slice())?;
        dir.write_tag(Tag::Compression, 1u16)?;

        // RGB when there are at least three 8/16 bit unsigned bands, BlackIsZero otherwise
        let rgb = bands >= 3 && matches!(sample_type, SampleType::U8 | SampleType::U16);
        let photometric: u16 = if rgb { 2 } else { 1 };
        dir.write_tag(Tag::PhotometricInterpretation, photometric)?;

        dir.write_tag(Tag::SamplesPerPixel, bands as u16)?;
        let sample_format: Vec<u16> = vec![sample_type.tiff_sample_format(); bands];
        dir.write_tag(Tag::SampleFormat, sample_format.as_slice())?;
        dir.write_tag(Tag::PlanarConfiguration, 1u16)?;
        dir.write_tag(Tag::RowsPerStrip, height)?;

        let color_bands = if rgb { 3 } else { 1 };
        if bands > color_bands {
            let extra_samples: Vec<u16> = vec![0; bands - color_bands];
            dir.write_tag(Tag::ExtraSamples, extra_samples.as_slice())?;
        }

        let strip_offset = match buffer.samples() {
            Samples::U8(data) => dir.write_data(data.as_slice())?,
            Samples::U16(data) => dir.write_data(data.as_slice())?,
            Samples::I16(data) => dir.write_data(data.as_slice())?,
            Samples::F32(data) => dir.write_data(data.as_slice())?,
        };
        let strip_offset = u32::try_from(strip_offset)
            .map_err(|_| CropError::EncodeError("Strip offset exceeds classic TIFF range".to_string()))?;
        dir.write_tag(Tag::StripOffsets, strip_offset)?;

        let byte_count = buffer.samples().len() * (sample_type.bits() as usize / 8);
        let byte_count = u32::try_from(byte_count)
            .map_err(|_| CropError::EncodeError("Strip exceeds classic TIFF size".to_string()))?;
        dir.write_tag(Tag::StripByteCounts, byte_count)?;

        dir.finish()?;
        debug!("Wrote {}x{}x{} TIFF to {}", width, height, bands, path.display());
        Ok(())
    }
}

/// Factory for creating encoders by format name
pub struct ImageEncoderFactory;

impl ImageEncoderFactory {
    /// Create an encoder for a format name ("png", "tif" or "tiff")
    pub fn create_encoder(format: &str) -> CropResult<Box<dyn ImageEncoder>> {
        let format = format.trim().to_lowercase();
        debug!("Determining encoder for output format: {}", format);

        match format.as_str() {
            "png" => {
                info!("Using PNG encoder");
                Ok(Box::new(PngImageEncoder))
            }
            "tif" | "tiff" => {
                info!("Using TIFF encoder");
                Ok(Box::new(TiffImageEncoder))
            }
            _ => {
                error!("Unsupported output format: {}", format);
                Err(CropError::ConfigError(format!("Unsupported output format: {}", format)))
            }
        }
    }

    /// Names accepted by [`ImageEncoderFactory::create_encoder`]
    pub fn supported_formats() -> &'static [&'static str] {
        &["png", "tif", "tiff"]
    }
}
