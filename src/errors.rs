//! Custom error types for region cropping

use std::fmt;
use std::io;

/// Errors raised while reading annotations, reading rasters or writing crops
#[derive(Debug)]
pub enum CropError {
    /// I/O error
    IoError(io::Error),
    /// The annotation drawing could not be parsed
    AnnotationError(String),
    /// The raster container could not be decoded
    RasterError(String),
    /// Raster has no usable georeferencing tags
    MissingGeoTransform,
    /// Requested window falls outside the raster
    WindowOutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        raster_width: u32,
        raster_height: u32,
    },
    /// Sample layout that cannot be read or encoded
    UnsupportedSampleFormat(String),
    /// Image encoding failed
    EncodeError(String),
    /// Invalid configuration value
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for CropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropError::IoError(e) => write!(f, "I/O error: {}", e),
            CropError::AnnotationError(msg) => write!(f, "Annotation error: {}", msg),
            CropError::RasterError(msg) => write!(f, "Raster error: {}", msg),
            CropError::MissingGeoTransform => write!(f, "Raster has no georeferencing information"),
            CropError::WindowOutOfBounds { x, y, width, height, raster_width, raster_height } => write!(
                f,
                "Window x={}, y={}, width={}, height={} is outside raster of {}x{}",
                x, y, width, height, raster_width, raster_height
            ),
            CropError::UnsupportedSampleFormat(msg) => write!(f, "Unsupported sample format: {}", msg),
            CropError::EncodeError(msg) => write!(f, "Image encoding error: {}", msg),
            CropError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            CropError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CropError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CropError {
    fn from(error: io::Error) -> Self {
        CropError::IoError(error)
    }
}

impl From<dxf::DxfError> for CropError {
    fn from(error: dxf::DxfError) -> Self {
        CropError::AnnotationError(error.to_string())
    }
}

impl From<tiff::TiffError> for CropError {
    fn from(error: tiff::TiffError) -> Self {
        match error {
            tiff::TiffError::IoError(e) => CropError::IoError(e),
            other => CropError::RasterError(other.to_string()),
        }
    }
}

impl From<image::ImageError> for CropError {
    fn from(error: image::ImageError) -> Self {
        match error {
            image::ImageError::IoError(e) => CropError::IoError(e),
            other => CropError::EncodeError(other.to_string()),
        }
    }
}

impl From<String> for CropError {
    fn from(msg: String) -> Self {
        CropError::GenericError(msg)
    }
}

/// Result type for cropping operations
pub type CropResult<T> = Result<T, CropError>;
