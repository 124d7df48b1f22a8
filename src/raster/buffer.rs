//! Sample buffers in band-major and channel-last layouts

use std::fmt;

use crate::errors::{CropError, CropResult};

/// Numeric type of the raster samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    U8,
    U16,
    I16,
    F32,
}

impl SampleType {
    /// Bits per sample
    pub fn bits(&self) -> u16 {
        match self {
            SampleType::U8 => 8,
            SampleType::U16 | SampleType::I16 => 16,
            SampleType::F32 => 32,
        }
    }

    /// TIFF SampleFormat code (1 = unsigned, 2 = signed, 3 = float)
    pub fn tiff_sample_format(&self) -> u16 {
        match self {
            SampleType::U8 | SampleType::U16 => 1,
            SampleType::I16 => 2,
            SampleType::F32 => 3,
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleType::U8 => "u8",
            SampleType::U16 => "u16",
            SampleType::I16 => "i16",
            SampleType::F32 => "f32",
        };
        write!(f, "{}", name)
    }
}

/// Flat sample storage tagged with its numeric type
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    F32(Vec<f32>),
}

/// Apply the same generic expression to whichever vector a `Samples` holds
macro_rules! map_samples {
    ($samples:expr, |$data:ident| $body:expr) => {
        match $samples {
            Samples::U8($data) => Samples::U8($body),
            Samples::U16($data) => Samples::U16($body),
            Samples::I16($data) => Samples::I16($body),
            Samples::F32($data) => Samples::F32($body),
        }
    };
}

pub(crate) use map_samples;

impl Samples {
    /// Zero-filled storage for `len` samples
    pub fn zeroed(sample_type: SampleType, len: usize) -> Self {
        match sample_type {
            SampleType::U8 => Samples::U8(vec![0; len]),
            SampleType::U16 => Samples::U16(vec![0; len]),
            SampleType::I16 => Samples::I16(vec![0; len]),
            SampleType::F32 => Samples::F32(vec![0.0; len]),
        }
    }

    pub fn sample_type(&self) -> SampleType {
        match self {
            Samples::U8(_) => SampleType::U8,
            Samples::U16(_) => SampleType::U16,
            Samples::I16(_) => SampleType::I16,
            Samples::F32(_) => SampleType::F32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Samples::U8(v) => v.len(),
            Samples::U16(v) => v.len(),
            Samples::I16(v) => v.len(),
            Samples::F32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Single sample widened to f64, mainly for inspection
    pub fn value_at(&self, index: usize) -> Option<f64> {
        match self {
            Samples::U8(v) => v.get(index).map(|&s| s as f64),
            Samples::U16(v) => v.get(index).map(|&s| s as f64),
            Samples::I16(v) => v.get(index).map(|&s| s as f64),
            Samples::F32(v) => v.get(index).map(|&s| s as f64),
        }
    }
}

/// Samples of one window indexed (band, row, col)
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    bands: usize,
    rows: usize,
    cols: usize,
    samples: Samples,
}

impl RasterBuffer {
    /// Wrap band-major samples, checking that the length matches the shape
    pub fn new(bands: usize, rows: usize, cols: usize, samples: Samples) -> CropResult<Self> {
        let expected = bands * rows * cols;
        if samples.len() != expected {
            return Err(CropError::GenericError(format!(
                "Band-major buffer of shape ({}, {}, {}) needs {} samples, got {}",
                bands, rows, cols, expected, samples.len()
            )));
        }
        Ok(RasterBuffer { bands, rows, cols, samples })
    }

    /// Shape as (bands, rows, cols)
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.bands, self.rows, self.cols)
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    /// Sample at (band, row, col)
    pub fn get(&self, band: usize, row: usize, col: usize) -> Option<f64> {
        if band >= self.bands || row >= self.rows || col >= self.cols {
            return None;
        }
        self.samples.value_at((band * self.rows + row) * self.cols + col)
    }

    /// Reorder (band, row, col) into (row, col, band)
    pub fn into_channel_last(self) -> PixelBuffer {
        let (bands, rows, cols) = (self.bands, self.rows, self.cols);
        let samples = map_samples!(self.samples, |data| interleave(&data, bands, rows * cols));
        PixelBuffer { width: cols, height: rows, bands, samples }
    }
}

/// Samples of one window indexed (row, col, band), ready for encoding
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    bands: usize,
    samples: Samples,
}

impl PixelBuffer {
    /// Wrap channel-last samples, checking that the length matches the shape
    pub fn new(width: usize, height: usize, bands: usize, samples: Samples) -> CropResult<Self> {
        let expected = width * height * bands;
        if samples.len() != expected {
            return Err(CropError::GenericError(format!(
                "Pixel buffer of {}x{}x{} needs {} samples, got {}",
                width, height, bands, expected, samples.len()
            )));
        }
        Ok(PixelBuffer { width, height, bands, samples })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn sample_type(&self) -> SampleType {
        self.samples.sample_type()
    }

    /// Sample at (row, col, band)
    pub fn get(&self, row: usize, col: usize, band: usize) -> Option<f64> {
        if row >= self.height || col >= self.width || band >= self.bands {
            return None;
        }
        self.samples.value_at((row * self.width + col) * self.bands + band)
    }
}

/// Turn `bands` consecutive planes of `plane` samples into interleaved pixels
pub(crate) fn interleave<T: Copy>(planes: &[T], bands: usize, plane: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(planes.len());
    for pixel in 0..plane {
        for band in 0..bands {
            out.push(planes[band * plane + pixel]);
        }
    }
    out
}
