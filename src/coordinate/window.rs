//! Pixel window derivation
//!
//! Reduces the pixel-space vertices of one polygon to the axis-aligned
//! rectangle that is cropped out of the raster. Rejections are returned as
//! values so that a single bad polygon never stops the rest of a drawing.

use std::fmt;

use super::point::PixelPoint;

/// Rectangular crop area in pixel coordinates
///
/// Only constructible through [`PixelWindow::from_pixels`] or
/// [`PixelWindow::new`], both of which guarantee a positive area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    min_x: i64,
    min_y: i64,
    width: u32,
    height: u32,
}

/// Why a polygon did not produce a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRejection {
    /// The polygon had no vertices
    EmptyGeometry,
    /// All vertices share a column or a row
    DegenerateWindow,
    /// The extent does not fit a `u32` pixel size
    WindowTooLarge,
}

impl fmt::Display for WindowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowRejection::EmptyGeometry => write!(f, "empty geometry"),
            WindowRejection::DegenerateWindow => write!(f, "degenerate window"),
            WindowRejection::WindowTooLarge => write!(f, "window too large"),
        }
    }
}

impl PixelWindow {
    /// Create a window from its origin and size
    ///
    /// Returns `None` when either dimension is zero.
    pub fn new(min_x: i64, min_y: i64, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(PixelWindow { min_x, min_y, width, height })
    }

    /// Compute the bounding window of a set of pixel points
    ///
    /// # Arguments
    /// * `pixels` - Pixel vertices of one polygon, in any order
    ///
    /// # Returns
    /// The window `(min_x, min_y, max_x - min_x, max_y - min_y)`, or the
    /// reason it could not be built
    pub fn from_pixels<I>(pixels: I) -> Result<Self, WindowRejection>
    where
        I: IntoIterator<Item = PixelPoint>,
    {
        let mut iter = pixels.into_iter();
        let first = iter.next().ok_or(WindowRejection::EmptyGeometry)?;

        let (mut min_x, mut max_x) = (first.px, first.px);
        let (mut min_y, mut max_y) = (first.py, first.py);
        for p in iter {
            min_x = min_x.min(p.px);
            max_x = max_x.max(p.px);
            min_y = min_y.min(p.py);
            max_y = max_y.max(p.py);
        }

        if min_x == max_x || min_y == max_y {
            return Err(WindowRejection::DegenerateWindow);
        }

        let extent = |min: i64, max: i64| {
            max.checked_sub(min)
                .and_then(|size| u32::try_from(size).ok())
                .ok_or(WindowRejection::WindowTooLarge)
        };
        let width = extent(min_x, max_x)?;
        let height = extent(min_y, max_y)?;

        Ok(PixelWindow { min_x, min_y, width, height })
    }

    pub fn min_x(&self) -> i64 {
        self.min_x
    }

    pub fn min_y(&self) -> i64 {
        self.min_y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// X coordinate immediately right of the window (exclusive)
    pub fn end_x(&self) -> i64 {
        self.min_x + self.width as i64
    }

    /// Y coordinate immediately below the window (exclusive)
    pub fn end_y(&self) -> i64 {
        self.min_y + self.height as i64
    }

    /// Number of pixels covered by the window
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the window lies completely inside a raster of the given size
    pub fn fits_within(&self, raster_width: u32, raster_height: u32) -> bool {
        self.min_x >= 0
            && self.min_y >= 0
            && self.end_x() <= raster_width as i64
            && self.end_y() <= raster_height as i64
    }
}

impl fmt::Display for PixelWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={}, y={}, width={}, height={}", self.min_x, self.min_y, self.width, self.height)
    }
}
