//! Point structures for geographic and pixel coordinates

/// A point in the raster's native coordinate reference system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate (easting or longitude)
    pub x: f64,
    /// Y coordinate (northing or latitude)
    pub y: f64,
}

impl Point {
    /// Create a new 2D point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Create a point from a 3D vertex, dropping the elevation
    pub fn from_xyz(x: f64, y: f64, _z: f64) -> Self {
        Point { x, y }
    }
}

/// Integer pixel coordinate (column, row) in raster space
///
/// Values may be negative or exceed the raster extent; bounds are only
/// checked when a window is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    /// Column index
    pub px: i64,
    /// Row index
    pub py: i64,
}

impl PixelPoint {
    pub fn new(px: i64, py: i64) -> Self {
        PixelPoint { px, py }
    }
}
