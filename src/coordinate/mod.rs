//! Coordinate handling for the geometry-to-pixel pipeline
//!
//! This module provides the world and pixel point types, the affine
//! geotransform, and the bounding window builder.

mod point;
mod transform;
mod window;

#[cfg(test)]
mod tests;

pub use self::point::{PixelPoint, Point};
pub use self::transform::GeoTransform;
pub use self::window::{PixelWindow, WindowRejection};
