//! Affine world-to-pixel transform

use log::debug;

use super::point::{PixelPoint, Point};
use crate::errors::{CropError, CropResult};

/// The six affine coefficients mapping raster pixels to world coordinates
///
/// Layout follows the usual geotransform ordering:
/// `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`.
/// `pixel_height` is negative for north-up rasters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub row_rotation: f64,
    pub origin_y: f64,
    pub col_rotation: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Build a transform from its six coefficients
    pub fn from_coefficients(gt: [f64; 6]) -> Self {
        GeoTransform {
            origin_x: gt[0],
            pixel_width: gt[1],
            row_rotation: gt[2],
            origin_y: gt[3],
            col_rotation: gt[4],
            pixel_height: gt[5],
        }
    }

    /// Build a north-up transform from GeoTIFF ModelPixelScale and ModelTiepoint values
    ///
    /// # Arguments
    /// * `pixel_scale` - `[scale_x, scale_y, scale_z]`
    /// * `tiepoint` - `[i, j, k, x, y, z]` tying raster (i, j) to world (x, y)
    pub fn from_scale_and_tiepoint(pixel_scale: &[f64], tiepoint: &[f64]) -> CropResult<Self> {
        if pixel_scale.len() < 2 || tiepoint.len() < 6 {
            return Err(CropError::MissingGeoTransform);
        }

        let pixel_width = pixel_scale[0];
        let pixel_height = -pixel_scale[1];
        let origin_x = tiepoint[3] - tiepoint[0] * pixel_width;
        let origin_y = tiepoint[4] - tiepoint[1] * pixel_height;

        let transform = GeoTransform::from_coefficients([origin_x, pixel_width, 0.0, origin_y, 0.0, pixel_height]);
        transform.validate()?;

        debug!("Derived geotransform from scale/tiepoint: {:?}", transform.coefficients());
        Ok(transform)
    }

    /// Build a transform from a GeoTIFF ModelTransformation matrix (4x4, row-major)
    pub fn from_model_transformation(matrix: &[f64]) -> CropResult<Self> {
        if matrix.len() < 16 {
            return Err(CropError::MissingGeoTransform);
        }

        let transform = GeoTransform::from_coefficients([
            matrix[3], matrix[0], matrix[1],
            matrix[7], matrix[4], matrix[5],
        ]);
        transform.validate()?;

        Ok(transform)
    }

    /// Coefficients in geotransform order
    pub fn coefficients(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.col_rotation,
            self.pixel_height,
        ]
    }

    /// Whether the rotation terms are non-zero
    pub fn is_rotated(&self) -> bool {
        self.row_rotation != 0.0 || self.col_rotation != 0.0
    }

    /// Map a world coordinate to the pixel containing it
    ///
    /// Rotation terms are ignored. Each quotient is floored, so points left
    /// of or above the origin map to negative indices.
    pub fn world_to_pixel(&self, point: &Point) -> PixelPoint {
        let px = ((point.x - self.origin_x) / self.pixel_width).floor() as i64;
        let py = ((point.y - self.origin_y) / self.pixel_height).floor() as i64;
        PixelPoint::new(px, py)
    }

    fn validate(&self) -> CropResult<()> {
        let finite = self.coefficients().iter().all(|c| c.is_finite());
        if !finite || self.pixel_width == 0.0 || self.pixel_height == 0.0 {
            return Err(CropError::RasterError(format!(
                "Invalid geotransform coefficients: {:?}",
                self.coefficients()
            )));
        }
        Ok(())
    }
}
