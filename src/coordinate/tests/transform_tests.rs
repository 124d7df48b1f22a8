//! Tests for the affine world-to-pixel transform

extern crate std;

use crate::coordinate::{GeoTransform, PixelPoint, Point};

fn north_up() -> GeoTransform {
    // 0.5 m pixels, top-left corner at (1000, 2000)
    GeoTransform::from_coefficients([1000.0, 0.5, 0.0, 2000.0, 0.0, -0.5])
}

#[test]
fn test_world_to_pixel_inside_raster() {
    let gt = north_up();
    std::assert_eq!(gt.world_to_pixel(&Point::new(1000.0, 2000.0)), PixelPoint::new(0, 0));
    std::assert_eq!(gt.world_to_pixel(&Point::new(1005.0, 1995.0)), PixelPoint::new(10, 10));
    std::assert_eq!(gt.world_to_pixel(&Point::new(1005.2, 1994.9)), PixelPoint::new(10, 10));
}

#[test]
fn test_world_to_pixel_floors_negative_offsets() {
    let gt = north_up();
    // Left of and above the origin
    std::assert_eq!(gt.world_to_pixel(&Point::new(999.9, 2000.1)), PixelPoint::new(-1, -1));
}

#[test]
fn test_world_to_pixel_is_deterministic() {
    let gt = north_up();
    let p = Point::new(1234.567, 1876.543);
    let first = gt.world_to_pixel(&p);
    for _ in 0..10 {
        std::assert_eq!(gt.world_to_pixel(&p), first);
    }
}

#[test]
fn test_rotation_terms_are_ignored() {
    let plain = north_up();
    let mut rotated = north_up();
    rotated.row_rotation = 0.3;
    rotated.col_rotation = -0.2;

    std::assert!(rotated.is_rotated());
    let p = Point::new(1010.0, 1980.0);
    std::assert_eq!(rotated.world_to_pixel(&p), plain.world_to_pixel(&p));
}

#[test]
fn test_from_scale_and_tiepoint() {
    let gt = GeoTransform::from_scale_and_tiepoint(&[0.5, 0.5, 0.0], &[0.0, 0.0, 0.0, 1000.0, 2000.0, 0.0]).unwrap();
    std::assert_eq!(gt.coefficients(), [1000.0, 0.5, 0.0, 2000.0, 0.0, -0.5]);

    // Tiepoint on a pixel other than the origin
    let shifted = GeoTransform::from_scale_and_tiepoint(&[2.0, 2.0, 0.0], &[10.0, 5.0, 0.0, 120.0, 90.0, 0.0]).unwrap();
    std::assert_eq!(shifted.origin_x, 100.0);
    std::assert_eq!(shifted.origin_y, 100.0);
}

#[test]
fn test_from_scale_and_tiepoint_rejects_short_input() {
    std::assert!(GeoTransform::from_scale_and_tiepoint(&[1.0], &[0.0; 6]).is_err());
    std::assert!(GeoTransform::from_scale_and_tiepoint(&[1.0, 1.0], &[0.0; 3]).is_err());
    std::assert!(GeoTransform::from_scale_and_tiepoint(&[0.0, 1.0], &[0.0; 6]).is_err());
}

#[test]
fn test_from_model_transformation() {
    let matrix = [
        0.5, 0.0, 0.0, 1000.0,
        0.0, -0.5, 0.0, 2000.0,
        0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    let gt = GeoTransform::from_model_transformation(&matrix).unwrap();
    std::assert_eq!(gt, north_up());
}
